//! This module provides the parser for textual quadruple rule tables,
//! utilizing the `pest` crate. The grammar lives in `grammar.pest`; the
//! format is one `current_state,scanning_symbol,action,next_state` rule per
//! line.

use crate::types::{Action, MachineError, Quadruple, Symbol};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the rule-table grammar defined in
/// `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TableParser;

/// Parses a rule-table text into quadruples, preserving line order.
///
/// Order matters to the machine: with an ambiguous table, lookup applies the
/// first-listed match. The scanning symbol must belong to the closed tape
/// alphabet; the action field is permissive and never fails (unrecognized
/// tokens mean write-blank).
///
/// # Arguments
///
/// * `input` - The rule-table text, one quadruple per line.
///
/// # Returns
///
/// * `Ok(Vec<Quadruple>)` if every line parses.
/// * `Err(MachineError::ParseError)` on any syntax error.
pub fn parse(input: &str) -> Result<Vec<Quadruple>, MachineError> {
    let root = TableParser::parse(Rule::table, input.trim())
        .map_err(|e| MachineError::ParseError(e.into()))? //
        .next()
        .unwrap();

    root.into_inner()
        .filter(|p| p.as_rule() == Rule::quadruple)
        .map(parse_quadruple)
        .collect()
}

/// Parses one quadruple line from a `Pair<Rule::quadruple>`.
fn parse_quadruple(pair: Pair<Rule>) -> Result<Quadruple, MachineError> {
    let mut pairs = pair.into_inner();

    // Grammar guarantees exactly: state, symbol, action, state.
    let current_state = parse_state(pairs.next().unwrap())?;
    let scanning_symbol = parse_scanning_symbol(pairs.next().unwrap())?;
    let action = Action::from_token(pairs.next().unwrap().as_str());
    let next_state = parse_state(pairs.next().unwrap())?;

    Ok(Quadruple {
        current_state,
        scanning_symbol,
        action,
        next_state,
    })
}

/// Parses a state field from a `Pair<Rule::state>`.
fn parse_state(pair: Pair<Rule>) -> Result<u32, MachineError> {
    let span = pair.as_span();
    pair.as_str()
        .parse::<u32>()
        .map_err(|_| parse_error("State out of range", span))
}

/// Parses a scanning-symbol field from a `Pair<Rule::symbol>`.
///
/// Unlike the action field, the symbol field is not permissive: the tape
/// alphabet is closed, so anything but `B` or `1` is a syntax error.
fn parse_scanning_symbol(pair: Pair<Rule>) -> Result<Symbol, MachineError> {
    let span = pair.as_span();
    pair.as_str()
        .chars()
        .next()
        .and_then(Symbol::from_char)
        .ok_or_else(|| parse_error(&format!("Unknown tape symbol: {}", pair.as_str()), span))
}

/// Creates a `MachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> MachineError {
    MachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}
