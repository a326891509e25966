//! This module defines the core data structures and types used throughout the
//! quadruple machine simulator: tape symbols, actions, quadruple rules, step
//! budgets, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// The character rendering of the blank tape symbol.
pub const BLANK_CHAR: char = 'B';
/// The character rendering of the one tape symbol.
pub const ONE_CHAR: char = '1';
/// The control state every machine starts in, by convention of this domain.
pub const INITIAL_STATE: u32 = 1;

/// A tape symbol. The alphabet is closed: exactly these two symbols exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    /// The blank symbol, rendered as `B`.
    Blank,
    /// The one symbol, rendered as `1`.
    One,
}

impl Symbol {
    /// Converts a character to a symbol. Returns `None` for characters
    /// outside the alphabet.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            BLANK_CHAR => Some(Symbol::Blank),
            ONE_CHAR => Some(Symbol::One),
            _ => None,
        }
    }

    /// Returns the character rendering of this symbol.
    pub fn as_char(&self) -> char {
        match self {
            Symbol::Blank => BLANK_CHAR,
            Symbol::One => ONE_CHAR,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The action a quadruple applies to the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Move the head one cell to the left.
    MoveLeft,
    /// Move the head one cell to the right.
    MoveRight,
    /// Write a one over the current cell.
    WriteOne,
    /// Write a blank over the current cell.
    WriteBlank,
}

impl Action {
    /// Converts an action token from the rule-table format.
    ///
    /// Matching is case-insensitive: `L` moves left, `R` moves right, `1`
    /// writes a one. Any other token writes a blank; that is the format's
    /// permissive catch-all, not a validation error.
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "l" => Action::MoveLeft,
            "r" => Action::MoveRight,
            "1" => Action::WriteOne,
            _ => Action::WriteBlank,
        }
    }

    /// Returns the canonical token for this action.
    pub fn as_token(&self) -> &'static str {
        match self {
            Action::MoveLeft => "L",
            Action::MoveRight => "R",
            Action::WriteOne => "1",
            Action::WriteBlank => "B",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

/// A single transition rule of the machine.
///
/// When the control state equals `current_state` and the head reads
/// `scanning_symbol`, the machine applies `action` and transitions to
/// `next_state`. Quadruples are immutable once loaded; their order in the
/// table is significant (first match wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quadruple {
    /// The control state this rule fires in.
    pub current_state: u32,
    /// The symbol the head must be scanning for this rule to fire.
    pub scanning_symbol: Symbol,
    /// The tape action to apply.
    pub action: Action,
    /// The control state to transition to.
    pub next_state: u32,
}

impl fmt::Display for Quadruple {
    /// Renders the quadruple in its source form, e.g. `1,B,R,2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.current_state, self.scanning_symbol, self.action, self.next_state
        )
    }
}

/// A step budget for [`Machine::run_for`](crate::Machine::run_for).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBudget {
    /// Execute at most this many steps.
    Bounded(usize),
    /// Run until the machine halts, with no cap.
    Unbounded,
}

impl StepBudget {
    /// Returns whether the budget allows one more step after `executed`
    /// steps have already run.
    pub fn allows(&self, executed: usize) -> bool {
        match self {
            StepBudget::Bounded(limit) => executed < *limit,
            StepBudget::Unbounded => true,
        }
    }
}

/// Errors that can occur while loading a machine. Halting is not among them:
/// running out of matching quadruples is a normal terminal state, reported
/// through [`Machine::halted`](crate::Machine::halted).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// A rule-table line could not be parsed (wrong field count, non-integer
    /// state, unknown tape symbol).
    #[error("Table parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// A file system operation failed while loading a table.
    #[error("File error: {0}")]
    FileError(String),
    /// Caller-supplied input failed validation (e.g. a non-numeric step
    /// count from the interactive shell).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_char_round_trip() {
        assert_eq!(Symbol::from_char('B'), Some(Symbol::Blank));
        assert_eq!(Symbol::from_char('1'), Some(Symbol::One));
        assert_eq!(Symbol::from_char('x'), None);
        assert_eq!(Symbol::Blank.as_char(), 'B');
        assert_eq!(Symbol::One.as_char(), '1');
    }

    #[test]
    fn test_symbol_serialization() {
        let blank_json = serde_json::to_string(&Symbol::Blank).unwrap();
        let one_json = serde_json::to_string(&Symbol::One).unwrap();

        assert_eq!(blank_json, "\"Blank\"");
        assert_eq!(one_json, "\"One\"");

        let blank: Symbol = serde_json::from_str(&blank_json).unwrap();
        let one: Symbol = serde_json::from_str(&one_json).unwrap();

        assert_eq!(blank, Symbol::Blank);
        assert_eq!(one, Symbol::One);
    }

    #[test]
    fn test_action_from_token() {
        assert_eq!(Action::from_token("L"), Action::MoveLeft);
        assert_eq!(Action::from_token("l"), Action::MoveLeft);
        assert_eq!(Action::from_token("R"), Action::MoveRight);
        assert_eq!(Action::from_token("r"), Action::MoveRight);
        assert_eq!(Action::from_token("1"), Action::WriteOne);
        assert_eq!(Action::from_token("B"), Action::WriteBlank);
    }

    #[test]
    fn test_action_unknown_token_writes_blank() {
        // Anything outside L/R/1 is the write-blank catch-all.
        assert_eq!(Action::from_token("b"), Action::WriteBlank);
        assert_eq!(Action::from_token("0"), Action::WriteBlank);
        assert_eq!(Action::from_token("erase"), Action::WriteBlank);
    }

    #[test]
    fn test_quadruple_display() {
        let quadruple = Quadruple {
            current_state: 1,
            scanning_symbol: Symbol::Blank,
            action: Action::MoveRight,
            next_state: 2,
        };

        assert_eq!(quadruple.to_string(), "1,B,R,2");
    }

    #[test]
    fn test_quadruple_serialization_round_trip() {
        let quadruple = Quadruple {
            current_state: 2,
            scanning_symbol: Symbol::One,
            action: Action::WriteBlank,
            next_state: 3,
        };

        let json = serde_json::to_string(&quadruple).unwrap();
        let decoded: Quadruple = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, quadruple);
    }

    #[test]
    fn test_step_budget_allows() {
        assert!(StepBudget::Bounded(3).allows(0));
        assert!(StepBudget::Bounded(3).allows(2));
        assert!(!StepBudget::Bounded(3).allows(3));
        assert!(!StepBudget::Bounded(0).allows(0));
        assert!(StepBudget::Unbounded.allows(usize::MAX - 1));
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::FileError("missing.quad".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("File error"));
        assert!(error_msg.contains("missing.quad"));
    }
}
