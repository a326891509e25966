//! This crate provides the core logic for a quadruple-based Turing machine
//! simulator: an unbounded two-way tape, an ordered table of
//! `(state, symbol) -> (action, next_state)` rules, and a step-by-step
//! execution engine with halt detection and unary output extraction.
//! It also includes a parser for the textual rule-table format and a
//! collection of built-in example tables.

pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `TableLoader` struct from the loader module.
pub use loader::TableLoader;
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the `TableRegistry` struct and `TABLES` from the programs module.
pub use programs::{TableRegistry, TABLES};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the core machine types from the types module.
pub use types::{Action, MachineError, Quadruple, StepBudget, Symbol};
