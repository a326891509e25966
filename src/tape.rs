//! This module defines the `Tape` struct: an unbounded, two-way-extensible
//! tape of symbols with a movable head. The tape owns its storage and growth
//! policy; callers never need bounds checks.

use crate::types::Symbol;
use std::fmt;

/// An unbounded one-dimensional tape of [`Symbol`]s with a movable head.
///
/// The cell sequence is never empty and the head index is always valid
/// (`0 <= head < len`). Movement extends the tape with blanks at either
/// boundary, and writes pad the boundary they touch, so the head is never
/// left on an extreme cell after a mutation. The tape only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Symbol>,
    head: usize,
}

impl Tape {
    /// Creates a tape holding two blank cells with the head on the first.
    pub fn new() -> Self {
        Self {
            cells: vec![Symbol::Blank, Symbol::Blank],
            head: 0,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> Symbol {
        self.cells[self.head]
    }

    /// Moves the head one cell to the left and returns the symbol now under
    /// it.
    ///
    /// At the left boundary the tape is lengthened with a blank instead; the
    /// head stays at index 0, now over the new blank.
    pub fn move_left(&mut self) -> Symbol {
        if self.head == 0 {
            self.cells.insert(0, Symbol::Blank);
        } else {
            self.head -= 1;
        }
        self.cells[self.head]
    }

    /// Moves the head one cell to the right and returns the symbol now under
    /// it, appending a blank if the head ran off the end.
    pub fn move_right(&mut self) -> Symbol {
        self.head += 1;
        if self.head >= self.cells.len() {
            self.cells.push(Symbol::Blank);
        }
        self.cells[self.head]
    }

    /// Overwrites the cell under the head with `symbol`.
    ///
    /// Writes pad the boundary they touch: writing at index 0 prepends a
    /// blank (the head ends at index 1, still over the written cell), and
    /// writing at the last index appends a blank. Afterwards the head always
    /// has an existing neighbor on both sides.
    pub fn write(&mut self, symbol: Symbol) {
        self.cells[self.head] = symbol;
        if self.head == 0 {
            self.cells.insert(0, Symbol::Blank);
            self.head = 1;
        } else if self.head == self.cells.len() - 1 {
            self.cells.push(Symbol::Blank);
        }
    }

    /// Lays out `values` as blank-separated unary blocks strictly to the
    /// right of the current head position, then resets the head to index 0.
    ///
    /// Each value `v` becomes `v` consecutive ones followed by a single
    /// separating blank; a zero contributes only its separator.
    pub fn fill(&mut self, values: &[usize]) {
        for &value in values {
            for _ in 0..value {
                self.move_right();
                self.write(Symbol::One);
            }
            self.move_right();
        }
        self.head = 0;
    }

    /// Counts the ones strictly to the right of the head, over the entire
    /// remainder of the tape (intervening blanks do not stop the scan).
    ///
    /// This is the convention for reading the machine's output.
    pub fn read_number(&self) -> usize {
        self.cells[self.head + 1..]
            .iter()
            .filter(|&&symbol| symbol == Symbol::One)
            .count()
    }

    /// Returns the head index.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the cell contents in spatial order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.cells
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Tape {
    /// Renders the cells with the head's symbol bracketed, e.g. `{B}B` for a
    /// fresh tape or `B{1}1B` mid-run.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.cells.iter().enumerate() {
            if i == self.head {
                write!(f, "{{{}}}", symbol)?;
            } else {
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}
