//! This module defines the `Machine` struct: the finite control of a
//! quadruple machine. It owns the tape and the ordered rule table, caches
//! the next matching quadruple between steps, and exposes single-step and
//! budgeted-run execution.

use crate::tape::Tape;
use crate::types::{Action, Quadruple, StepBudget, Symbol, INITIAL_STATE};
use std::fmt;
use tracing::{debug, trace};

/// A quadruple-based Turing machine.
///
/// The machine holds the full rule table in load order, the owned [`Tape`],
/// the current control state, and the quadruple that will drive the next
/// step. Lookup happens once per transition and is cached in `pending`; a
/// step that finds no pending quadruple halts the machine permanently.
pub struct Machine {
    quadruples: Vec<Quadruple>,
    tape: Tape,
    state: u32,
    pending: Option<Quadruple>,
    halted: bool,
    step_count: usize,
    output: usize,
}

impl Machine {
    /// Creates a machine with an empty rule table, a fresh tape, and the
    /// control state at its conventional initial value of 1.
    pub fn new() -> Self {
        Self {
            quadruples: Vec::new(),
            tape: Tape::new(),
            state: INITIAL_STATE,
            pending: None,
            halted: false,
            step_count: 0,
            output: 0,
        }
    }

    /// Replaces the rule table and refreshes the pending-quadruple cache.
    /// Nothing else is reset: tape, state, and counters keep their values.
    pub fn load_quadruples(&mut self, quadruples: Vec<Quadruple>) {
        self.quadruples = quadruples;
        self.pending = self.find_quadruple();
        debug!(
            count = self.quadruples.len(),
            state = self.state,
            "rule table loaded"
        );
    }

    /// Seeds the tape with `values` as blank-separated unary blocks.
    pub fn load_values(&mut self, values: &[usize]) {
        self.tape.fill(values);
    }

    /// Executes one step and returns the current output.
    ///
    /// If a quadruple is pending, its action is applied to the tape, the
    /// control state transitions, and the next pending quadruple is looked
    /// up. If none is pending the machine halts; the tape is untouched.
    /// Either way the output is recomputed from the tape. On a machine that
    /// has already halted this is a no-op returning the last output.
    pub fn execute_step(&mut self) -> usize {
        if self.halted {
            return self.output;
        }

        self.step_count += 1;
        match self.pending {
            Some(quadruple) => {
                self.apply(quadruple.action);
                self.state = quadruple.next_state;
                self.pending = self.find_quadruple();
                trace!(step = self.step_count, state = self.state, quadruple = %quadruple, "applied");
            }
            None => {
                self.halted = true;
                debug!(
                    step = self.step_count,
                    state = self.state,
                    "no matching quadruple; halted"
                );
            }
        }

        self.output = self.tape.read_number();
        self.output
    }

    /// Runs the machine until the budget is exhausted or it halts, whichever
    /// comes first, and returns the current output.
    ///
    /// Pass [`StepBudget::Unbounded`] to run to completion; callers that
    /// need interactive checkpoints pass finite budgets and re-invoke. After
    /// halting this returns the last output without executing anything.
    pub fn run_for(&mut self, budget: StepBudget) -> usize {
        let mut executed = 0;
        while !self.halted && budget.allows(executed) {
            self.execute_step();
            executed += 1;
        }
        self.output
    }

    /// Applies a quadruple's action to the tape.
    fn apply(&mut self, action: Action) {
        match action {
            Action::MoveLeft => {
                self.tape.move_left();
            }
            Action::MoveRight => {
                self.tape.move_right();
            }
            Action::WriteOne => self.tape.write(Symbol::One),
            Action::WriteBlank => self.tape.write(Symbol::Blank),
        }
    }

    /// Finds the first quadruple, in load order, matching the current state
    /// and the symbol under the head.
    ///
    /// The scan is deliberately sequential: with an ambiguous table only the
    /// first-listed match is ever used.
    fn find_quadruple(&self) -> Option<Quadruple> {
        let scanned = self.tape.read();
        self.quadruples
            .iter()
            .find(|q| q.current_state == self.state && q.scanning_symbol == scanned)
            .copied()
    }

    /// Returns the current control state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Returns whether the machine has halted. Halting is permanent.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Returns the number of steps executed, counting the halting step.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the last computed output: the count of ones to the right of
    /// the head.
    pub fn output(&self) -> usize {
        self.output
    }

    /// Returns the machine's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Machine {
    /// Renders the tape with the head bracketed, then the output and step
    /// count, e.g. `{B}111B` / `3 (step 2)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{} (step {})", self.tape, self.output, self.step_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol::{Blank, One};

    fn quadruple(current_state: u32, scanning_symbol: Symbol, action: Action, next_state: u32) -> Quadruple {
        Quadruple {
            current_state,
            scanning_symbol,
            action,
            next_state,
        }
    }

    /// The unary successor table: writes a one over the leading blank, steps
    /// back off it, then runs out of rules. `[n]` becomes `n + 1`.
    fn successor_table() -> Vec<Quadruple> {
        vec![
            quadruple(1, Blank, Action::WriteOne, 2),
            quadruple(2, One, Action::MoveLeft, 3),
        ]
    }

    #[test]
    fn test_new_machine() {
        let machine = Machine::new();

        assert_eq!(machine.state(), 1);
        assert!(!machine.halted());
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.output(), 0);
        assert_eq!(machine.tape().read(), Blank);
    }

    #[test]
    fn test_load_quadruples_refreshes_pending() {
        let mut machine = Machine::new();
        machine.load_quadruples(successor_table());

        // The cached lookup already matched (1, B); the first step must
        // apply it rather than halt.
        machine.execute_step();
        assert!(!machine.halted());
        assert_eq!(machine.state(), 2);
    }

    #[test]
    fn test_empty_table_halts_immediately() {
        let mut machine = Machine::new();
        machine.load_quadruples(Vec::new());
        machine.load_values(&[2]);

        let output = machine.run_for(StepBudget::Unbounded);

        assert!(machine.halted());
        assert_eq!(machine.step_count(), 1);
        assert_eq!(output, 2);
    }

    #[test]
    fn test_successor_end_to_end() {
        let mut machine = Machine::new();
        machine.load_quadruples(successor_table());
        machine.load_values(&[3]);

        let output = machine.run_for(StepBudget::Unbounded);

        assert!(machine.halted());
        assert_eq!(output, 4);
        assert_eq!(machine.output(), 4);
        assert_eq!(machine.step_count(), 3);
    }

    #[test]
    fn test_halt_step_leaves_tape_untouched() {
        let mut machine = Machine::new();
        machine.load_quadruples(Vec::new());
        machine.load_values(&[1]);
        let before = machine.tape().symbols().to_vec();

        machine.execute_step();

        assert!(machine.halted());
        assert_eq!(machine.tape().symbols(), before.as_slice());
    }

    #[test]
    fn test_post_halt_steps_are_noops() {
        let mut machine = Machine::new();
        machine.load_quadruples(successor_table());
        machine.load_values(&[3]);
        machine.run_for(StepBudget::Unbounded);

        let steps_at_halt = machine.step_count();

        assert_eq!(machine.execute_step(), 4);
        assert_eq!(machine.run_for(StepBudget::Unbounded), 4);
        assert_eq!(machine.run_for(StepBudget::Bounded(5)), 4);
        assert_eq!(machine.step_count(), steps_at_halt);
        assert_eq!(machine.state(), 3);
    }

    #[test]
    fn test_first_match_wins() {
        let mut machine = Machine::new();
        machine.load_quadruples(vec![
            quadruple(1, Blank, Action::WriteOne, 2),
            // Same (state, symbol) pair; must never fire.
            quadruple(1, Blank, Action::MoveRight, 9),
        ]);

        machine.execute_step();

        assert_eq!(machine.state(), 2);
        assert_eq!(machine.tape().symbols()[machine.tape().head()], One);
    }

    #[test]
    fn test_write_blank_action() {
        let mut machine = Machine::new();
        machine.load_quadruples(vec![
            quadruple(1, Blank, Action::MoveRight, 2),
            quadruple(2, One, Action::WriteBlank, 3),
        ]);
        machine.load_values(&[1]);

        machine.run_for(StepBudget::Unbounded);

        assert!(machine.halted());
        assert_eq!(machine.output(), 0);
    }

    #[test]
    fn test_output_reported_after_every_step() {
        let mut machine = Machine::new();
        machine.load_quadruples(successor_table());
        machine.load_values(&[3]);

        // Write-one at the left edge shifts the head to index 1, so only
        // three ones lie strictly to its right; the move-left then exposes
        // the fourth.
        assert_eq!(machine.execute_step(), 3);
        assert_eq!(machine.execute_step(), 4);
        assert_eq!(machine.execute_step(), 4); // the halting step
        assert!(machine.halted());
    }

    #[test]
    fn test_bounded_run_stops_at_budget() {
        let mut machine = Machine::new();
        machine.load_quadruples(successor_table());
        machine.load_values(&[3]);

        machine.run_for(StepBudget::Bounded(1));

        assert!(!machine.halted());
        assert_eq!(machine.step_count(), 1);
        assert_eq!(machine.state(), 2);
    }

    #[test]
    fn test_zero_budget_is_a_noop() {
        let mut machine = Machine::new();
        machine.load_quadruples(successor_table());
        machine.load_values(&[3]);

        let output = machine.run_for(StepBudget::Bounded(0));

        assert_eq!(output, 0);
        assert_eq!(machine.step_count(), 0);
        assert!(!machine.halted());
    }

    #[test]
    fn test_single_steps_match_unbounded_run() {
        let mut reference = Machine::new();
        reference.load_quadruples(successor_table());
        reference.load_values(&[3]);

        let mut sampled = Machine::new();
        sampled.load_quadruples(successor_table());
        sampled.load_values(&[3]);

        let mut outputs = Vec::new();
        while !sampled.halted() {
            outputs.push(sampled.run_for(StepBudget::Bounded(1)));
        }

        reference.run_for(StepBudget::Unbounded);

        assert_eq!(sampled.step_count(), reference.step_count());
        assert_eq!(sampled.output(), reference.output());
        assert_eq!(sampled.tape().symbols(), reference.tape().symbols());
        assert_eq!(outputs, vec![3, 4, 4]);
    }

    #[test]
    fn test_halting_is_deterministic() {
        let run = || {
            let mut machine = Machine::new();
            machine.load_quadruples(successor_table());
            machine.load_values(&[3]);
            machine.run_for(StepBudget::Unbounded);
            (machine.step_count(), machine.output())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_display() {
        let mut machine = Machine::new();
        machine.load_quadruples(successor_table());
        machine.load_values(&[2]);
        machine.run_for(StepBudget::Unbounded);

        assert_eq!(machine.to_string(), "{B}111B\n3 (step 3)");
    }
}
