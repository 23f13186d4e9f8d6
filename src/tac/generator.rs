//! Main TAC generator module.
//!
//! This module contains the `TacGenerator` structure, which owns the
//! instruction list and the temporary/label counters of one generation run.
//! Statement and expression lowering live in `stmt.rs` and `expr.rs`.

use crate::ast::ast::Node;

use super::{instruction::Instruction, stmt::gen_statement};

/// Jump targets of one enclosing loop.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopLabels {
    /// Where `continue` goes
    pub start: String,
    /// Where `break` goes
    pub end: String,
}

/// Enclosing loops, innermost last. Passed down explicitly through
/// statement generation.
pub type LoopStack = Vec<LoopLabels>;

/// Lowers an AST to three-address code.
///
/// Every call to [`TacGenerator::generate`] starts from scratch: the
/// instruction list and both counters are reset first.
#[derive(Debug, Default)]
pub struct TacGenerator {
    /// Instructions emitted so far, in order
    instructions: Vec<Instruction>,
    /// Next temporary number (`t0`, `t1`, ...)
    temp_counter: usize,
    /// Next label number, shared by every label prefix
    label_counter: usize,
}

impl TacGenerator {
    pub fn new() -> Self {
        TacGenerator::default()
    }

    /// Generates the instruction list for `program`.
    ///
    /// # Returns
    ///
    /// The instructions in execution order. They also stay available
    /// through [`TacGenerator::instructions`] and [`TacGenerator::listing`].
    pub fn generate(&mut self, program: &Node) -> Vec<Instruction> {
        self.instructions.clear();
        self.temp_counter = 0;
        self.label_counter = 0;

        let mut loops = LoopStack::new();
        gen_statement(self, program, &mut loops);

        self.instructions.clone()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Numbered listing, one line per instruction.
    pub fn listing(&self) -> Vec<String> {
        self.instructions
            .iter()
            .enumerate()
            .map(|(index, instruction)| format!("{:3}: {}", index, instruction))
            .collect()
    }

    pub fn temporaries_allocated(&self) -> usize {
        self.temp_counter
    }

    pub fn labels_allocated(&self) -> usize {
        self.label_counter
    }

    pub fn new_temp(&mut self) -> String {
        let temp = format!("t{}", self.temp_counter);
        self.temp_counter += 1;
        temp
    }

    pub fn new_label(&mut self, prefix: &str) -> String {
        let label = format!("{}{}", prefix, self.label_counter);
        self.label_counter += 1;
        label
    }

    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }
}
