//! Compiled form of one bracketed expression region.

use std::fmt;

use crate::literal::Literal;

/// One step of a postfix program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Push a constant
    Push(Literal),
    /// Push the value bound to the named variable
    Load(String),
    /// Pop the arguments of the named function or operator and push its result
    Call(String),
}

/// An expression in Reverse Polish order, as produced by the shunting-yard
/// parser. Variables are referenced by name and resolved at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostfixProgram {
    instructions: Vec<Instruction>,
}

impl PostfixProgram {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Names of the variables the program loads, deduplicated, in the order
    /// they first appear.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for instruction in &self.instructions {
            if let Instruction::Load(name) = instruction {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl<'a> IntoIterator for &'a PostfixProgram {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(Literal::Text(text)) => write!(f, "\"{text}\""),
            Instruction::Push(literal) => write!(f, "{literal}"),
            Instruction::Load(name) | Instruction::Call(name) => f.write_str(name),
        }
    }
}

/// Space separated instructions, e.g. `A B # bww 25 +`.
impl fmt::Display for PostfixProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, instruction) in self.instructions.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}
