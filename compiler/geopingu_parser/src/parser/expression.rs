//! Shunting-yard conversion of one expression region into postfix order.
//!
//! Precedence, associativity and arity come from the function registry.
//! After conversion the program is checked by simulating the operand stack,
//! so every program that leaves the parser evaluates to exactly one value.

use geopingu_ast::{Instruction, Literal, PostfixProgram};
use geopingu_env::{registry, FunctionSpec};
use geopingu_lexer::{Token, TokenType};
use log::debug;

use super::error::SyntaxError;

/// Entries of the operator stack
#[derive(Debug)]
enum StackEntry {
    Operator(&'static FunctionSpec),
    Function(&'static FunctionSpec),
    /// An open parenthesis; `call` is set when it opened a function's argument list
    Group {
        call: Option<&'static FunctionSpec>,
        separators: usize,
    },
}

/// What the previous token was, to tell prefix from infix operators and
/// calls from plain groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Previous {
    Start,
    Operand,
    Operator,
    Function,
    OpenParen,
    CloseParen,
    Separator,
}

impl Previous {
    fn expects_operand(self) -> bool {
        !matches!(self, Previous::Operand | Previous::CloseParen)
    }
}

struct ShuntingYard {
    output: Vec<Instruction>,
    stack: Vec<StackEntry>,
    previous: Previous,
}

impl ShuntingYard {
    fn new() -> Self {
        Self {
            output: Vec::new(),
            stack: Vec::new(),
            previous: Previous::Start,
        }
    }

    fn push_token(&mut self, token: &Token) -> Result<(), SyntaxError> {
        if self.previous == Previous::Function && token.token_type != TokenType::OpenParen {
            return Err(self.missing_argument_list());
        }
        match &token.token_type {
            TokenType::Number(text) => {
                let value = text
                    .parse::<f64>()
                    .map_err(|_| SyntaxError::UnrecognizedToken {
                        token: text.clone(),
                    })?;
                if !value.is_finite() {
                    return Err(SyntaxError::NumberOutOfRange {
                        number: text.clone(),
                    });
                }
                self.operand(Instruction::Push(Literal::Number(value)));
            }
            TokenType::Text(text) => {
                self.operand(Instruction::Push(Literal::Text(text.clone())));
            }
            TokenType::Identifier(name) => match registry().function(name) {
                Some(spec) => {
                    self.stack.push(StackEntry::Function(spec));
                    self.previous = Previous::Function;
                }
                None => self.operand(Instruction::Load(name.clone())),
            },
            TokenType::Operator(symbol) => self.operator(*symbol)?,
            TokenType::OpenParen => {
                let call = match (self.previous, self.stack.last()) {
                    (Previous::Function, Some(StackEntry::Function(spec))) => Some(*spec),
                    _ => None,
                };
                self.stack.push(StackEntry::Group {
                    call,
                    separators: 0,
                });
                self.previous = Previous::OpenParen;
            }
            TokenType::CloseParen => self.close_group()?,
            TokenType::ArgumentSeparator => self.separator()?,
        }
        Ok(())
    }

    fn operand(&mut self, instruction: Instruction) {
        self.output.push(instruction);
        self.previous = Previous::Operand;
    }

    fn emit(&mut self, entry: StackEntry) {
        match entry {
            StackEntry::Operator(spec) | StackEntry::Function(spec) => {
                self.output.push(Instruction::Call(spec.name.to_string()))
            }
            StackEntry::Group { .. } => {}
        }
    }

    fn operator(&mut self, symbol: char) -> Result<(), SyntaxError> {
        let unrecognized = || SyntaxError::UnrecognizedToken {
            token: symbol.to_string(),
        };

        if self.previous.expects_operand() {
            // Prefix position: nothing on the stack can be complete yet.
            let spec = match registry().prefix(symbol) {
                Some(spec) => spec,
                None if registry().infix(symbol).is_some() => {
                    return Err(SyntaxError::MissingOperand)
                }
                None => return Err(unrecognized()),
            };
            self.stack.push(StackEntry::Operator(spec));
        } else {
            let spec = registry().infix(symbol).ok_or_else(unrecognized)?;
            while let Some(top) = self.stack.last() {
                let pops = match top {
                    StackEntry::Operator(top) | StackEntry::Function(top) => {
                        top.precedence > spec.precedence
                            || (top.precedence == spec.precedence && !spec.right_associative)
                    }
                    StackEntry::Group { .. } => false,
                };
                if !pops {
                    break;
                }
                if let Some(entry) = self.stack.pop() {
                    self.emit(entry);
                }
            }
            self.stack.push(StackEntry::Operator(spec));
        }
        self.previous = Previous::Operator;
        Ok(())
    }

    fn close_group(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.stack.pop() {
                None => return Err(SyntaxError::UnbalancedParenthesis),
                Some(StackEntry::Group { call, separators }) => {
                    if let Some(spec) = call {
                        let found = if self.previous == Previous::OpenParen {
                            0
                        } else {
                            separators + 1
                        };
                        if found != spec.arity {
                            return Err(SyntaxError::ArgumentCountMismatch {
                                function: spec.name.to_string(),
                                expected: spec.arity,
                                found,
                            });
                        }
                        // The function sits directly beneath its argument group.
                        self.stack.pop();
                        self.output.push(Instruction::Call(spec.name.to_string()));
                    }
                    break;
                }
                Some(entry) => self.emit(entry),
            }
        }
        self.previous = Previous::CloseParen;
        Ok(())
    }

    fn separator(&mut self) -> Result<(), SyntaxError> {
        loop {
            let pop = match self.stack.last_mut() {
                None | Some(StackEntry::Group { call: None, .. }) => {
                    return Err(SyntaxError::MisplacedArgumentSeparator)
                }
                Some(StackEntry::Group { separators, .. }) => {
                    *separators += 1;
                    false
                }
                Some(_) => true,
            };
            if !pop {
                break;
            }
            if let Some(entry) = self.stack.pop() {
                self.emit(entry);
            }
        }
        self.previous = Previous::Separator;
        Ok(())
    }

    /// A function name that is not directly followed by `(`.
    fn missing_argument_list(&self) -> SyntaxError {
        let function = match self.stack.last() {
            Some(StackEntry::Function(spec)) => spec.name.to_string(),
            _ => String::new(),
        };
        SyntaxError::MissingArgumentList { function }
    }

    fn finish(mut self) -> Result<PostfixProgram, SyntaxError> {
        if self.previous == Previous::Function {
            return Err(self.missing_argument_list());
        }
        while let Some(entry) = self.stack.pop() {
            if let StackEntry::Group { .. } = entry {
                return Err(SyntaxError::UnbalancedParenthesis);
            }
            self.emit(entry);
        }
        Ok(PostfixProgram::new(self.output))
    }
}

/// Make sure the program never pops more operands than it pushed and ends
/// with exactly one value.
fn check_stack_depth(program: &PostfixProgram) -> Result<(), SyntaxError> {
    if program.is_empty() {
        return Err(SyntaxError::EmptyExpression);
    }
    let mut depth = 0usize;
    for instruction in program {
        match instruction {
            Instruction::Push(_) | Instruction::Load(_) => depth += 1,
            Instruction::Call(name) => {
                let arity = registry().get(name).map_or(0, |spec| spec.arity);
                if depth < arity {
                    return Err(SyntaxError::MissingOperand);
                }
                depth = depth - arity + 1;
            }
        }
    }
    if depth > 1 {
        return Err(SyntaxError::MissingOperator);
    }
    Ok(())
}

/// Convert the tokens of one expression region into a postfix program.
pub fn parse_expression(tokens: &[Token]) -> Result<PostfixProgram, SyntaxError> {
    let mut parser = ShuntingYard::new();
    for token in tokens {
        parser.push_token(token)?;
    }
    let program = parser.finish()?;
    check_stack_depth(&program)?;
    debug!("parsed {} tokens into postfix `{}`", tokens.len(), program);
    Ok(program)
}
