use thiserror::Error;

/// Typed errors produced while executing a parsed program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}' (line {line})")]
    NameError { name: String, line: usize },
    #[error("Division by zero (line {line})")]
    DivisionByZero { line: usize },
    #[error("'break' outside loop (line {line})")]
    BreakOutsideLoop { line: usize },
}
