use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Expected {expected}, found {found} (line {line})")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        line: usize,
    },
    #[error("Expected an indented block after the header on line {line}")]
    ExpectedIndentedBlock { line: usize },
    #[error("Unindent to {width} spaces does not match any outer block (line {line})")]
    InconsistentDedent { width: usize, line: usize },
    #[error("Unexpected indent (line {line})")]
    UnexpectedIndent { line: usize },
    #[error("'{keyword}' has no matching 'if' (line {line})")]
    DanglingBranch {
        keyword: &'static str,
        line: usize,
    },
    #[error("Comparison operators cannot be chained (line {line})")]
    ChainedComparison { line: usize },
}
