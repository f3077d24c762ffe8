use num::BigRational;
use parser::{ParseError, ParserOptions};
use scanner::{ScanError, ScannerOptions};

use crate::{evaluate, EvalError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub scanner: ScannerOptions,
    pub parser: ParserOptions,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Scans, parses and evaluates `source`, stopping at the first error.
pub fn run_source(source: &str, options: &Options) -> Result<BigRational, InterpretError> {
    let tokens = scanner::scan_with(source, options.scanner)?;
    log::trace!("Tokens: {}", tokens);

    let expr = parser::parse_with(&tokens, options.parser)?;
    log::trace!("Expression: {}", expr);

    let value = evaluate(&expr)?;
    log::trace!("Value: {}", value);

    Ok(value)
}
