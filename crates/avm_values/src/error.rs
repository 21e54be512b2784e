//! Error types for value metadata.

use crate::kind::ValueKind;
use thiserror::Error;

/// Rejected descriptor passed to [`crate::UnloadedValue::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnloadedValueError {
    #[error("unloaded {kind} value must have a nonzero size")]
    ZeroSize { kind: ValueKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseU256Error {
    #[error("cannot parse integer from empty string")]
    Empty,
    #[error("invalid digit {ch:?} at index {index}")]
    InvalidDigit { index: usize, ch: char },
    #[error("number too large to fit in 256 bits")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value does not fit in {target}")]
pub struct U256OverflowError {
    pub target: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown value type code {0}")]
pub struct UnknownValueKind(pub u8);
