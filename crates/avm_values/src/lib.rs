//! Value metadata types for the AVM value graph.
//!
//! This crate contains the identity-only types that are independent of value loading:
//! - `U256` - Fixed-width 256-bit unsigned integer used for hashes and sizes
//! - `ValueKind` - The kinds a materialized value can have
//! - `UnloadedValue` - Compact handle to a value that has not been loaded yet

pub mod error;
pub mod kind;
pub mod uint;
pub mod unloaded;

pub use error::{ParseU256Error, U256OverflowError, UnknownValueKind, UnloadedValueError};
pub use kind::ValueKind;
pub use uint::U256;
pub use unloaded::{HeapedInfo, UnloadedDescriptor, UnloadedValue};
