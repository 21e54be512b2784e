//! Compact handle to a value that has not been loaded yet.
//!
//! An `UnloadedValue` carries only the identity of a value: its hash, its
//! size and its kind. Small tuples (the common case) are stored inline with
//! no allocation. Everything else keeps its hash and size in a shared,
//! immutable heap block.

use crate::error::UnloadedValueError;
use crate::kind::ValueKind;
use crate::uint::U256;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroU64;
use std::sync::Arc;

/// Full identity of an unloaded value, before choosing a representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnloadedDescriptor {
    pub kind: ValueKind,
    pub hash: U256,
    pub size: U256,
}

impl UnloadedDescriptor {
    pub fn new(kind: ValueKind, hash: U256, size: U256) -> Self {
        Self { kind, hash, size }
    }
}

/// Hash and size of a value that could not be inlined.
/// Shared by every clone of the handle that created it and never mutated.
#[derive(Debug, PartialEq, Eq)]
pub struct HeapedInfo {
    pub hash: U256,
    pub size: U256,
}

#[derive(Clone)]
enum Repr {
    /// Always a tuple whose size fits in 64 bits.
    Inline { size: NonZeroU64, hash: U256 },
    Heap { kind: ValueKind, info: Arc<HeapedInfo> },
}

/// Identity-only placeholder for a value in the value graph.
///
/// Cloning a heaped handle shares its `HeapedInfo`; dropping the last clone
/// frees it. The representation is fixed at construction.
#[derive(Clone)]
pub struct UnloadedValue(Repr);

const _: () = assert!(std::mem::size_of::<UnloadedValue>() <= 48);
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UnloadedValue>();
};

impl UnloadedValue {
    /// Builds a handle from its full descriptor.
    ///
    /// Panics if `desc.size` is zero; use [`UnloadedValue::try_new`] when
    /// the size is not known to be nonzero.
    pub fn new(desc: UnloadedDescriptor) -> Self {
        assert!(!desc.size.is_zero(), "unloaded value size must be nonzero");
        Self::build(desc)
    }

    pub fn try_new(desc: UnloadedDescriptor) -> Result<Self, UnloadedValueError> {
        if desc.size.is_zero() {
            return Err(UnloadedValueError::ZeroSize { kind: desc.kind });
        }
        Ok(Self::build(desc))
    }

    fn build(desc: UnloadedDescriptor) -> Self {
        if desc.kind.is_tuple() {
            if let Some(size) = desc.size.to_u64().and_then(NonZeroU64::new) {
                return Self(Repr::Inline { size, hash: desc.hash });
            }
        }

        tracing::trace!(kind = %desc.kind, size_bits = desc.size.bits(), "heaping unloaded value");
        Self(Repr::Heap {
            kind: desc.kind,
            info: Arc::new(HeapedInfo { hash: desc.hash, size: desc.size }),
        })
    }

    #[inline(always)]
    pub fn is_heaped(&self) -> bool {
        matches!(self.0, Repr::Heap { .. })
    }

    #[inline(always)]
    pub fn is_inline(&self) -> bool {
        !self.is_heaped()
    }

    #[inline]
    pub fn hash(&self) -> U256 {
        match &self.0 {
            Repr::Inline { hash, .. } => *hash,
            Repr::Heap { info, .. } => info.hash,
        }
    }

    #[inline]
    pub fn size(&self) -> U256 {
        match &self.0 {
            Repr::Inline { size, .. } => U256::from(size.get()),
            Repr::Heap { info, .. } => info.size,
        }
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        match &self.0 {
            Repr::Inline { .. } => ValueKind::Tuple,
            Repr::Heap { kind, .. } => *kind,
        }
    }

    pub fn descriptor(&self) -> UnloadedDescriptor {
        UnloadedDescriptor { kind: self.kind(), hash: self.hash(), size: self.size() }
    }

    /// True if both handles are heaped and point at the same `HeapedInfo`.
    pub fn shares_payload(&self, other: &UnloadedValue) -> bool {
        match (&self.0, &other.0) {
            (Repr::Heap { info: a, .. }, Repr::Heap { info: b, .. }) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns true for inline handles (always owned) or heaped handles
    /// holding the only share of their `HeapedInfo`.
    #[inline]
    pub fn is_unique(&self) -> bool {
        match &self.0 {
            Repr::Inline { .. } => true,
            Repr::Heap { info, .. } => Arc::strong_count(info) == 1,
        }
    }
}

impl From<UnloadedDescriptor> for UnloadedValue {
    fn from(desc: UnloadedDescriptor) -> Self {
        Self::new(desc)
    }
}

impl PartialEq for UnloadedValue {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: shared payload means same identity
        if self.shares_payload(other) {
            return true;
        }
        self.kind() == other.kind() && self.size() == other.size() && self.hash() == other.hash()
    }
}

impl Eq for UnloadedValue {}

impl Hash for UnloadedValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor().hash(state);
    }
}

impl fmt::Debug for UnloadedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = if self.is_heaped() { "heap" } else { "inline" };
        write!(
            f,
            "Unloaded({}, hash={:#x}, size={}, {})",
            self.kind(),
            self.hash(),
            self.size(),
            repr
        )
    }
}
