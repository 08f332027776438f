use core::fmt;
use core::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next identity handed out by [`Id::fresh`]. Starts at 1 so the value is never zero.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Compact, stable identity token.
///
/// - `u64` so a long-running process never wraps
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
///
/// Two entities are "the same" exactly when their ids are equal, no matter
/// how similar their contents look.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU64);

impl Id {
    /// Allocate a new process-unique id.
    pub fn fresh() -> Self {
        let raw = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        // raw starts at 1 and only grows
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u64 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type SymbolId = Id;
