//! Stack safety for recursive lowering and evaluation.
//!
//! Expression trees are shallow in practice, but a bytecode script is authored
//! data: a chain of nested function blocks can be arbitrarily deep. Two tools
//! live here:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand so deep but
//!   legitimate nesting does not overflow.
//! - [`DepthLimit`] counts nesting explicitly so callers can reject runaway
//!   input with a typed error instead of recursing until memory runs out.
//!
//! # Configuration
//!
//! - **Red zone**: 100KB - if less than this remains, the stack is grown
//! - **Growth size**: 1MB - each growth allocates this much additional space

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// On native targets this uses `stacker::maybe_grow`; on WASM it calls `f`
/// directly.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Returned by [`DepthLimit::enter`] when nesting exceeds the ceiling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    /// The configured ceiling that was hit.
    pub limit: usize,
}

/// Explicit recursion-depth counter.
///
/// Call [`enter`](Self::enter) before descending and [`exit`](Self::exit)
/// after returning. The counter is plain data, so a recursive walker can
/// thread it through `&mut self`.
#[derive(Copy, Clone, Debug)]
pub struct DepthLimit {
    depth: usize,
    limit: usize,
}

impl DepthLimit {
    pub const fn new(limit: usize) -> Self {
        DepthLimit { depth: 0, limit }
    }

    /// Descend one level, failing if the ceiling would be exceeded.
    #[inline]
    pub fn enter(&mut self) -> Result<(), DepthExceeded> {
        if self.depth >= self.limit {
            return Err(DepthExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    /// Ascend one level.
    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current nesting depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Configured ceiling.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }
}
