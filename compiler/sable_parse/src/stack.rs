//! Stack guard for deeply nested input.
//!
//! The grammar is recursive descent; a pathological expression like ten
//! thousand nested parens would otherwise blow the thread stack.

const RED_ZONE: usize = 100 * 1024; // 100KB
const STACK_PER_RECURSION: usize = 1024 * 1024; // 1MB

/// Grow the stack before recursing if the remaining space is inside the
/// red zone.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
