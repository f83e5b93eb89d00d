//! Stack growth for deeply nested terms.

/// Grow the stack before the remaining headroom drops below the red zone.
const RED_ZONE: usize = 100 * 1024;

/// How much stack to allocate per growth.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if it is close to exhausted.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
