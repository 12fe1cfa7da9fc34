/// Classification for the live tier's retry policy.
///
/// Used to determine how the resolver should respond to errors from the
/// remote provider.
///
/// # Behavior Summary
///
/// | Class | Retry same provider? | Fall through to next tier? |
/// |-------|----------------------|----------------------------|
/// | `WithBackoff` | Yes, while attempts remain | Yes, once attempts run out |
/// | `NextTier` | No | Yes |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Transient transport failure (connection refused, timeout, 5xx).
    ///
    /// Another attempt after a backoff may succeed. When the attempt budget
    /// is exhausted the resolver falls through to the snapshot tier.
    WithBackoff,

    /// The provider answered, but the answer is unusable (unparseable body
    /// or no rows). Asking again will give the same answer, so the resolver
    /// moves straight to the next tier.
    NextTier,
}
