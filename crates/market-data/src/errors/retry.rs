/// Classification for retry policy.
///
/// Used by callers to decide how to report a provider failure.
///
/// | Class | Meaning |
/// |-------|---------|
/// | `Never` | The request itself is wrong (unknown coin, bad data) |
/// | `WithBackoff` | The provider is unavailable right now, try again later |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol, validation error, or terminal failure.
    Never,

    /// Retry later. Used for rate limiting (429), timeouts, bad gateway
    /// responses and transport errors.
    WithBackoff,
}
