//! Driver configuration.

/// Engine configuration.
///
/// ```
/// use md_ecc::Config;
///
/// let config = Config::default().poll_limit(10_000).rng_attempts(16);
/// assert_eq!(config.poll_limit, Some(10_000));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Maximum number of `STA` reads per transaction before giving up with
    /// [`Error::Timeout`](crate::Error::Timeout). `None` polls forever.
    pub poll_limit: Option<u32>,

    /// Maximum number of random candidates drawn when sampling a private key
    /// or nonce in `[1, n-1]`.
    pub rng_attempts: u32,
}

impl Config {
    /// Default number of status reads per transaction.
    pub const DEFAULT_POLL_LIMIT: u32 = 1_000_000;

    /// Default number of random candidates.
    pub const DEFAULT_RNG_ATTEMPTS: u32 = 64;

    /// Bound every wait to `polls` status reads.
    pub fn poll_limit(mut self, polls: u32) -> Self {
        self.poll_limit = Some(polls);
        self
    }

    /// Wait for completion without a bound.
    pub fn unbounded(mut self) -> Self {
        self.poll_limit = None;
        self
    }

    /// Number of random candidates to draw before giving up.
    pub fn rng_attempts(mut self, attempts: u32) -> Self {
        self.rng_attempts = attempts;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_limit: Some(Self::DEFAULT_POLL_LIMIT),
            rng_attempts: Self::DEFAULT_RNG_ATTEMPTS,
        }
    }
}
