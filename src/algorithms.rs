//! Useful algorithms.

pub(crate) mod codec;
pub(crate) mod generate;
pub(crate) mod mgf;
pub(crate) mod pad;
pub(crate) mod rsa;
pub(crate) mod sieve;

/// Upper bound on the number of candidates any sampling loop in this crate
/// will try before giving up with [`Error::SearchExhausted`].
///
/// [`Error::SearchExhausted`]: crate::Error::SearchExhausted
pub const CRYPTOGRAPHIC_RETRY_MAX: usize = 500;
