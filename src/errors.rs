//! Error types.

/// Alias for [`core::result::Result`] with the `rsa-setup-proofs` crate's
/// [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Decryption error.
    Decryption,

    /// Number of primes must be 2 or greater.
    NprimesTooSmall,

    /// Too few primes of a given length to generate an RSA key.
    TooFewPrimes,

    /// Invalid prime value.
    InvalidPrime,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid exponent.
    InvalidExponent,

    /// Modulus too large.
    ModulusTooLarge,

    /// Public exponent too small.
    PublicExponentTooSmall,

    /// Public exponent too large.
    PublicExponentTooLarge,

    /// PKCS#1 error.
    Pkcs1(pkcs1::Error),

    /// PKCS#8 error.
    Pkcs8(pkcs8::Error),

    /// Internal error.
    Internal,

    /// Invalid padding length.
    InvalidPadLen,

    /// A negative integer was given to an octet-string encoder.
    NegativeInput,

    /// Integer does not fit in the requested number of octets.
    EncodingTooShort,

    /// Declared key size does not match the bit length of the modulus.
    KeySizeMismatch,

    /// Modulus is unsuitable for the requested proof parameters.
    BadModulus,

    /// A bounded sampling loop ran out of candidates.
    SearchExhausted,

    /// Proof setup parameters are out of range.
    InvalidSetup,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Decryption => write!(f, "decryption error"),
            Error::NprimesTooSmall => write!(f, "nprimes must be >= 2"),
            Error::TooFewPrimes => {
                write!(f, "too few primes of given length to generate an RSA key")
            }
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::ModulusTooLarge => write!(f, "modulus too large"),
            Error::PublicExponentTooSmall => write!(f, "public exponent too small"),
            Error::PublicExponentTooLarge => write!(f, "public exponent too large"),
            Error::Pkcs1(err) => write!(f, "{}", err),
            Error::Pkcs8(err) => write!(f, "{}", err),
            Error::Internal => write!(f, "internal error"),
            Error::InvalidPadLen => write!(f, "invalid padding length"),
            Error::NegativeInput => write!(f, "negative integer cannot be octet encoded"),
            Error::EncodingTooShort => write!(f, "integer too large for encoding length"),
            Error::KeySizeMismatch => write!(f, "key size does not match modulus bit length"),
            Error::BadModulus => write!(f, "modulus unsuitable for proof parameters"),
            Error::SearchExhausted => write!(f, "candidate search exhausted"),
            Error::InvalidSetup => write!(f, "invalid proof setup parameters"),
        }
    }
}

impl From<pkcs1::Error> for Error {
    fn from(err: pkcs1::Error) -> Error {
        Error::Pkcs1(err)
    }
}

impl From<pkcs8::Error> for Error {
    fn from(err: pkcs8::Error) -> Error {
        Error::Pkcs8(err)
    }
}

impl From<spki::Error> for Error {
    fn from(err: spki::Error) -> Error {
        Error::Pkcs8(pkcs8::Error::PublicKey(err))
    }
}
