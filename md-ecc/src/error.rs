//! Error types.

use core::fmt;

/// ECC driver errors.
///
/// Each variant corresponds to one of the status codes reported by the
/// accelerator firmware, plus [`Error::Timeout`] for a poll budget that ran
/// out and [`Error::SignatureMismatch`] for a well-formed signature that does
/// not verify.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Generic failure (`MD_ERROR`).
    Failed,

    /// Invalid argument: all-zero point, scalar or signature component out of
    /// `[1, n-1]`, or malformed encoding (`ECC_ERR_BAD_PARAMETER`).
    BadParameter,

    /// The accelerator raised its error flag after a primitive operation
    /// (`ECC_ERR_HWSTA`).
    HardwareStatus,

    /// The result of the operation is the point at infinity
    /// (`ECC_WARN_POINT_AT_INFINITY`).
    ///
    /// Not necessarily a failure: public key validation expects it when
    /// multiplying by the group order.
    PointAtInfinity,

    /// The point does not satisfy the curve equation (`ECC_POINT_INVALID`).
    PointInvalid,

    /// The recomputed `r` of an ECDSA signature does not match.
    SignatureMismatch,

    /// The accelerator did not report completion within the poll budget.
    Timeout,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::Failed => "ecc operation failed",
            Error::BadParameter => "bad parameter",
            Error::HardwareStatus => "ecc engine reported an error status",
            Error::PointAtInfinity => "result is the point at infinity",
            Error::PointInvalid => "point is not on the curve",
            Error::SignatureMismatch => "signature verification failed",
            Error::Timeout => "timed out waiting for the ecc engine",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
