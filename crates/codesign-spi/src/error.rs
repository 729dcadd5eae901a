//! Error types for codesign-spi operations.
//!
//! This module defines the [`enum@Error`] enum covering credential loading,
//! entitlements handling, and failures reported by the platform security
//! library.
//!
//! # See Also
//!
//! - [`crate::Result`] - Convenience type alias using this error
//! - [`crate::status::check`] - Turns an `OSStatus` into this error

use thiserror::Error;

/// Error type for codesign-spi operations.
///
/// All public functions in this crate return [`crate::Result<T>`], which uses this error type.
///
/// # Examples
///
/// ```no_run
/// use codesign_spi::{Error, SigningCredentials};
///
/// let p12 = std::fs::read("identity.p12")?;
/// match SigningCredentials::from_p12(&p12, "password") {
///     Ok(creds) => println!("Team: {:?}", creds.team_id),
///     Err(Error::InvalidPassword) => eprintln!("Wrong password"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform security library returned a non-success `OSStatus`.
    ///
    /// `message` is the platform's description of the code when one is
    /// available.
    #[error("Security error {code}: {message}")]
    Status {
        /// Raw `OSStatus` value.
        code: i32,
        /// Human readable description.
        message: String,
    },

    /// The platform returned an owned `CFError` alongside a failure.
    #[error("Platform error: {0}")]
    Platform(String),

    /// The platform refused to pair the certificate and private key.
    #[error("Failed to create signing identity: {0}")]
    Identity(String),

    /// Invalid or malformed certificate or private key.
    #[error("Invalid certificate: {0}")]
    Certificate(String),

    /// Incorrect password for a PKCS#12 container.
    #[error("Invalid password for PKCS#12")]
    InvalidPassword,

    /// The private key does not belong to the certificate.
    ///
    /// Checked before anything is handed to the platform, which would
    /// otherwise fail identity creation without a useful diagnostic.
    #[error("Private key does not match certificate public key")]
    KeyMismatch,

    /// Required credentials were not supplied.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Malformed entitlements blob or missing entitlements.
    #[error("Invalid entitlements: {0}")]
    Entitlements(String),

    /// Property list parsing or serialization failed.
    #[error("Plist error: {0}")]
    Plist(#[from] plist::Error),

    /// The operation needs the platform security library.
    ///
    /// Returned on targets without `Security.framework`.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = Error::Status {
            code: -67062,
            message: "code object is not signed at all".into(),
        };
        assert_eq!(
            err.to_string(),
            "Security error -67062: code object is not signed at all"
        );
    }

    #[test]
    fn test_unsupported_display() {
        let err = Error::Unsupported("Code signing");
        assert_eq!(err.to_string(), "Code signing is not supported on this platform");
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
