//! Signing code with in-memory credentials.
//!
//! [`CodesignSigner`] drives the platform code signer: it imports the
//! certificate and key, pairs them with `SecIdentityCreate`, and asks
//! `SecCodeSigner` to sign a path. The helpers [`analyze`],
//! [`signing_information`] and [`verify`] read a signature back.
//!
//! On targets without `Security.framework` every platform operation returns
//! [`Error::Unsupported`](crate::Error::Unsupported).
//!
//! # Examples
//!
//! ```no_run
//! use codesign_spi::{CodesignSigner, Signer, SigningCredentials};
//! use std::path::Path;
//!
//! let p12 = std::fs::read("identity.p12")?;
//! let credentials = SigningCredentials::from_p12(&p12, "password")?;
//! let entitlements = std::fs::read("app.entitlements")?;
//!
//! CodesignSigner::new(credentials)
//!     .codesign(Path::new("Example.app"), Some(entitlements.as_slice()))?;
//! # Ok::<(), codesign_spi::Error>(())
//! ```

use crate::credentials::SigningCredentials;
use crate::Result;
use std::path::Path;

/// Something that can code-sign a path.
pub trait Signer {
    /// Sign the code at `path`, embedding `entitlements` (an XML plist) if given.
    fn codesign(&self, path: &Path, entitlements: Option<&[u8]>) -> Result<()>;
}

/// What a signature says about the signed code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningInformation {
    /// Code signing identifier, usually the bundle identifier.
    pub identifier: Option<String>,
    /// Team identifier of the signing certificate.
    pub team_id: Option<String>,
    /// Embedded entitlements payload (XML plist), without its blob header.
    pub entitlements: Option<Vec<u8>>,
}

/// Signer backed by the platform's `SecCodeSigner`.
pub struct CodesignSigner {
    credentials: SigningCredentials,
    identifier: Option<String>,
}

impl CodesignSigner {
    /// Create a signer for the given credentials.
    pub fn new(credentials: SigningCredentials) -> Self {
        Self {
            credentials,
            identifier: None,
        }
    }

    /// Override the code signing identifier (`kSecCodeSignerIdentifier`).
    ///
    /// By default the platform derives it from the bundle.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// The credentials this signer signs with.
    pub fn credentials(&self) -> &SigningCredentials {
        &self.credentials
    }
}

impl Signer for CodesignSigner {
    fn codesign(&self, path: &Path, entitlements: Option<&[u8]>) -> Result<()> {
        tracing::info!(
            path = %path.display(),
            team_id = self.credentials.team_id.as_deref().unwrap_or("-"),
            "signing"
        );
        platform::codesign(
            &self.credentials,
            self.identifier.as_deref(),
            path,
            entitlements,
        )
    }
}

/// Read the embedded entitlements (XML plist) of signed code.
///
/// # Errors
///
/// Returns [`Error::Entitlements`](crate::Error::Entitlements) if the
/// signature carries no entitlements.
pub fn analyze(path: &Path) -> Result<Vec<u8>> {
    signing_information(path)?
        .entitlements
        .ok_or_else(|| crate::Error::Entitlements("Could not parse entitlements".into()))
}

/// Read identifier, team and entitlements from the signature at `path`.
pub fn signing_information(path: &Path) -> Result<SigningInformation> {
    platform::signing_information(path)
}

/// Check that the signature at `path` is intact.
pub fn verify(path: &Path) -> Result<()> {
    platform::verify(path)
}

#[cfg(target_vendor = "apple")]
mod platform {
    use super::SigningInformation;
    use crate::code::StaticCode;
    use crate::credentials::SigningCredentials;
    use crate::entitlements::EntitlementsBlob;
    use crate::status::{check, check_with_error};
    use crate::sys;
    use crate::sys::SecCodeSigner;
    use crate::{identity, Result};
    use core_foundation::base::{CFType, TCFType};
    use core_foundation::data::CFData;
    use core_foundation::dictionary::CFDictionary;
    use core_foundation::string::CFString;
    use std::path::Path;
    use std::ptr;

    pub(super) fn codesign(
        credentials: &SigningCredentials,
        identifier: Option<&str>,
        path: &Path,
        entitlements: Option<&[u8]>,
    ) -> Result<()> {
        let certificate = identity::certificate_from_der(&credentials.certificate_der()?)?;
        let key = identity::private_key_from_representation(&credentials.key_representation()?)?;
        let identity = identity::create_identity(&certificate, &key)?;

        let mut options: Vec<(CFString, CFType)> = vec![(
            unsafe { CFString::wrap_under_get_rule(sys::kSecCodeSignerIdentity) },
            identity.as_CFType(),
        )];
        if let Some(entitlements) = entitlements {
            let blob = EntitlementsBlob::from_entitlements(entitlements);
            options.push((
                unsafe { CFString::wrap_under_get_rule(sys::kSecCodeSignerEntitlements) },
                CFData::from_buffer(blob.as_bytes()).as_CFType(),
            ));
        }
        if let Some(identifier) = identifier {
            options.push((
                unsafe { CFString::wrap_under_get_rule(sys::kSecCodeSignerIdentifier) },
                CFString::new(identifier).as_CFType(),
            ));
        }
        if let Some(team_id) = credentials.team_id.as_deref() {
            options.push((
                unsafe { CFString::wrap_under_get_rule(sys::kSecCodeSignerTeamIdentifier) },
                CFString::new(team_id).as_CFType(),
            ));
        }
        let options = CFDictionary::from_CFType_pairs(&options);

        let mut raw_signer: sys::SecCodeSignerRef = ptr::null();
        check(unsafe {
            sys::SecCodeSignerCreate(
                options.as_concrete_TypeRef(),
                sys::kSecCSDefaultFlags,
                &mut raw_signer,
            )
        })?;
        let signer = unsafe { SecCodeSigner::wrap_under_create_rule(raw_signer) };

        let code = StaticCode::at_path(path)?;

        let mut error = ptr::null_mut();
        let status = unsafe {
            sys::SecCodeSignerAddSignatureWithErrors(
                signer.as_concrete_TypeRef(),
                code.as_handle().as_concrete_TypeRef(),
                sys::kSecCSDefaultFlags,
                &mut error,
            )
        };
        check_with_error(status, error)?;

        tracing::debug!(path = %path.display(), "signature added");
        Ok(())
    }

    pub(super) fn signing_information(path: &Path) -> Result<SigningInformation> {
        StaticCode::at_path(path)?.signing_information()
    }

    pub(super) fn verify(path: &Path) -> Result<()> {
        StaticCode::at_path(path)?.check_validity(sys::kSecCSCheckNestedCode)
    }
}

#[cfg(not(target_vendor = "apple"))]
mod platform {
    use super::SigningInformation;
    use crate::credentials::SigningCredentials;
    use crate::{Error, Result};
    use std::path::Path;

    pub(super) fn codesign(
        _credentials: &SigningCredentials,
        _identifier: Option<&str>,
        _path: &Path,
        _entitlements: Option<&[u8]>,
    ) -> Result<()> {
        Err(Error::Unsupported("Code signing"))
    }

    pub(super) fn signing_information(_path: &Path) -> Result<SigningInformation> {
        Err(Error::Unsupported("Reading signing information"))
    }

    pub(super) fn verify(_path: &Path) -> Result<()> {
        Err(Error::Unsupported("Signature verification"))
    }
}
