//! Static code and running code references.
//!
//! [`StaticCode`] wraps code on disk (a bundle or a Mach-O file) and
//! [`Code`] wraps a running guest, starting from the calling process.

use crate::entitlements::EntitlementsBlob;
use crate::signer::SigningInformation;
use crate::status::{check, check_with_error};
use crate::sys;
use crate::sys::{SecCSFlags, SecCode, SecStaticCode};
use crate::{Error, Result};
use core_foundation::base::{CFType, TCFType};
use core_foundation::data::CFData;
use core_foundation::dictionary::CFDictionary;
use core_foundation::string::CFString;
use core_foundation::url::CFURL;
use std::path::Path;
use std::ptr;

/// Signing information dictionary as returned by the platform.
pub type InfoDictionary = CFDictionary<CFString, CFType>;

/// Code on disk.
#[derive(Debug, Clone)]
pub struct StaticCode {
    inner: SecStaticCode,
}

impl StaticCode {
    /// Open the code at `path`.
    pub fn at_path(path: &Path) -> Result<Self> {
        let url = CFURL::from_path(path, path.is_dir()).ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a usable path: {}", path.display()),
            ))
        })?;

        let mut raw: sys::SecStaticCodeRef = ptr::null();
        check(unsafe {
            sys::SecStaticCodeCreateWithPath(
                url.as_concrete_TypeRef(),
                sys::kSecCSDefaultFlags,
                &mut raw,
            )
        })?;
        tracing::debug!(path = %path.display(), "opened static code");

        Ok(Self {
            inner: unsafe { SecStaticCode::wrap_under_create_rule(raw) },
        })
    }

    /// Borrow the underlying handle.
    pub fn as_handle(&self) -> &SecStaticCode {
        &self.inner
    }

    /// Validate the signature, sealed resources and nested code.
    pub fn check_validity(&self, flags: SecCSFlags) -> Result<()> {
        let mut error = ptr::null_mut();
        let status = unsafe {
            sys::SecStaticCodeCheckValidityWithErrors(
                self.inner.as_concrete_TypeRef(),
                flags,
                ptr::null(),
                &mut error,
            )
        };
        check_with_error(status, error)
    }

    /// Copy the signing information dictionary.
    ///
    /// `flags` selects which groups of keys are filled in, for example
    /// `kSecCSSigningInformation | kSecCSRequirementInformation`.
    pub fn copy_information(&self, flags: SecCSFlags) -> Result<InfoDictionary> {
        copy_information(self.inner.as_concrete_TypeRef(), flags)
    }

    /// Identifier, team and entitlements of the signature.
    pub fn signing_information(&self) -> Result<SigningInformation> {
        let info = self.copy_information(
            sys::kSecCSSigningInformation | sys::kSecCSRequirementInformation,
        )?;
        read_signing_information(&info)
    }
}

/// A running guest.
#[derive(Debug, Clone)]
pub struct Code {
    inner: SecCode,
}

impl Code {
    /// The code of the calling process.
    pub fn current() -> Result<Self> {
        let mut raw: sys::SecCodeRef = ptr::null();
        check(unsafe { sys::SecCodeCopySelf(sys::kSecCSDefaultFlags, &mut raw) })?;
        Ok(Self {
            inner: unsafe { SecCode::wrap_under_create_rule(raw) },
        })
    }

    /// Borrow the underlying handle.
    pub fn as_handle(&self) -> &SecCode {
        &self.inner
    }

    /// The on-disk code this guest was loaded from.
    pub fn static_code(&self) -> Result<StaticCode> {
        let mut raw: sys::SecStaticCodeRef = ptr::null();
        check(unsafe {
            sys::SecCodeCopyStaticCode(
                self.inner.as_concrete_TypeRef(),
                sys::kSecCSDefaultFlags,
                &mut raw,
            )
        })?;
        Ok(StaticCode {
            inner: unsafe { SecStaticCode::wrap_under_create_rule(raw) },
        })
    }

    /// Dynamic validity check of the running code.
    pub fn check_validity(&self, flags: SecCSFlags) -> Result<()> {
        let mut error = ptr::null_mut();
        let status = unsafe {
            sys::SecCodeCheckValidityWithErrors(
                self.inner.as_concrete_TypeRef(),
                flags,
                ptr::null(),
                &mut error,
            )
        };
        check_with_error(status, error)
    }

    /// Dynamic status bits (`kSecCodeStatus*`).
    pub fn status(&self) -> Result<sys::SecCodeStatus> {
        let mut status: sys::SecCodeStatus = 0;
        check(unsafe {
            sys::SecCodeGetStatus(
                self.inner.as_concrete_TypeRef(),
                sys::kSecCSDefaultFlags,
                &mut status,
            )
        })?;
        Ok(status)
    }

    /// Whether the kernel still considers this code validly signed.
    pub fn is_valid(&self) -> Result<bool> {
        Ok(self.status()? & sys::kSecCodeStatusValid != 0)
    }

    /// Copy the signing information dictionary.
    pub fn copy_information(&self, flags: SecCSFlags) -> Result<InfoDictionary> {
        copy_information(self.inner.as_concrete_TypeRef(), flags)
    }
}

fn copy_information(code: sys::SecStaticCodeRef, flags: SecCSFlags) -> Result<InfoDictionary> {
    let mut raw: sys::CFDictionaryRef = ptr::null();
    check(unsafe { sys::SecCodeCopySigningInformation(code, flags, &mut raw) })?;
    if raw.is_null() {
        return Err(Error::Platform("no signing information returned".into()));
    }
    Ok(unsafe { InfoDictionary::wrap_under_create_rule(raw) })
}

fn find_string(info: &InfoDictionary, key: sys::CFStringRef) -> Option<String> {
    let key = unsafe { CFString::wrap_under_get_rule(key) };
    info.find(&key)
        .and_then(|value| value.downcast::<CFString>())
        .map(|value| value.to_string())
}

fn read_signing_information(info: &InfoDictionary) -> Result<SigningInformation> {
    let identifier = find_string(info, unsafe { sys::kSecCodeInfoIdentifier });
    let team_id = find_string(info, unsafe { sys::kSecCodeInfoTeamIdentifier });

    let key = unsafe { CFString::wrap_under_get_rule(sys::kSecCodeInfoEntitlements) };
    let entitlements = match info.find(&key) {
        Some(value) => {
            let data = value.downcast::<CFData>().ok_or_else(|| {
                Error::Entitlements("entitlements entry is not data".into())
            })?;
            let blob = EntitlementsBlob::from_blob(data.bytes().to_vec())?;
            Some(blob.entitlements().to_vec())
        }
        None => None,
    };

    Ok(SigningInformation {
        identifier,
        team_id,
        entitlements,
    })
}
