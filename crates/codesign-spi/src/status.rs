//! `OSStatus` handling for Security framework calls.
//!
//! Every SPI entry point reports failure through an `OSStatus`. [`check`]
//! converts those into [`Error::Status`] carrying the platform's own message
//! where one exists.

use crate::{Error, Result};

/// Status code returned by Security framework functions.
pub type OsStatus = i32;

/// No error.
pub const ERR_SEC_SUCCESS: OsStatus = 0;
/// Function or operation not implemented.
pub const ERR_SEC_UNIMPLEMENTED: OsStatus = -4;
/// One or more parameters passed to a function were not valid.
pub const ERR_SEC_PARAM: OsStatus = -50;
/// Failed to allocate memory.
pub const ERR_SEC_ALLOCATE: OsStatus = -108;
/// The user name or passphrase you entered is not correct.
pub const ERR_SEC_AUTH_FAILED: OsStatus = -25293;
/// The specified item could not be found in the keychain.
pub const ERR_SEC_ITEM_NOT_FOUND: OsStatus = -25300;

pub const ERR_SEC_CS_UNIMPLEMENTED: OsStatus = -67072;
pub const ERR_SEC_CS_INVALID_OBJECT_REF: OsStatus = -67071;
pub const ERR_SEC_CS_INVALID_FLAGS: OsStatus = -67070;
pub const ERR_SEC_CS_OBJECT_REQUIRED: OsStatus = -67069;
pub const ERR_SEC_CS_STATIC_CODE_NOT_FOUND: OsStatus = -67068;
pub const ERR_SEC_CS_UNSUPPORTED_GUEST_ATTRIBUTES: OsStatus = -67067;
pub const ERR_SEC_CS_INVALID_ATTRIBUTE_VALUES: OsStatus = -67066;
pub const ERR_SEC_CS_NO_SUCH_CODE: OsStatus = -67065;
pub const ERR_SEC_CS_MULTIPLE_GUESTS: OsStatus = -67064;
pub const ERR_SEC_CS_GUEST_INVALID: OsStatus = -67063;
pub const ERR_SEC_CS_UNSIGNED: OsStatus = -67062;
pub const ERR_SEC_CS_SIGNATURE_FAILED: OsStatus = -67061;
pub const ERR_SEC_CS_SIGNATURE_NOT_VERIFIABLE: OsStatus = -67060;
pub const ERR_SEC_CS_SIGNATURE_UNSUPPORTED: OsStatus = -67059;
pub const ERR_SEC_CS_BAD_DICTIONARY_FORMAT: OsStatus = -67058;
pub const ERR_SEC_CS_RESOURCES_NOT_SEALED: OsStatus = -67057;
pub const ERR_SEC_CS_RESOURCES_NOT_FOUND: OsStatus = -67056;
pub const ERR_SEC_CS_RESOURCES_INVALID: OsStatus = -67055;
pub const ERR_SEC_CS_BAD_RESOURCE: OsStatus = -67054;
pub const ERR_SEC_CS_RESOURCE_RULES_INVALID: OsStatus = -67053;
pub const ERR_SEC_CS_REQ_INVALID: OsStatus = -67052;
pub const ERR_SEC_CS_REQ_UNSUPPORTED: OsStatus = -67051;
pub const ERR_SEC_CS_REQ_FAILED: OsStatus = -67050;
pub const ERR_SEC_CS_BAD_OBJECT_FORMAT: OsStatus = -67049;
pub const ERR_SEC_CS_INTERNAL_ERROR: OsStatus = -67048;
pub const ERR_SEC_CS_HOST_REJECT: OsStatus = -67047;
pub const ERR_SEC_CS_NOT_A_HOST: OsStatus = -67046;
pub const ERR_SEC_CS_SIGNATURE_INVALID: OsStatus = -67045;

/// Converts a status code into a [`Result`].
///
/// `errSecSuccess` maps to `Ok(())`; anything else becomes
/// [`Error::Status`].
///
/// # Examples
///
/// ```
/// use codesign_spi::status::{check, ERR_SEC_CS_UNSIGNED};
///
/// assert!(check(0).is_ok());
/// assert!(check(ERR_SEC_CS_UNSIGNED).is_err());
/// ```
pub fn check(code: OsStatus) -> Result<()> {
    if code == ERR_SEC_SUCCESS {
        return Ok(());
    }
    Err(Error::Status {
        code,
        message: message(code),
    })
}

/// Returns a description of `code`.
///
/// Prefers the platform's `SecCopyErrorMessageString` and falls back to the
/// built-in table, then to a generic `OSStatus <code>` string.
pub fn message(code: OsStatus) -> String {
    #[cfg(target_vendor = "apple")]
    {
        if let Some(message) = platform_message(code) {
            return message;
        }
    }
    describe(code)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("OSStatus {code}"))
}

/// Built-in descriptions for the codes this crate is likely to see.
pub fn describe(code: OsStatus) -> Option<&'static str> {
    let text = match code {
        ERR_SEC_SUCCESS => "No error.",
        ERR_SEC_UNIMPLEMENTED => "Function or operation not implemented.",
        ERR_SEC_PARAM => "One or more parameters passed to a function were not valid.",
        ERR_SEC_ALLOCATE => "Failed to allocate memory.",
        ERR_SEC_AUTH_FAILED => "The user name or passphrase you entered is not correct.",
        ERR_SEC_ITEM_NOT_FOUND => "The specified item could not be found in the keychain.",
        ERR_SEC_CS_UNIMPLEMENTED => "unimplemented code signing feature",
        ERR_SEC_CS_INVALID_OBJECT_REF => "invalid API object reference",
        ERR_SEC_CS_INVALID_FLAGS => "invalid or inappropriate API flag(s) specified",
        ERR_SEC_CS_OBJECT_REQUIRED => "a required pointer argument was NULL",
        ERR_SEC_CS_STATIC_CODE_NOT_FOUND => "cannot find code object on disk",
        ERR_SEC_CS_UNSUPPORTED_GUEST_ATTRIBUTES => "cannot locate guests using this attribute set",
        ERR_SEC_CS_INVALID_ATTRIBUTE_VALUES => "given attribute values are invalid",
        ERR_SEC_CS_NO_SUCH_CODE => "host has no guest with the requested attributes",
        ERR_SEC_CS_MULTIPLE_GUESTS => "ambiguous guest specification (host has multiple guests with these attribute values)",
        ERR_SEC_CS_GUEST_INVALID => "code identity has been invalidated",
        ERR_SEC_CS_UNSIGNED => "code object is not signed at all",
        ERR_SEC_CS_SIGNATURE_FAILED => "invalid signature (code or signature have been modified)",
        ERR_SEC_CS_SIGNATURE_NOT_VERIFIABLE => "the code cannot be read by the verifier (file system permissions etc.)",
        ERR_SEC_CS_SIGNATURE_UNSUPPORTED => "unsupported type or version of signature",
        ERR_SEC_CS_BAD_DICTIONARY_FORMAT => "a required plist file or resource is malformed",
        ERR_SEC_CS_RESOURCES_NOT_SEALED => "resource envelope is obsolete (version 1 signature)",
        ERR_SEC_CS_RESOURCES_NOT_FOUND => "code has no resources but signature indicates they must be present",
        ERR_SEC_CS_RESOURCES_INVALID => "the sealed resource directory is invalid",
        ERR_SEC_CS_BAD_RESOURCE => "a sealed resource is missing or invalid",
        ERR_SEC_CS_RESOURCE_RULES_INVALID => "invalid resource specification rule(s)",
        ERR_SEC_CS_REQ_INVALID => "invalid or corrupted code requirement(s)",
        ERR_SEC_CS_REQ_UNSUPPORTED => "unsupported type or version of code requirement(s)",
        ERR_SEC_CS_REQ_FAILED => "code failed to satisfy specified code requirement(s)",
        ERR_SEC_CS_BAD_OBJECT_FORMAT => "object file format unrecognized, invalid, or unsuitable",
        ERR_SEC_CS_INTERNAL_ERROR => "internal error in Code Signing subsystem",
        ERR_SEC_CS_HOST_REJECT => "code rejected its host",
        ERR_SEC_CS_NOT_A_HOST => "attempt to specify guest of code that is not a host",
        ERR_SEC_CS_SIGNATURE_INVALID => "invalid signature (code or signature have been modified)",
        _ => return None,
    };
    Some(text)
}

/// Like [`check`], for calls that also report an owned `CFError`.
///
/// An error object takes precedence over the status code and is released
/// here.
#[cfg(target_vendor = "apple")]
pub(crate) fn check_with_error(
    code: OsStatus,
    error: core_foundation::error::CFErrorRef,
) -> Result<()> {
    use core_foundation::base::TCFType;
    use core_foundation::error::CFError;

    if !error.is_null() {
        // SAFETY: the *WithErrors calls return their error retained.
        let error = unsafe { CFError::wrap_under_create_rule(error) };
        return Err(Error::Platform(error.description().to_string()));
    }
    check(code)
}

#[cfg(target_vendor = "apple")]
fn platform_message(code: OsStatus) -> Option<String> {
    use core_foundation::base::TCFType;
    use core_foundation::string::CFString;

    // SAFETY: SecCopyErrorMessageString accepts any status and a null
    // reserved pointer; a non-null result is returned retained.
    let raw = unsafe { crate::sys::SecCopyErrorMessageString(code, std::ptr::null_mut()) };
    if raw.is_null() {
        return None;
    }
    let message = unsafe { CFString::wrap_under_create_rule(raw) };
    Some(message.to_string())
}
