//! Signing identities built in memory.
//!
//! `SecPKCS12Import` would also yield an identity, but it adds the
//! certificate and key to the user's keychain. These helpers import the
//! certificate and key as standalone objects and pair them with the private
//! `SecIdentityCreate` call instead.

use crate::credentials::{KeyKind, KeyRepresentation};
use crate::sys;
use crate::sys::{SecCertificate, SecIdentity, SecKey};
use crate::{Error, Result};
use core_foundation::base::{CFType, TCFType};
use core_foundation::data::CFData;
use core_foundation::dictionary::CFDictionary;
use core_foundation::error::CFError;
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use std::ptr;

/// Pair a certificate with its private key.
///
/// The returned identity holds the single reference `SecIdentityCreate`
/// hands over; dropping it releases that reference.
///
/// # Errors
///
/// Returns [`Error::Identity`] if the platform returns no identity, which
/// is how it reports a certificate and key that do not belong together.
pub fn create_identity(certificate: &SecCertificate, key: &SecKey) -> Result<SecIdentity> {
    // SAFETY: both handles are live for the duration of the call and a null
    // allocator selects the default one.
    let raw = unsafe {
        sys::SecIdentityCreate(
            ptr::null(),
            certificate.as_concrete_TypeRef(),
            key.as_concrete_TypeRef(),
        )
    };
    if raw.is_null() {
        return Err(Error::Identity(
            "platform rejected the certificate/key pair".into(),
        ));
    }
    tracing::debug!("created in-memory signing identity");
    Ok(unsafe { SecIdentity::wrap_under_create_rule(raw) })
}

/// Import a DER-encoded certificate.
pub fn certificate_from_der(der: &[u8]) -> Result<SecCertificate> {
    let data = CFData::from_buffer(der);
    let raw = unsafe { sys::SecCertificateCreateWithData(ptr::null(), data.as_concrete_TypeRef()) };
    if raw.is_null() {
        return Err(Error::Certificate("Could not parse certificate".into()));
    }
    Ok(unsafe { SecCertificate::wrap_under_create_rule(raw) })
}

/// Import a private key from its external representation.
///
/// See [`KeyRepresentation`] for the expected byte layouts.
///
/// # Errors
///
/// Returns [`Error::Platform`] with the platform's description when the
/// import fails with an error object, or [`Error::Certificate`] if it fails
/// without one.
pub fn private_key_from_representation(representation: &KeyRepresentation) -> Result<SecKey> {
    let key_type = match representation.kind {
        KeyKind::Rsa => unsafe { sys::kSecAttrKeyTypeRSA },
        KeyKind::EcPrime256 | KeyKind::EcPrime384 | KeyKind::EcPrime521 => unsafe {
            sys::kSecAttrKeyTypeECSECPrimeRandom
        },
    };

    let pairs: [(CFString, CFType); 3] = unsafe {
        [
            (
                CFString::wrap_under_get_rule(sys::kSecAttrKeyType),
                CFString::wrap_under_get_rule(key_type).as_CFType(),
            ),
            (
                CFString::wrap_under_get_rule(sys::kSecAttrKeyClass),
                CFString::wrap_under_get_rule(sys::kSecAttrKeyClassPrivate).as_CFType(),
            ),
            (
                CFString::wrap_under_get_rule(sys::kSecAttrKeySizeInBits),
                CFNumber::from(representation.bits as i64).as_CFType(),
            ),
        ]
    };
    let attributes = CFDictionary::from_CFType_pairs(&pairs);
    let data = CFData::from_buffer(representation.bytes());

    let mut error: sys::CFErrorRef = ptr::null_mut();
    let raw = unsafe {
        sys::SecKeyCreateWithData(
            data.as_concrete_TypeRef(),
            attributes.as_concrete_TypeRef(),
            &mut error,
        )
    };

    // libsecurity returns errors as owned (+1)
    if !error.is_null() {
        let error = unsafe { CFError::wrap_under_create_rule(error) };
        if !raw.is_null() {
            drop(unsafe { SecKey::wrap_under_create_rule(raw) });
        }
        return Err(Error::Platform(error.description().to_string()));
    }
    if raw.is_null() {
        return Err(Error::Certificate("Failed to parse private key".into()));
    }
    Ok(unsafe { SecKey::wrap_under_create_rule(raw) })
}

/// The certificate half of an identity.
pub fn identity_certificate(identity: &SecIdentity) -> Result<SecCertificate> {
    let mut raw: sys::SecCertificateRef = ptr::null();
    crate::status::check(unsafe {
        sys::SecIdentityCopyCertificate(identity.as_concrete_TypeRef(), &mut raw)
    })?;
    Ok(unsafe { SecCertificate::wrap_under_create_rule(raw) })
}
