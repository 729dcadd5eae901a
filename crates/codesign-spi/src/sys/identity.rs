//! Identity creation (`SecIdentityPriv.h`) and the certificate/key imports
//! that feed it.

use super::base::*;
use std::ffi::c_void;

#[link(name = "Security", kind = "framework")]
extern "C" {
    /// Pairs a certificate with its private key.
    ///
    /// Returns a retained identity, or null if the platform rejects the pair.
    /// The caller owns exactly one release.
    pub fn SecIdentityCreate(
        allocator: CFAllocatorRef,
        certificate: SecCertificateRef,
        private_key: SecKeyRef,
    ) -> SecIdentityRef;

    pub fn SecIdentityCopyCertificate(
        identity: SecIdentityRef,
        certificate: *mut SecCertificateRef,
    ) -> OSStatus;

    pub fn SecCertificateCreateWithData(
        allocator: CFAllocatorRef,
        data: CFDataRef,
    ) -> SecCertificateRef;

    /// libsecurity returns `error` as an owned (+1) reference.
    pub fn SecKeyCreateWithData(
        key_data: CFDataRef,
        attributes: CFDictionaryRef,
        error: *mut CFErrorRef,
    ) -> SecKeyRef;

    pub fn SecCopyErrorMessageString(status: OSStatus, reserved: *mut c_void) -> CFStringRef;

    pub static kSecAttrKeyType: CFStringRef;
    pub static kSecAttrKeyTypeRSA: CFStringRef;
    pub static kSecAttrKeyTypeECSECPrimeRandom: CFStringRef;
    pub static kSecAttrKeyClass: CFStringRef;
    pub static kSecAttrKeyClassPrivate: CFStringRef;
    pub static kSecAttrKeySizeInBits: CFStringRef;
}
