//! Opaque handle types and code signing flags shared by the SPI groups.
//!
//! Each handle is a reference-counted Core Foundation object. The
//! `declare_TCFType!` wrappers release their reference exactly once on drop;
//! wrap values returned by `*Create*`/`*Copy*` calls with
//! `TCFType::wrap_under_create_rule` so no extra retain is taken.

use core_foundation::base::{CFTypeID, TCFType};
use core_foundation::{declare_TCFType, impl_CFTypeDescription, impl_TCFType};

pub use core_foundation::base::{CFAllocatorRef, OSStatus};
pub use core_foundation::data::CFDataRef;
pub use core_foundation::dictionary::CFDictionaryRef;
pub use core_foundation::error::CFErrorRef;
pub use core_foundation::string::CFStringRef;
pub use core_foundation::url::CFURLRef;

#[repr(C)]
pub struct __SecCertificate {
    _private: [u8; 0],
}

#[repr(C)]
pub struct __SecKey {
    _private: [u8; 0],
}

#[repr(C)]
pub struct __SecIdentity {
    _private: [u8; 0],
}

#[repr(C)]
pub struct __SecCode {
    _private: [u8; 0],
}

#[repr(C)]
pub struct __SecCodeSigner {
    _private: [u8; 0],
}

#[repr(C)]
pub struct __SecRequirement {
    _private: [u8; 0],
}

pub type SecCertificateRef = *const __SecCertificate;
pub type SecKeyRef = *const __SecKey;
pub type SecIdentityRef = *const __SecIdentity;
/// A running guest (`SecCode`).
pub type SecCodeRef = *const __SecCode;
/// Code on disk. Shares its runtime class with `SecCode`.
pub type SecStaticCodeRef = *const __SecCode;
pub type SecCodeSignerRef = *const __SecCodeSigner;
pub type SecRequirementRef = *const __SecRequirement;

#[link(name = "Security", kind = "framework")]
extern "C" {
    pub fn SecCertificateGetTypeID() -> CFTypeID;
    pub fn SecKeyGetTypeID() -> CFTypeID;
    pub fn SecIdentityGetTypeID() -> CFTypeID;
    pub fn SecCodeGetTypeID() -> CFTypeID;
    pub fn SecStaticCodeGetTypeID() -> CFTypeID;
    pub fn SecCodeSignerGetTypeID() -> CFTypeID;
    pub fn SecRequirementGetTypeID() -> CFTypeID;
}

declare_TCFType!(SecCertificate, SecCertificateRef);
impl_TCFType!(SecCertificate, SecCertificateRef, SecCertificateGetTypeID);
impl_CFTypeDescription!(SecCertificate);

declare_TCFType!(SecKey, SecKeyRef);
impl_TCFType!(SecKey, SecKeyRef, SecKeyGetTypeID);
impl_CFTypeDescription!(SecKey);

declare_TCFType!(SecIdentity, SecIdentityRef);
impl_TCFType!(SecIdentity, SecIdentityRef, SecIdentityGetTypeID);
impl_CFTypeDescription!(SecIdentity);

declare_TCFType!(SecCode, SecCodeRef);
impl_TCFType!(SecCode, SecCodeRef, SecCodeGetTypeID);
impl_CFTypeDescription!(SecCode);

declare_TCFType!(SecStaticCode, SecStaticCodeRef);
impl_TCFType!(SecStaticCode, SecStaticCodeRef, SecStaticCodeGetTypeID);
impl_CFTypeDescription!(SecStaticCode);

declare_TCFType!(SecCodeSigner, SecCodeSignerRef);
impl_TCFType!(SecCodeSigner, SecCodeSignerRef, SecCodeSignerGetTypeID);
impl_CFTypeDescription!(SecCodeSigner);

declare_TCFType!(SecRequirement, SecRequirementRef);
impl_TCFType!(SecRequirement, SecRequirementRef, SecRequirementGetTypeID);
impl_CFTypeDescription!(SecRequirement);

/// Flags accepted by the code signing calls (`SecCSFlags`).
pub type SecCSFlags = u32;

pub const kSecCSDefaultFlags: SecCSFlags = 0;

// Validity checks
pub const kSecCSConsiderExpiration: SecCSFlags = 1 << 31;
pub const kSecCSEnforceRevocationChecks: SecCSFlags = 1 << 30;
pub const kSecCSNoNetworkAccess: SecCSFlags = 1 << 29;
pub const kSecCSReportProgress: SecCSFlags = 1 << 28;
pub const kSecCSCheckTrustedAnchors: SecCSFlags = 1 << 27;
pub const kSecCSQuickCheck: SecCSFlags = 1 << 26;
pub const kSecCSApplyEmbeddedPolicy: SecCSFlags = 1 << 25;

// Static validity checks
pub const kSecCSCheckAllArchitectures: SecCSFlags = 1 << 0;
pub const kSecCSDoNotValidateExecutable: SecCSFlags = 1 << 1;
pub const kSecCSDoNotValidateResources: SecCSFlags = 1 << 2;
pub const kSecCSBasicValidateOnly: SecCSFlags =
    kSecCSDoNotValidateExecutable | kSecCSDoNotValidateResources;
pub const kSecCSCheckNestedCode: SecCSFlags = 1 << 3;
pub const kSecCSStrictValidate: SecCSFlags = 1 << 4;

// SecCodeCopySigningInformation
pub const kSecCSInternalInformation: SecCSFlags = 1 << 0;
pub const kSecCSSigningInformation: SecCSFlags = 1 << 1;
pub const kSecCSRequirementInformation: SecCSFlags = 1 << 2;
pub const kSecCSDynamicInformation: SecCSFlags = 1 << 3;
pub const kSecCSContentInformation: SecCSFlags = 1 << 4;
pub const kSecCSSkipResourceDirectory: SecCSFlags = 1 << 5;
