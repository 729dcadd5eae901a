//! Static code inspection and validation (`SecStaticCode.h`, plus the
//! signing-information and requirement calls from `SecCode.h`/`SecRequirement.h`).

use super::base::*;

#[link(name = "Security", kind = "framework")]
extern "C" {
    pub static kSecCodeInfoIdentifier: CFStringRef;
    pub static kSecCodeInfoTeamIdentifier: CFStringRef;
    pub static kSecCodeInfoEntitlements: CFStringRef;
    pub static kSecCodeInfoEntitlementsDict: CFStringRef;
    pub static kSecCodeInfoFormat: CFStringRef;
    pub static kSecCodeInfoMainExecutable: CFStringRef;

    pub fn SecStaticCodeCreateWithPath(
        path: CFURLRef,
        flags: SecCSFlags,
        static_code: *mut SecStaticCodeRef,
    ) -> OSStatus;

    pub fn SecStaticCodeCheckValidity(
        static_code: SecStaticCodeRef,
        flags: SecCSFlags,
        requirement: SecRequirementRef,
    ) -> OSStatus;

    pub fn SecStaticCodeCheckValidityWithErrors(
        static_code: SecStaticCodeRef,
        flags: SecCSFlags,
        requirement: SecRequirementRef,
        errors: *mut CFErrorRef,
    ) -> OSStatus;

    /// Accepts both `SecStaticCodeRef` and `SecCodeRef`.
    pub fn SecCodeCopySigningInformation(
        code: SecStaticCodeRef,
        flags: SecCSFlags,
        information: *mut CFDictionaryRef,
    ) -> OSStatus;

    pub fn SecRequirementCreateWithString(
        text: CFStringRef,
        flags: SecCSFlags,
        requirement: *mut SecRequirementRef,
    ) -> OSStatus;
}
