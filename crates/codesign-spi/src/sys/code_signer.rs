//! Code signer SPI (`SecCodeSigner.h`).

use super::base::*;

// Signer flags
pub const kSecCSRemoveSignature: SecCSFlags = 1 << 0;
pub const kSecCSSignPreserveSignature: SecCSFlags = 1 << 1;
pub const kSecCSSignNestedCode: SecCSFlags = 1 << 2;
pub const kSecCSSignOpaque: SecCSFlags = 1 << 3;
pub const kSecCSSignV1: SecCSFlags = 1 << 4;
pub const kSecCSSignNoV1: SecCSFlags = 1 << 5;
pub const kSecCSSignBundleRoot: SecCSFlags = 1 << 6;
pub const kSecCSSignStrictPreflight: SecCSFlags = 1 << 7;

#[link(name = "Security", kind = "framework")]
extern "C" {
    pub static kSecCodeSignerIdentity: CFStringRef;
    pub static kSecCodeSignerEntitlements: CFStringRef;
    pub static kSecCodeSignerIdentifier: CFStringRef;
    pub static kSecCodeSignerTeamIdentifier: CFStringRef;
    pub static kSecCodeSignerDetached: CFStringRef;
    pub static kSecCodeSignerFlags: CFStringRef;
    pub static kSecCodeSignerRequirements: CFStringRef;
    pub static kSecCodeSignerDryRun: CFStringRef;

    pub fn SecCodeSignerCreate(
        parameters: CFDictionaryRef,
        flags: SecCSFlags,
        signer: *mut SecCodeSignerRef,
    ) -> OSStatus;

    pub fn SecCodeSignerAddSignature(
        signer: SecCodeSignerRef,
        code: SecStaticCodeRef,
        flags: SecCSFlags,
    ) -> OSStatus;

    /// `errors`, when set, is returned owned (+1).
    pub fn SecCodeSignerAddSignatureWithErrors(
        signer: SecCodeSignerRef,
        code: SecStaticCodeRef,
        flags: SecCSFlags,
        errors: *mut CFErrorRef,
    ) -> OSStatus;
}
