//! Code reference handling for running code (`SecCode.h`).

use super::base::*;

/// Dynamic status bits reported by `SecCodeGetStatus`.
pub type SecCodeStatus = u32;

pub const kSecCodeStatusValid: SecCodeStatus = 0x0001;
pub const kSecCodeStatusHard: SecCodeStatus = 0x0100;
pub const kSecCodeStatusKill: SecCodeStatus = 0x0200;

#[link(name = "Security", kind = "framework")]
extern "C" {
    pub static kSecGuestAttributePid: CFStringRef;

    pub fn SecCodeCopySelf(flags: SecCSFlags, self_: *mut SecCodeRef) -> OSStatus;

    pub fn SecCodeCopyStaticCode(
        code: SecCodeRef,
        flags: SecCSFlags,
        static_code: *mut SecStaticCodeRef,
    ) -> OSStatus;

    pub fn SecCodeCopyGuestWithAttributes(
        host: SecCodeRef,
        attributes: CFDictionaryRef,
        flags: SecCSFlags,
        guest: *mut SecCodeRef,
    ) -> OSStatus;

    pub fn SecCodeCheckValidity(
        code: SecCodeRef,
        flags: SecCSFlags,
        requirement: SecRequirementRef,
    ) -> OSStatus;

    pub fn SecCodeCheckValidityWithErrors(
        code: SecCodeRef,
        flags: SecCSFlags,
        requirement: SecRequirementRef,
        errors: *mut CFErrorRef,
    ) -> OSStatus;

    pub fn SecCodeGetStatus(
        code: SecCodeRef,
        flags: SecCSFlags,
        status: *mut SecCodeStatus,
    ) -> OSStatus;
}
