//! Declarations for the Security framework code signing SPI.
//!
//! The code signer, static code and code reference interfaces ship in the
//! macOS SDK but not in the other Darwin SDKs, and `SecIdentityCreate` is
//! private everywhere. These modules re-declare the parts we call so the
//! crate links against `Security.framework` on every Apple target.
//!
//! Signatures follow Apple's open-source Security headers
//! (`SecCodeSigner.h`, `SecStaticCode.h`, `SecCode.h`, `SecIdentityPriv.h`).
//! Those headers are the source of truth; nothing here validates arguments.

#![allow(non_upper_case_globals, non_snake_case, non_camel_case_types)]

pub mod base;
pub mod code;
pub mod code_signer;
pub mod identity;
pub mod static_code;

pub use base::*;
pub use code::*;
pub use code_signer::*;
pub use identity::*;
pub use static_code::*;
