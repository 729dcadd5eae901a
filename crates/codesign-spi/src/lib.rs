#[cfg(target_vendor = "apple")]
pub mod code;
pub mod credentials;
pub mod entitlements;
pub mod error;
#[cfg(target_vendor = "apple")]
pub mod identity;
pub mod signer;
pub mod status;
#[cfg(target_vendor = "apple")]
pub mod sys;

pub use credentials::{KeyKind, KeyRepresentation, PrivateKey, SigningCredentials};
pub use entitlements::EntitlementsBlob;
pub use error::Error;
pub use signer::{CodesignSigner, Signer, SigningInformation};

pub type Result<T> = std::result::Result<T, Error>;
