//! Tests that call into Security.framework. Apple targets only.

#![cfg(target_vendor = "apple")]

use codesign_spi::code::Code;
use codesign_spi::{signer, CodesignSigner, Error, Signer, SigningCredentials};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

fn ec_signer() -> CodesignSigner {
    let credentials =
        SigningCredentials::from_pem(&fixture("ec_cert.pem"), &fixture("ec_key.pem")).unwrap();
    CodesignSigner::new(credentials)
}

#[test]
fn test_system_binary_verifies() {
    signer::verify(Path::new("/bin/ls")).unwrap();
}

#[test]
fn test_system_binary_identifier() {
    let info = signer::signing_information(Path::new("/bin/ls")).unwrap();
    assert_eq!(info.identifier.as_deref(), Some("com.apple.ls"));
}

#[test]
fn test_current_process_static_code() {
    let code = Code::current().unwrap();
    let static_code = code.static_code().unwrap();
    // Test binaries are at most ad-hoc signed; reading the info must still work
    assert!(static_code.copy_information(0).is_ok());
}

#[test]
fn test_sign_copy_of_test_binary() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("signed-copy");
    fs::copy(std::env::current_exe().unwrap(), &target).unwrap();

    let entitlements = fixture("entitlements.plist");
    ec_signer()
        .identifier("com.example.signed-copy")
        .codesign(&target, Some(entitlements.as_slice()))
        .unwrap();

    assert_eq!(signer::analyze(&target).unwrap(), entitlements);

    let info = signer::signing_information(&target).unwrap();
    assert_eq!(info.identifier.as_deref(), Some("com.example.signed-copy"));
    assert_eq!(info.team_id.as_deref(), Some("ABCDE12345"));
}

#[test]
fn test_sign_missing_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = ec_signer().codesign(&missing, None);
    assert!(
        matches!(result, Err(Error::Status { .. }) | Err(Error::Platform(_))),
        "unexpected result: {result:?}"
    );
}
