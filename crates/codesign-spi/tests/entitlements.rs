//! Integration tests for entitlements blobs built from plist files.

use codesign_spi::entitlements::{parse_entitlements, serialize_entitlements, CSMAGIC_EMBEDDED_ENTITLEMENTS};
use codesign_spi::{EntitlementsBlob, Error};
use plist::Value;
use std::path::PathBuf;

fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read(path).unwrap()
}

#[test]
fn test_fixture_entitlements_blob() {
    let plist = fixture("entitlements.plist");
    let blob = EntitlementsBlob::from_entitlements(&plist);
    let bytes = blob.as_bytes();

    assert_eq!(&bytes[..4], &CSMAGIC_EMBEDDED_ENTITLEMENTS.to_be_bytes());
    assert_eq!(bytes.len(), plist.len() + 8);

    // What the platform hands back is the same blob
    let reread = EntitlementsBlob::from_blob(bytes.to_vec()).unwrap();
    let dict = parse_entitlements(reread.entitlements()).unwrap();

    assert_eq!(
        dict.get("application-identifier"),
        Some(&Value::String("ABCDE12345.com.example.app".into()))
    );
    assert_eq!(dict.get("get-task-allow"), Some(&Value::Boolean(true)));
}

#[test]
fn test_reserialized_entitlements_keep_keys() {
    let dict = parse_entitlements(&fixture("entitlements.plist")).unwrap();
    let xml = serialize_entitlements(&dict).unwrap();

    let again = parse_entitlements(&xml).unwrap();
    assert_eq!(again.len(), 3);
    assert!(again.contains_key("com.apple.developer.team-identifier"));
}

#[test]
fn test_truncated_platform_blob() {
    let mut raw = EntitlementsBlob::from_entitlements(&fixture("entitlements.plist")).into_bytes();
    raw.truncate(raw.len() - 1);

    let err = EntitlementsBlob::from_blob(raw).unwrap_err();
    assert!(matches!(err, Error::Entitlements(_)));
}

#[test]
fn test_garbage_plist() {
    assert!(parse_entitlements(b"not a plist").is_err());
}
