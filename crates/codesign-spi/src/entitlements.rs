//! Entitlements blobs as understood by the platform code signer.
//!
//! The signer takes entitlements (option `kSecCodeSignerEntitlements`) and
//! reports them back (info key `entitlements`) wrapped in a blob:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ magic: 0xfade7171 (4 bytes, BE)      │
//! │ length: header + payload (4 bytes)   │
//! ├──────────────────────────────────────┤
//! │ XML property list payload            │
//! └──────────────────────────────────────┘
//! ```

use crate::{Error, Result};
use plist::{Dictionary, Value};

/// Embedded entitlements (XML plist format)
pub const CSMAGIC_EMBEDDED_ENTITLEMENTS: u32 = 0xfade7171;

/// Size of the blob header in bytes (magic + length)
pub const BLOB_HEADER_SIZE: usize = 8;

/// Entitlements wrapped in a blob header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementsBlob {
    blob: Vec<u8>,
}

impl EntitlementsBlob {
    /// Wrap raw entitlements (an XML plist) in a blob header.
    ///
    /// # Examples
    ///
    /// ```
    /// use codesign_spi::EntitlementsBlob;
    ///
    /// let blob = EntitlementsBlob::from_entitlements(b"<plist/>");
    /// assert_eq!(blob.as_bytes().len(), 8 + 8);
    /// assert_eq!(blob.entitlements(), b"<plist/>");
    /// ```
    pub fn from_entitlements(entitlements: &[u8]) -> Self {
        let total_len = BLOB_HEADER_SIZE + entitlements.len();
        let mut blob = Vec::with_capacity(total_len);

        blob.extend(&CSMAGIC_EMBEDDED_ENTITLEMENTS.to_be_bytes());
        blob.extend(&(total_len as u32).to_be_bytes());
        blob.extend(entitlements);

        Self { blob }
    }

    /// Take ownership of a blob produced by the platform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Entitlements`] if the buffer is shorter than the
    /// header, the magic is wrong, or the declared length disagrees with the
    /// buffer length.
    pub fn from_blob(blob: Vec<u8>) -> Result<Self> {
        if blob.len() < BLOB_HEADER_SIZE {
            return Err(Error::Entitlements(format!(
                "blob is {} bytes, shorter than its header",
                blob.len()
            )));
        }

        let magic = u32::from_be_bytes([blob[0], blob[1], blob[2], blob[3]]);
        if magic != CSMAGIC_EMBEDDED_ENTITLEMENTS {
            return Err(Error::Entitlements(format!(
                "unexpected blob magic 0x{magic:08x}"
            )));
        }

        let length = u32::from_be_bytes([blob[4], blob[5], blob[6], blob[7]]) as usize;
        if length != blob.len() {
            return Err(Error::Entitlements(format!(
                "blob declares {length} bytes but holds {}",
                blob.len()
            )));
        }

        Ok(Self { blob })
    }

    /// The entitlements payload, without the header.
    pub fn entitlements(&self) -> &[u8] {
        &self.blob[BLOB_HEADER_SIZE..]
    }

    /// The full blob, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.blob
    }

    /// Consume the wrapper, returning the full blob.
    pub fn into_bytes(self) -> Vec<u8> {
        self.blob
    }
}

/// Parse an entitlements property list into a dictionary.
///
/// Accepts XML or binary plists. The root must be a dictionary.
pub fn parse_entitlements(data: &[u8]) -> Result<Dictionary> {
    match Value::from_reader(std::io::Cursor::new(data))? {
        Value::Dictionary(dict) => Ok(dict),
        _ => Err(Error::Entitlements("root is not a dictionary".into())),
    }
}

/// Serialize entitlements as an XML property list.
pub fn serialize_entitlements(entitlements: &Dictionary) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    Value::Dictionary(entitlements.clone()).to_writer_xml(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLIST: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>get-task-allow</key>
	<true/>
</dict>
</plist>"#;

    #[test]
    fn test_blob_header() {
        let blob = EntitlementsBlob::from_entitlements(PLIST);
        let bytes = blob.as_bytes();

        // Check magic
        assert_eq!(&bytes[0..4], &CSMAGIC_EMBEDDED_ENTITLEMENTS.to_be_bytes());

        // Check length
        let len = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(len as usize, 8 + PLIST.len());

        // Check data starts at offset 8
        assert_eq!(&bytes[8..], PLIST);
    }

    #[test]
    fn test_empty_payload() {
        let blob = EntitlementsBlob::from_entitlements(&[]);
        assert_eq!(blob.as_bytes(), &[0xfa, 0xde, 0x71, 0x71, 0, 0, 0, 8]);
        assert!(blob.entitlements().is_empty());
    }

    #[test]
    fn test_from_blob_accepts_platform_output() {
        let raw = EntitlementsBlob::from_entitlements(PLIST).into_bytes();
        let blob = EntitlementsBlob::from_blob(raw).unwrap();
        assert_eq!(blob.entitlements(), PLIST);
    }

    #[test]
    fn test_from_blob_too_short() {
        let err = EntitlementsBlob::from_blob(vec![0xfa, 0xde, 0x71]).unwrap_err();
        assert!(matches!(err, Error::Entitlements(_)));
    }

    #[test]
    fn test_from_blob_wrong_magic() {
        // DER entitlements magic is a different blob type
        let mut raw = EntitlementsBlob::from_entitlements(b"x").into_bytes();
        raw[3] = 0x72;
        let err = EntitlementsBlob::from_blob(raw).unwrap_err();
        assert!(err.to_string().contains("0xfade7172"));
    }

    #[test]
    fn test_from_blob_length_mismatch() {
        let mut raw = EntitlementsBlob::from_entitlements(b"abc").into_bytes();
        raw.push(0);
        assert!(EntitlementsBlob::from_blob(raw).is_err());
    }

    #[test]
    fn test_parse_entitlements() {
        let dict = parse_entitlements(PLIST).unwrap();
        assert_eq!(dict.get("get-task-allow"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_parse_entitlements_rejects_array_root() {
        let array = br#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><array><string>a</string></array></plist>"#;
        assert!(matches!(
            parse_entitlements(array),
            Err(Error::Entitlements(_))
        ));
    }

    #[test]
    fn test_serialize_then_parse() {
        let mut dict = Dictionary::new();
        dict.insert(
            "application-identifier".into(),
            Value::String("ABCDE12345.com.example.app".into()),
        );
        let xml = serialize_entitlements(&dict).unwrap();
        assert!(xml.starts_with(b"<?xml"));
        assert_eq!(parse_entitlements(&xml).unwrap(), dict);
    }
}
