//! Plaintext payload encoding: the ordered entry list as a JSON array.

use super::entry::Entry;
use crate::errors::{TotpVaultError, Result};

/// Serialize entries in order.
pub fn encode(entries: &[Entry]) -> Result<Vec<u8>> {
    serde_json::to_vec(entries).map_err(|e| TotpVaultError::MalformedPayload(format!("encode: {e}")))
}

/// Parse a payload produced by `encode` (or an older untagged one).
pub fn decode(bytes: &[u8]) -> Result<Vec<Entry>> {
    serde_json::from_slice(bytes).map_err(|e| TotpVaultError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::entry::SecretEncoding;

    #[test]
    fn empty_list_encodes_as_empty_array() {
        assert_eq!(encode(&[]).unwrap(), b"[]");
        assert!(decode(b"[]").unwrap().is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let entries = vec![
            Entry::new("Zeta", "JBSWY3DPEHPK3PXP"),
            Entry::new("Alpha", "deadbeef"),
            Entry::new("Zeta", "GEZDGNBVGY3TQOJQ"),
        ];
        let decoded = decode(&encode(&entries).unwrap()).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn encoded_entries_carry_their_tag() {
        let bytes = encode(&[Entry::new("A", "deadbeef")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            r#"[{"title":"A","secret":"deadbeef","encoding":"hex"}]"#
        );
    }

    #[test]
    fn decodes_untagged_payload() {
        let decoded = decode(br#"[{"title":"Example","secret":"JBSWY3DPEHPK3PXP"}]"#).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].encoding, SecretEncoding::Base32);
    }

    #[test]
    fn rejects_wrong_shape() {
        let payloads: [&[u8]; 5] = [b"{}", b"not json", br#"[{"title":"x"}]"#, b"[1,2]", b""];
        for bad in payloads {
            assert!(
                matches!(decode(bad), Err(TotpVaultError::MalformedPayload(_))),
                "payload {:?} should be rejected",
                String::from_utf8_lossy(bad)
            );
        }
    }
}
