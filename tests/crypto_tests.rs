//! Integration tests for key derivation and the AES-256-GCM envelope.

use totpvault::crypto::encryption::{NONCE_LEN, TAG_LEN};
use totpvault::crypto::{open, seal, KdfConfig, KeyDeriver, VaultKey, DEFAULT_ITERATIONS};
use totpvault::errors::TotpVaultError;

fn derive(passphrase: &[u8], salt: &[u8]) -> VaultKey {
    let config = KdfConfig::new(passphrase, salt, DEFAULT_ITERATIONS).unwrap();
    KeyDeriver::new(config).derive()
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

#[test]
fn same_inputs_give_same_key() {
    let a = derive(b"correct horse", b"some-salt");
    let b = derive(b"correct horse", b"some-salt");
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn passphrase_and_salt_both_matter() {
    let base = derive(b"correct horse", b"salt-one");
    let other_pass = derive(b"correct horsf", b"salt-one");
    let other_salt = derive(b"correct horse", b"salt-two");
    assert_ne!(base.as_bytes(), other_pass.as_bytes());
    assert_ne!(base.as_bytes(), other_salt.as_bytes());
}

#[test]
fn empty_passphrase_still_derives() {
    let key = derive(b"", b"salt");
    assert_eq!(key.as_bytes().len(), 32);
}

#[test]
fn invalid_kdf_config_is_rejected() {
    assert!(matches!(
        KdfConfig::new(b"pw", b"", DEFAULT_ITERATIONS),
        Err(TotpVaultError::KeyDerivationFailed(_))
    ));
    assert!(matches!(
        KdfConfig::new(b"pw", b"salt", 0),
        Err(TotpVaultError::KeyDerivationFailed(_))
    ));
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[test]
fn seal_then_open_round_trip() {
    let key = derive(b"pw", b"salt");
    let plaintext = br#"[{"title":"GitHub","secret":"JBSWY3DPEHPK3PXP"}]"#;

    let blob = seal(&key, plaintext).unwrap();
    assert_eq!(blob.len(), NONCE_LEN + plaintext.len() + TAG_LEN);
    assert_eq!(open(&key, &blob).unwrap(), plaintext);
}

#[test]
fn empty_plaintext_seals_to_nonce_and_tag() {
    let key = derive(b"pw", b"salt");
    let blob = seal(&key, b"").unwrap();
    assert_eq!(blob.len(), NONCE_LEN + TAG_LEN);
    assert!(open(&key, &blob).unwrap().is_empty());
}

#[test]
fn nonces_are_fresh_per_seal() {
    let key = derive(b"pw", b"salt");
    let a = seal(&key, b"same").unwrap();
    let b = seal(&key, b"same").unwrap();
    assert_ne!(a[..NONCE_LEN], b[..NONCE_LEN]);
    assert_ne!(a, b);
}

#[test]
fn every_flipped_bit_fails_authentication() {
    let key = derive(b"pw", b"salt");
    let blob = seal(&key, b"[]").unwrap();

    for byte in 0..blob.len() {
        for bit in 0..8 {
            let mut tampered = blob.clone();
            tampered[byte] ^= 1 << bit;
            assert!(
                matches!(open(&key, &tampered), Err(TotpVaultError::AuthenticationFailure)),
                "flip at byte {byte} bit {bit} was accepted"
            );
        }
    }
}

#[test]
fn wrong_key_fails_authentication() {
    let key = derive(b"right", b"salt");
    let wrong = derive(b"wrong", b"salt");
    let blob = seal(&key, b"[]").unwrap();

    assert!(matches!(
        open(&wrong, &blob),
        Err(TotpVaultError::AuthenticationFailure)
    ));
}

#[test]
fn short_blobs_fail_authentication() {
    let key = derive(b"pw", b"salt");
    for len in [0, 1, NONCE_LEN, NONCE_LEN + TAG_LEN - 1] {
        let blob = vec![0u8; len];
        assert!(
            matches!(open(&key, &blob), Err(TotpVaultError::AuthenticationFailure)),
            "{len}-byte blob was accepted"
        );
    }
}

#[test]
fn truncated_blob_fails_authentication() {
    let key = derive(b"pw", b"salt");
    let blob = seal(&key, b"some payload").unwrap();
    assert!(matches!(
        open(&key, &blob[..blob.len() - 1]),
        Err(TotpVaultError::AuthenticationFailure)
    ));
}
