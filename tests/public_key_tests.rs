//! Public key entity tests: Uptane JSON, key ids, key identification.

mod common;

use openssl::pkey::PKey;
use openssl::rsa::Rsa;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use uptane_crypto::{identify_rsa_key_type, is_rsa_key_type, KeyType, PublicKey};

use common::{init_logging, key_pair, ALL_KEY_TYPES};

#[test]
fn uptane_json_round_trip() {
    init_logging();
    for key_type in ALL_KEY_TYPES {
        let pair = key_pair(key_type);
        let original = PublicKey::new(pair.public_key.clone(), key_type).unwrap();
        let exported = original.to_uptane();
        let expected_keytype = if key_type.is_rsa() { "RSA" } else { "ED25519" };
        assert_eq!(exported["keytype"], expected_keytype);
        assert_eq!(exported["keyval"]["public"], pair.public_key.as_str());

        let imported = PublicKey::from_uptane_json(&exported);
        assert_eq!(imported, original, "{key_type}");
        assert_eq!(imported.to_uptane(), exported);
    }
}

#[test]
fn keytype_is_case_insensitive() {
    let pair = key_pair(KeyType::Rsa2048);
    for keytype in ["rsa", "RSA", "Rsa"] {
        let key = PublicKey::from_uptane_json(&json!({
            "keytype": keytype,
            "keyval": {"public": pair.public_key},
        }));
        assert_eq!(key.key_type(), KeyType::Rsa2048);
    }
    let ed = key_pair(KeyType::Ed25519);
    let key = PublicKey::from_uptane_json(&json!({
        "keytype": "Ed25519",
        "keyval": {"public": ed.public_key},
    }));
    assert_eq!(key.key_type(), KeyType::Ed25519);
}

#[test]
fn rsa_keytype_with_bad_pem_is_unknown() {
    init_logging();
    let key = PublicKey::from_uptane_json(&json!({
        "keytype": "rsa",
        "keyval": {"public": "definitely not pem"},
    }));
    assert_eq!(key.key_type(), KeyType::Unknown);
    assert_eq!(key.value(), "definitely not pem");
}

#[test]
fn explicit_type_must_match_modulus() {
    let pair = key_pair(KeyType::Rsa3072);
    assert!(PublicKey::new(pair.public_key.clone(), KeyType::Rsa3072).is_ok());
    let err = PublicKey::new(pair.public_key.clone(), KeyType::Rsa2048).unwrap_err();
    assert!(err.is_fatal());
    assert!(PublicKey::new(pair.public_key.clone(), KeyType::Rsa4096).is_err());
}

#[test]
fn key_id_is_stable_and_newline_insensitive() {
    let pair = key_pair(KeyType::Rsa2048);
    let trimmed = pair.public_key.trim_end_matches('\n').to_string();
    let with_newline = format!("{trimmed}\n");

    let a = PublicKey::new(trimmed, KeyType::Rsa2048).unwrap();
    let b = PublicKey::new(with_newline, KeyType::Rsa2048).unwrap();
    assert_eq!(a.key_id(), a.key_id());
    assert_eq!(a.key_id(), b.key_id());
    assert_ne!(a, b);
}

#[test]
fn key_id_known_answer() {
    // sha256 of the canonical JSON string "\"abc\""
    let key = PublicKey::new("abc", KeyType::Ed25519).unwrap();
    assert_eq!(
        key.key_id(),
        "6cc43f858fbb763301637b5af970e2a46b46f461f27e5a0f41e009c59b827b25"
    );
}

#[test]
fn key_id_escapes_non_ascii_values() {
    // sha256 of "\"caf\\u00e9\"" and "\"\\ud83d\\ude00\""
    let latin = PublicKey::new("caf\u{e9}", KeyType::Ed25519).unwrap();
    assert_eq!(
        latin.key_id(),
        "ee08d8beb64c89c25fe7f583c6b522f7f380aab939035ec58d3fcdba24c881e1"
    );
    let astral = PublicKey::new("\u{1f600}", KeyType::Ed25519).unwrap();
    assert_eq!(
        astral.key_id(),
        "e30439cb87e140c0b998ad3095285abfec0294e2a8916f9a8f30d85734e6f82b"
    );
}

#[test]
fn distinct_keys_have_distinct_ids() {
    let a = PublicKey::new(key_pair(KeyType::Ed25519).public_key.clone(), KeyType::Ed25519).unwrap();
    let b = PublicKey::new(key_pair(KeyType::Rsa2048).public_key.clone(), KeyType::Rsa2048).unwrap();
    assert_ne!(a.key_id(), b.key_id());
}

#[test]
fn public_key_from_file() {
    let pair = key_pair(KeyType::Rsa4096);
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(pair.public_key.as_bytes()).unwrap();

    let key = PublicKey::from_path(file.path()).unwrap();
    assert_eq!(key.key_type(), KeyType::Rsa4096);
    assert_eq!(key.value(), pair.public_key);

    assert!(PublicKey::from_path("/nonexistent/uptane/key.pem").is_err());
}

#[test]
fn identify_unsupported_lengths_and_garbage() {
    init_logging();
    let pkey = PKey::from_rsa(Rsa::generate(1024).unwrap()).unwrap();
    let pem = String::from_utf8(pkey.public_key_to_pem().unwrap()).unwrap();
    assert_eq!(identify_rsa_key_type(&pem), KeyType::Unknown);
    assert_eq!(identify_rsa_key_type("\x00\x01garbage"), KeyType::Unknown);
    assert_eq!(
        identify_rsa_key_type(&key_pair(KeyType::Ed25519).public_key),
        KeyType::Unknown
    );
}

#[test]
fn identify_supported_lengths() {
    for key_type in [KeyType::Rsa2048, KeyType::Rsa3072, KeyType::Rsa4096] {
        assert_eq!(identify_rsa_key_type(&key_pair(key_type).public_key), key_type);
        assert!(is_rsa_key_type(key_type));
    }
    assert!(!is_rsa_key_type(KeyType::Ed25519));
    assert!(!is_rsa_key_type(KeyType::Unknown));
}
