use std::thread;

use string_cipher::{
    decrypt, encrypt, CipherError, CipherOptions, KeyDerivation, Scheme, StringCipher,
};

fn all_option_sets() -> Vec<CipherOptions> {
    let mut out = Vec::new();
    for scheme in [Scheme::V1, Scheme::Legacy] {
        for key_derivation in [KeyDerivation::Sha256, KeyDerivation::ZeroPad] {
            out.push(CipherOptions {
                scheme,
                key_derivation,
                accept_legacy: false,
            });
        }
    }
    out
}

#[test]
fn round_trip_with_defaults() {
    let envelope = encrypt("attack at dawn", "passphrase").unwrap();
    assert_eq!(decrypt(&envelope, "passphrase").unwrap(), "attack at dawn");
}

#[test]
fn round_trip_every_option_set() {
    let plaintexts = ["", "a", "exactly16bytes!!", "héllo 世界", "line\nbreak\ttab 🎉"];
    let keys = ["k", "a much longer key string that exceeds thirty-two bytes", "ключ"];
    for options in all_option_sets() {
        let cipher = StringCipher::with_options(options);
        for p in plaintexts {
            for k in keys {
                let envelope = cipher.encrypt(p, k).unwrap();
                assert_eq!(cipher.decrypt(&envelope, k).unwrap(), p, "{options:?}");
            }
        }
    }
}

#[test]
fn empty_plaintext_round_trips() {
    let envelope = encrypt("", "k").unwrap();
    assert_eq!(decrypt(&envelope, "k").unwrap(), "");
}

#[test]
fn non_ascii_plaintext_round_trips() {
    let envelope = encrypt("héllo 世界", "鍵").unwrap();
    assert_eq!(decrypt(&envelope, "鍵").unwrap(), "héllo 世界");
}

#[test]
fn v1_is_randomised() {
    let a = encrypt("same input", "k").unwrap();
    let b = encrypt("same input", "k").unwrap();
    assert_ne!(a, b);
    assert_eq!(decrypt(&a, "k").unwrap(), "same input");
    assert_eq!(decrypt(&b, "k").unwrap(), "same input");
}

#[test]
fn legacy_is_deterministic() {
    let cipher = StringCipher::with_options(CipherOptions::legacy_compatible());
    assert_eq!(
        cipher.encrypt("same input", "k").unwrap(),
        cipher.encrypt("same input", "k").unwrap()
    );
}

#[test]
fn wrong_key_fails_authentication() {
    let envelope = encrypt("secret", "right key").unwrap();
    assert_eq!(
        decrypt(&envelope, "wrong key").unwrap_err(),
        CipherError::AuthenticationFailure
    );
}

#[test]
fn wrong_key_on_legacy_does_not_return_plaintext() {
    let cipher = StringCipher::with_options(CipherOptions::legacy_compatible());
    let envelope = cipher.encrypt("legacy secret value", "right key").unwrap();
    let err = cipher.decrypt(&envelope, "wrong key").unwrap_err();
    assert!(matches!(err, CipherError::Padding | CipherError::Encoding), "{err:?}");
}

#[test]
fn empty_key_is_invalid() {
    assert_eq!(encrypt("x", "").unwrap_err(), CipherError::InvalidKey);
    let envelope = encrypt("x", "k").unwrap();
    assert_eq!(decrypt(&envelope, "").unwrap_err(), CipherError::InvalidKey);
}

#[test]
fn malformed_input_is_decoding_error() {
    for input in ["not-base64!!", "", "v1.", "v1.AAAA", "v1.!!.!!", "v2.abc.def"] {
        assert!(
            matches!(decrypt(input, "k"), Err(CipherError::Decoding(_))),
            "{input}"
        );
    }
    let legacy = StringCipher::with_options(CipherOptions::legacy_compatible());
    assert!(matches!(
        legacy.decrypt("not-base64!!", "k"),
        Err(CipherError::Decoding(_))
    ));
}

#[test]
fn tampered_envelope_fails_authentication() {
    let envelope = encrypt("do not touch", "k").unwrap();
    let split = envelope.rfind('.').unwrap() + 1;
    let mut chars: Vec<char> = envelope.chars().collect();
    // Interior characters carry a full six bits, so the Base64 stays valid.
    let i = split + (chars.len() - split) / 2;
    chars[i] = if chars[i] == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();
    assert_eq!(
        decrypt(&tampered, "k").unwrap_err(),
        CipherError::AuthenticationFailure
    );
}

// Reference value from `openssl enc -aes-256-cbc -K <"app-key" zero-padded> -iv 0 | base64`.
#[test]
fn legacy_matches_openssl_known_answer() {
    let cipher = StringCipher::with_options(CipherOptions::legacy_compatible());
    let expected = "c9cwFxlsZ0CF2NCHwHTSrejgzU/wUuOQYyHNCTH0D94=";
    assert_eq!(
        cipher.encrypt("hello world, 16+ bytes", "app-key").unwrap(),
        expected
    );
    assert_eq!(
        cipher.decrypt(expected, "app-key").unwrap(),
        "hello world, 16+ bytes"
    );
}

#[test]
fn concurrent_use_from_many_threads() {
    let cipher = StringCipher::new();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let text = format!("message {i}");
                let key = format!("key {i}");
                let envelope = cipher.encrypt(&text, &key).unwrap();
                assert_eq!(cipher.decrypt(&envelope, &key).unwrap(), text);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
