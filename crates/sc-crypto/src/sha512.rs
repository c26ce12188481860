//! # SHA-512 Hashing
//!
//! The digest primitive behind every address derivation in `sc-address`
//! (spec §4.1). Kept as a thin, allocation-light wrapper around `sha2` so
//! callers never depend on the underlying crate directly.

use sha2::{Digest, Sha512};

/// SHA-512 digest output (512 bits).
pub type Digest512 = [u8; 64];

/// Hash a single input with SHA-512.
pub fn sha512(data: &[u8]) -> Digest512 {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let out = hasher.finalize();
    let mut buf = [0u8; 64];
    buf.copy_from_slice(&out);
    buf
}

/// Hash the concatenation of several inputs with SHA-512, without an
/// intermediate allocation for the joined buffer.
pub fn sha512_many(parts: &[&[u8]]) -> Digest512 {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let out = hasher.finalize();
    let mut buf = [0u8; 64];
    buf.copy_from_slice(&out);
    buf
}

/// Lowercase-hex encode a digest (or any byte slice).
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_64_bytes() {
        assert_eq!(sha512(b"hello").len(), 64);
    }

    #[test]
    fn deterministic() {
        assert_eq!(sha512(b"asset"), sha512(b"asset"));
    }

    #[test]
    fn many_matches_concatenation() {
        let joined = sha512(b"ab");
        let many = sha512_many(&[b"a", b"b"]);
        assert_eq!(joined, many);
    }

    #[test]
    fn to_hex_is_lowercase() {
        let h = sha512(b"x");
        let s = to_hex(&h);
        assert_eq!(s.len(), 128);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
