//! # sc-crypto — Hashing and Signing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `sha512` | SHA-512 | Address derivation (`sc-address`, spec §4.1) |
//! | `ecdsa` | secp256k1 | Agent identity, transaction and batch signing |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, no RNG dependency for
//!   signing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod sha512;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use sha512::{sha512, sha512_many, to_hex, Digest512};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
