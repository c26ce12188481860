//! Transaction family identification and batch assembly (spec §6, §4.4).

use prost::Message as _;
use rand::Rng;
use sc_crypto::Secp256k1KeyPair;
use sc_schema::{Batch, BatchHeader, Transaction, TransactionHeader};

/// `familyName` for every transaction this workspace submits (spec §6).
pub const FAMILY_NAME: &str = "supply_chain";
/// `familyVersion` for every transaction this workspace submits (spec §6).
pub const FAMILY_VERSION: &str = "1.1";

const NONCE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const NONCE_LEN: usize = 18;

/// An 18-character random base-36 nonce (spec §6).
pub fn random_nonce() -> String {
    let mut rng = rand::thread_rng();
    (0..NONCE_LEN)
        .map(|_| NONCE_ALPHABET[rng.gen_range(0..NONCE_ALPHABET.len())] as char)
        .collect()
}

/// Build and sign a `Transaction` wrapping one encoded `Payload`. This is
/// the end-user's half of the envelope (spec §4.4: "Incoming transactions
/// (already signed by the end-user)"); `sc-batcher` itself never calls
/// this — it is provided so callers and this crate's own tests can
/// construct well-formed fixtures without hand-rolling the header.
pub fn build_transaction(
    signer: &Secp256k1KeyPair,
    batcher_public_key: &str,
    payload_bytes: Vec<u8>,
) -> Transaction {
    let payload_sha512 = sc_crypto::to_hex(&sc_crypto::sha512(&payload_bytes));
    let header = TransactionHeader {
        family_name: FAMILY_NAME.to_string(),
        family_version: FAMILY_VERSION.to_string(),
        inputs: vec![sc_address::NAMESPACE.to_string()],
        outputs: vec![sc_address::NAMESPACE.to_string()],
        signer_public_key: signer.public_key().to_hex(),
        batcher_public_key: batcher_public_key.to_string(),
        dependencies: Vec::new(),
        payload_sha512,
        nonce: random_nonce(),
    };
    let header_bytes = header.encode_to_vec();
    let header_signature = signer.sign(&header_bytes).to_hex();
    Transaction {
        header: header_bytes,
        header_signature,
        payload: payload_bytes,
    }
}

/// Assemble a batcher-signed `Batch` over already-validated transactions.
/// The batch id is its own `header_signature` — the same convention used
/// for transaction ids (spec §4.4).
pub fn build_batch(batcher_key: &Secp256k1KeyPair, transactions: Vec<Transaction>) -> Batch {
    let transaction_ids = transactions.iter().map(|t| t.header_signature.clone()).collect();
    let header = BatchHeader {
        signer_public_key: batcher_key.public_key().to_hex(),
        transaction_ids,
    };
    let header_bytes = header.encode_to_vec();
    let header_signature = batcher_key.sign(&header_bytes).to_hex();
    Batch {
        header: header_bytes,
        header_signature,
        transactions,
    }
}
