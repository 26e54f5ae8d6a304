//! BIP-32 hierarchical-deterministic keys, BIP-38 passphrase-encrypted
//! keys, WIF, and P2PKH addressing on secp256k1.
//!
//! This crate is a pure value-type library: every operation is a
//! deterministic function from input bytes to output bytes or a
//! [`KeyError`]. It performs no I/O beyond reading system entropy for key
//! generation, and does no logging — callers observe failures through the
//! `Result` type, not side channels.

pub mod bip38;
pub mod curve;
pub mod encoding;
pub mod error;
pub mod hashing;
pub mod hdkey;
pub mod key;
pub mod network;

pub use error::KeyError;
pub use hdkey::HDKey;
pub use key::Key;
pub use network::Network;
