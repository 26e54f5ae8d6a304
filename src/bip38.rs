//! BIP-38 non-EC-multiply passphrase encryption and decryption.
//!
//! Each 16-byte half of the private scalar is exactly one AES block, so the
//! raw `aes` block cipher is used directly — no chaining mode or padding is
//! needed, matching the scheme's own framing.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use scrypt::Params;
use secp256k1::SecretKey;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::encoding::{decode_check, encode_check};
use crate::error::KeyError;
use crate::hashing::double_sha256;
use crate::key::Key;
use crate::network::Network;

const BIP38_PREFIX: [u8; 2] = [0x01, 0x42];
const FLAG_COMPRESSED: u8 = 0xE0;
const FLAG_UNCOMPRESSED: u8 = 0xC0;

fn scrypt_params() -> Params {
    // N = 16384 = 2^14, r = 8, p = 8, dkLen = 64
    Params::new(14, 8, 8, 64).expect("static scrypt parameters are valid")
}

/// Normalizes `passphrase` to Unicode NFC before encoding, per BIP-38's
/// `passphrase_utf8_NFC` requirement — two implementations that disagree on
/// normalization derive different keys from the same displayed passphrase.
fn normalized_passphrase(passphrase: &str) -> String {
    passphrase.nfc().collect()
}

fn derive_key(passphrase: &str, addr_hash: &[u8; 4]) -> ([u8; 32], [u8; 32]) {
    let passphrase = normalized_passphrase(passphrase);
    let mut dk = [0u8; 64];
    scrypt::scrypt(passphrase.as_bytes(), addr_hash, &scrypt_params(), &mut dk)
        .expect("scrypt output buffer has the requested length");
    let mut dk1 = [0u8; 32];
    let mut dk2 = [0u8; 32];
    dk1.copy_from_slice(&dk[..32]);
    dk2.copy_from_slice(&dk[32..]);
    (dk1, dk2)
}

fn aes256_encrypt_block(key: &[u8; 32], block: &[u8; 16]) -> [u8; 16] {
    let cipher = Aes256::new(GenericArray::from_slice(key));
    let mut buf = *GenericArray::from_slice(block);
    cipher.encrypt_block(&mut buf);
    let mut out = [0u8; 16];
    out.copy_from_slice(buf.as_slice());
    out
}

fn aes256_decrypt_block(key: &[u8; 32], block: &[u8; 16]) -> [u8; 16] {
    let cipher = Aes256::new(GenericArray::from_slice(key));
    let mut buf = *GenericArray::from_slice(block);
    cipher.decrypt_block(&mut buf);
    let mut out = [0u8; 16];
    out.copy_from_slice(buf.as_slice());
    out
}

fn xor16(a: &[u8], b: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = a[i] ^ b[i];
    }
    out
}

fn address_hash(key: &Key) -> [u8; 4] {
    let address = if key.compressed() {
        key.address()
    } else {
        key.address_uncompressed()
    };
    let digest = double_sha256(address.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Encrypts `key`'s private scalar with `passphrase`, per BIP-38's
/// non-EC-multiply mode. Fails with `InvalidScalar` if `key` has no
/// private component.
pub fn encrypt(key: &Key, passphrase: &str) -> Result<String, KeyError> {
    let private = key.private_byte().ok_or(KeyError::InvalidScalar)?;
    let addr_hash = address_hash(key);
    let (dk1, dk2) = derive_key(passphrase, &addr_hash);

    let h1 = xor16(&private[..16], &dk1[..16]);
    let h2 = xor16(&private[16..], &dk1[16..]);
    let e1 = aes256_encrypt_block(&dk2, &h1);
    let e2 = aes256_encrypt_block(&dk2, &h2);

    let flag = if key.compressed() {
        FLAG_COMPRESSED
    } else {
        FLAG_UNCOMPRESSED
    };

    let mut payload = Vec::with_capacity(39);
    payload.extend_from_slice(&BIP38_PREFIX);
    payload.push(flag);
    payload.extend_from_slice(&addr_hash);
    payload.extend_from_slice(&e1);
    payload.extend_from_slice(&e2);

    Ok(encode_check(&payload))
}

/// Decrypts a BIP-38 non-EC-multiply ciphertext with `passphrase`, verifying
/// the recovered key's address hash against the one embedded in the
/// ciphertext. Fails with `InvalidPassphrase` on mismatch.
pub fn decrypt(s: &str, passphrase: &str) -> Result<Key, KeyError> {
    let data = decode_check(s)?;
    if data.len() != 39 || data[0..2] != BIP38_PREFIX {
        return Err(KeyError::UnrecognizedFormat);
    }

    let flag = data[2];
    let compressed = match flag {
        FLAG_COMPRESSED => true,
        FLAG_UNCOMPRESSED => false,
        _ => return Err(KeyError::UnrecognizedFormat),
    };

    let mut addr_hash = [0u8; 4];
    addr_hash.copy_from_slice(&data[3..7]);
    let mut e1 = [0u8; 16];
    e1.copy_from_slice(&data[7..23]);
    let mut e2 = [0u8; 16];
    e2.copy_from_slice(&data[23..39]);

    let (dk1, dk2) = derive_key(passphrase, &addr_hash);
    let h1 = aes256_decrypt_block(&dk2, &e1);
    let h2 = aes256_decrypt_block(&dk2, &e2);

    let mut private = Zeroizing::new([0u8; 32]);
    private[..16].copy_from_slice(&xor16(&h1, &dk1[..16]));
    private[16..].copy_from_slice(&xor16(&h2, &dk1[16..]));

    let secret = SecretKey::from_slice(private.as_ref()).map_err(|_| KeyError::InvalidPassphrase)?;
    let key = Key::Private {
        secret,
        compressed,
        network: Network::Bitcoin,
    };

    if address_hash(&key) != addr_hash {
        return Err(KeyError::InvalidPassphrase);
    }

    Ok(key)
}
