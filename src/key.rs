//! The `Key` abstraction: a private scalar or a public curve point, with
//! every encoding (hex, WIF, SEC, HASH160, Base58Check address) derived on
//! demand.

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{PublicKey, SecretKey};
use zeroize::Zeroizing;

use crate::bip38;
use crate::curve;
use crate::encoding::{decode_check, encode_check};
use crate::error::KeyError;
use crate::hashing::hash160;
use crate::network::Network;

/// A Bitcoin elliptic-curve key: exactly one of a private scalar or a
/// public curve point, each carrying its preferred `compressed` form and
/// originating `Network`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Private {
        secret: SecretKey,
        compressed: bool,
        network: Network,
    },
    Public {
        public: PublicKey,
        compressed: bool,
        network: Network,
    },
}

// Variant fields share the enum's own visibility, so `Key::Private { .. }`
// is constructible from sibling modules (`bip38`, `hdkey`) without a
// separate `pub(crate)` on each field.

impl Key {
    pub fn network(&self) -> Network {
        match self {
            Key::Private { network, .. } | Key::Public { network, .. } => *network,
        }
    }

    pub fn compressed(&self) -> bool {
        match self {
            Key::Private { compressed, .. } | Key::Public { compressed, .. } => *compressed,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Key::Private { .. })
    }

    /// Generates a new private key from a cryptographically secure source,
    /// retrying on the measure-zero event that the sampled scalar falls
    /// outside `[1, n-1]`.
    pub fn generate(network: Network) -> Result<Key, KeyError> {
        loop {
            let mut buf = Zeroizing::new([0u8; 32]);
            let mut rng = OsRng;
            rng.try_fill_bytes(buf.as_mut())
                .map_err(|_| KeyError::EntropyUnavailable)?;
            if let Ok(secret) = SecretKey::from_slice(buf.as_ref()) {
                return Ok(Key::Private {
                    secret,
                    compressed: true,
                    network,
                });
            }
        }
    }

    /// The explicit, unambiguous integer/scalar constructor (big-endian
    /// bytes). Use this rather than guessing a decimal string apart from a
    /// short hex string.
    pub fn from_scalar(bytes: &[u8], network: Network, compressed: bool) -> Result<Key, KeyError> {
        let secret = SecretKey::from_slice(bytes).map_err(|_| KeyError::InvalidScalar)?;
        Ok(Key::Private {
            secret,
            compressed,
            network,
        })
    }

    /// Parses a hex string shaped as a 64-hex-character private scalar, a
    /// 66-hex-character compressed public key (`02`/`03` prefix), or a
    /// 130-hex-character uncompressed public key (`04` prefix).
    pub fn from_hex(s: &str, network: Network) -> Result<Key, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::UnrecognizedFormat)?;
        Self::from_bytes(&bytes, network, true)
    }

    /// Parses a raw byte key shaped as a 32-byte private scalar, a 33-byte
    /// compressed public key, or a 65-byte uncompressed public key.
    /// `compressed` only affects the private-scalar case; for public keys
    /// compression is implied by the input length.
    pub fn from_bytes(bytes: &[u8], network: Network, compressed: bool) -> Result<Key, KeyError> {
        match bytes.len() {
            32 => Self::from_scalar(bytes, network, compressed),
            33 if bytes[0] == 0x02 || bytes[0] == 0x03 => Ok(Key::Public {
                public: curve::decompress(bytes)?,
                compressed: true,
                network,
            }),
            65 if bytes[0] == 0x04 => Ok(Key::Public {
                public: curve::decompress(bytes)?,
                compressed: false,
                network,
            }),
            _ => Err(KeyError::UnrecognizedFormat),
        }
    }

    /// Parses a WIF-encoded private key, inferring the network from the
    /// version byte.
    pub fn from_wif(s: &str) -> Result<Key, KeyError> {
        let data = decode_check(s)?;
        if data.len() < 33 {
            return Err(KeyError::UnrecognizedFormat);
        }
        let network = Network::from_wif_version(data[0]).ok_or(KeyError::UnrecognizedFormat)?;
        let rest = &data[1..];
        let (scalar, compressed) = match rest.len() {
            32 => (rest, false),
            33 if rest[32] == 0x01 => (&rest[..32], true),
            _ => return Err(KeyError::UnrecognizedFormat),
        };
        let secret = SecretKey::from_slice(scalar).map_err(|_| KeyError::InvalidScalar)?;
        Ok(Key::Private {
            secret,
            compressed,
            network,
        })
    }

    /// Decrypts a BIP-38 non-EC-multiply encrypted key with `passphrase`.
    pub fn from_bip38(s: &str, passphrase: &str) -> Result<Key, KeyError> {
        bip38::decrypt(s, passphrase)
    }

    /// The single dispatcher: inspects the shape of `s` and delegates to the
    /// matching named parser. `passphrase` is required only for BIP-38
    /// ciphertext input.
    pub fn parse(s: &str, passphrase: Option<&str>) -> Result<Key, KeyError> {
        let is_hex_len = matches!(s.len(), 64 | 66 | 130);
        if is_hex_len && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self::from_hex(s, Network::Bitcoin);
        }

        let data = decode_check(s)?;
        if data.is_empty() {
            return Err(KeyError::UnrecognizedFormat);
        }

        if Network::from_wif_version(data[0]).is_some() {
            return Self::from_wif(s);
        }
        if Network::from_p2pkh_version(data[0]).is_some() {
            // Addresses are outputs, not valid Key inputs.
            return Err(KeyError::UnrecognizedFormat);
        }
        if data.len() >= 2 && data[0] == 0x01 && data[1] == 0x42 {
            return match passphrase {
                Some(pw) => Self::from_bip38(s, pw),
                None => Err(KeyError::InvalidPassphrase),
            };
        }

        Err(KeyError::UnrecognizedFormat)
    }

    /// The private scalar as an unsigned big integer, or `None` if this key
    /// has no private component.
    pub fn private_dec(&self) -> Option<BigUint> {
        self.private_byte().map(|b| BigUint::from_bytes_be(&b))
    }

    /// The private scalar as a 64-character hex string, or `None` if this
    /// key has no private component.
    pub fn private_hex(&self) -> Option<String> {
        self.private_byte().map(hex::encode)
    }

    /// The private scalar as 32 big-endian bytes, or `None` if this key has
    /// no private component.
    pub fn private_byte(&self) -> Option<[u8; 32]> {
        match self {
            Key::Private { secret, .. } => Some(secret.secret_bytes()),
            Key::Public { .. } => None,
        }
    }

    pub(crate) fn public_key(&self) -> PublicKey {
        match self {
            Key::Private { secret, .. } => curve::scalar_mul_base(secret),
            Key::Public { public, .. } => *public,
        }
    }

    /// The same key stripped of any private component, preserving
    /// `compressed` and `network`.
    pub fn public(&self) -> Key {
        Key::Public {
            public: self.public_key(),
            compressed: self.compressed(),
            network: self.network(),
        }
    }

    /// Compressed SEC public key, hex-encoded.
    pub fn public_hex(&self) -> String {
        hex::encode(curve::compress(&self.public_key()))
    }

    /// Uncompressed SEC public key, hex-encoded.
    pub fn public_uncompressed(&self) -> String {
        hex::encode(curve::uncompressed(&self.public_key()))
    }

    /// The affine `(X, Y)` coordinates of the public point.
    pub fn public_point(&self) -> (BigUint, BigUint) {
        curve::point_coordinates(&self.public_key())
    }

    /// HASH160 of the SEC form selected by `compressed`; compressed and
    /// uncompressed forms hash to different values and therefore produce
    /// different addresses.
    pub fn hash160(&self) -> [u8; 20] {
        self.hash160_for(self.compressed())
    }

    fn hash160_for(&self, compressed: bool) -> [u8; 20] {
        let public = self.public_key();
        if compressed {
            hash160(&curve::compress(&public))
        } else {
            hash160(&curve::uncompressed(&public))
        }
    }

    /// Base58Check P2PKH address over the compressed SEC form.
    pub fn address(&self) -> String {
        let mut payload = vec![self.network().p2pkh_version()];
        payload.extend_from_slice(&self.hash160_for(true));
        encode_check(&payload)
    }

    /// Base58Check P2PKH address over the uncompressed SEC form.
    pub fn address_uncompressed(&self) -> String {
        let mut payload = vec![self.network().p2pkh_version()];
        payload.extend_from_slice(&self.hash160_for(false));
        encode_check(&payload)
    }

    /// WIF encoding of the private scalar, or `None` if this key has no
    /// private component.
    pub fn wif(&self) -> Option<String> {
        let secret = self.private_byte()?;
        let mut payload = vec![self.network().wif_version()];
        payload.extend_from_slice(&secret);
        if self.compressed() {
            payload.push(0x01);
        }
        Some(encode_check(&payload))
    }

    /// Encrypts the private scalar as a BIP-38 non-EC-multiply ciphertext.
    pub fn bip38_encrypt(&self, passphrase: &str) -> Result<String, KeyError> {
        bip38::encrypt(self, passphrase)
    }
}
