//! secp256k1 point arithmetic, delegated to the `secp256k1` crate (a vetted
//! constant-time implementation) rather than an in-tree ladder.

use num_bigint::BigUint;
use secp256k1::{PublicKey, Scalar, SecretKey, SECP256K1};

use crate::error::KeyError;

/// Computes `k * G` for a private scalar `k`.
pub fn scalar_mul_base(secret: &SecretKey) -> PublicKey {
    PublicKey::from_secret_key(SECP256K1, secret)
}

/// `P + Q` for a point `P` and a scalar tweak `t`, i.e. `P + t*G`.
pub fn point_add_scalar(point: &PublicKey, tweak: &SecretKey) -> Result<PublicKey, KeyError> {
    point
        .add_exp_tweak(SECP256K1, &Scalar::from(*tweak))
        .map_err(|_| KeyError::InvalidPoint)
}

/// `(k + t) mod n` for a private scalar `k` and a scalar tweak `t`.
pub fn scalar_add(scalar: &SecretKey, tweak: &SecretKey) -> Result<SecretKey, KeyError> {
    scalar
        .add_tweak(&Scalar::from(*tweak))
        .map_err(|_| KeyError::InvalidScalar)
}

/// 33-byte compressed SEC encoding: `0x02`/`0x03` ‖ big-endian X.
pub fn compress(point: &PublicKey) -> [u8; 33] {
    point.serialize()
}

/// 65-byte uncompressed SEC encoding: `0x04` ‖ X ‖ Y.
pub fn uncompressed(point: &PublicKey) -> [u8; 65] {
    point.serialize_uncompressed()
}

/// Parses a 33-byte compressed or 65-byte uncompressed SEC encoding.
pub fn decompress(bytes: &[u8]) -> Result<PublicKey, KeyError> {
    PublicKey::from_slice(bytes).map_err(|_| KeyError::InvalidPoint)
}

/// The affine `(X, Y)` coordinates of a point, as unsigned big integers.
pub fn point_coordinates(point: &PublicKey) -> (BigUint, BigUint) {
    let bytes = uncompressed(point);
    let x = BigUint::from_bytes_be(&bytes[1..33]);
    let y = BigUint::from_bytes_be(&bytes[33..65]);
    (x, y)
}
