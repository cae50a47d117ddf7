use rand_core::{OsRng, RngCore};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::domain::primitive::{InvalidKeyError, KeyAgreementCurve};

pub const X25519_KEY_LEN: usize = 32;

/// Curve25519 in Montgomery form, as used by Reality and WireGuard.
#[derive(Debug, Default, Clone, Copy)]
pub struct X25519Curve;

impl X25519Curve {
    /// RFC 7748 clamping, so the exported private key is exactly the scalar
    /// the multiplication uses.
    fn clamp(scalar: &mut [u8; X25519_KEY_LEN]) {
        scalar[0] &= 248;
        scalar[31] &= 127;
        scalar[31] |= 64;
    }
}

impl KeyAgreementCurve for X25519Curve {
    fn name(&self) -> &'static str {
        "x25519"
    }

    fn private_key_len(&self) -> usize {
        X25519_KEY_LEN
    }

    fn generate_private_key(&self) -> Zeroizing<Vec<u8>> {
        let mut scalar = Zeroizing::new([0u8; X25519_KEY_LEN]);
        OsRng.fill_bytes(&mut *scalar);
        Self::clamp(&mut scalar);
        Zeroizing::new(scalar.to_vec())
    }

    fn derive_public_key(&self, private_key: &[u8]) -> Result<Vec<u8>, InvalidKeyError> {
        let scalar: [u8; X25519_KEY_LEN] =
            private_key.try_into().map_err(|_| InvalidKeyError {
                expected: X25519_KEY_LEN,
                actual: private_key.len(),
            })?;
        let secret = StaticSecret::from(scalar);
        Ok(PublicKey::from(&secret).as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(value: &str) -> Vec<u8> {
        (0..value.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&value[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn derives_rfc7748_test_vector() {
        // RFC 7748 section 6.1, Alice
        let private_key =
            hex("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
        let expected =
            hex("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");

        let public_key = X25519Curve.derive_public_key(&private_key).unwrap();
        assert_eq!(public_key, expected);
    }

    #[test]
    fn generated_private_key_is_clamped() {
        for _ in 0..32 {
            let key = X25519Curve.generate_private_key();
            assert_eq!(key.len(), X25519_KEY_LEN);
            assert_eq!(key[0] & 7, 0);
            assert_eq!(key[31] & 128, 0);
            assert_eq!(key[31] & 64, 64);
        }
    }

    #[test]
    fn clamping_does_not_change_the_public_key() {
        let mut raw = [0xa5u8; X25519_KEY_LEN];
        let unclamped = X25519Curve.derive_public_key(&raw).unwrap();
        X25519Curve::clamp(&mut raw);
        assert_eq!(X25519Curve.derive_public_key(&raw).unwrap(), unclamped);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = X25519Curve.derive_public_key(&[1u8; 31]).unwrap_err();
        assert_eq!(
            err,
            InvalidKeyError {
                expected: 32,
                actual: 31
            }
        );
        assert!(X25519Curve.derive_public_key(&[]).is_err());
    }
}
