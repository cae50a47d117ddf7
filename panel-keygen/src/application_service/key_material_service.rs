use std::collections::HashSet;

use crate::domain::key_material::{EncapsulationKeyPair, KeyPair, RealityKeyMaterial};
use crate::domain::primitive::{
    EncapsulationPrimitive, InvalidKeyError, KeyAgreementCurve, KeyExportFormat,
    KeyGenerationError, KeyUsage,
};
use crate::domain::short_id::{ShortId, ShortIdGenerator, MAX_SHORT_ID_BATCH};
use crate::infrastructure::base64url::{decode_base64url, encode_base64url, DecodeError};
use crate::infrastructure::ml_kem::MlKem768Primitive;
use crate::infrastructure::short_id::OsRngShortIdGenerator;
use crate::infrastructure::x25519::X25519Curve;

#[derive(Debug, thiserror::Error)]
pub enum KeyMaterialError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),

    #[error(transparent)]
    KeyGeneration(#[from] KeyGenerationError),

    #[error("short id count {requested} exceeds the limit of {max}")]
    TooManyShortIds { requested: usize, max: usize },
}

/// Generates the key material that goes into server connection profiles.
///
/// Every operation is single shot and keeps no state between calls, so one
/// instance can be shared freely across tasks.
pub struct KeyMaterialService<C, P, S>
where
    C: KeyAgreementCurve,
    P: EncapsulationPrimitive,
    S: ShortIdGenerator,
{
    pub curve: C,
    pub kem: P,
    pub short_id_generator: S,
}

pub type DefaultKeyMaterialService =
    KeyMaterialService<X25519Curve, MlKem768Primitive, OsRngShortIdGenerator>;

impl Default for DefaultKeyMaterialService {
    fn default() -> Self {
        Self {
            curve: X25519Curve,
            kem: MlKem768Primitive,
            short_id_generator: OsRngShortIdGenerator,
        }
    }
}

impl<C, P, S> KeyMaterialService<C, P, S>
where
    C: KeyAgreementCurve,
    P: EncapsulationPrimitive,
    S: ShortIdGenerator,
{
    pub fn generate_key_pair(&self) -> Result<KeyPair, KeyMaterialError> {
        let private_key = self.curve.generate_private_key();
        let public_key = self.curve.derive_public_key(&private_key)?;
        tracing::debug!(curve = self.curve.name(), "generated key pair");

        Ok(KeyPair {
            private_key: encode_base64url(&private_key),
            public_key: encode_base64url(&public_key),
        })
    }

    pub fn public_key_from_private(&self, private_key: &str) -> Result<String, KeyMaterialError> {
        let private_key = zeroize::Zeroizing::new(decode_base64url(private_key)?);
        let public_key = self.curve.derive_public_key(&private_key)?;
        Ok(encode_base64url(&public_key))
    }

    pub async fn generate_encapsulation_key_pair(
        &self,
    ) -> Result<EncapsulationKeyPair, KeyMaterialError> {
        let key_pair = self
            .kem
            .generate_key_pair(&[KeyUsage::Encapsulate, KeyUsage::Decapsulate])
            .await?;
        let public_key = self.kem.export_key(&key_pair, KeyExportFormat::RawPublic)?;
        let seed = self.kem.export_key(&key_pair, KeyExportFormat::RawSeed)?;
        tracing::debug!(algorithm = self.kem.algorithm(), "generated encapsulation key pair");

        Ok(EncapsulationKeyPair {
            public_key: encode_base64url(&public_key),
            private_key: encode_base64url(&seed),
        })
    }

    pub fn generate_short_id(&self) -> ShortId {
        self.short_id_generator.generate()
    }

    /// Returns `count` pairwise distinct short IDs, `count` at most
    /// `MAX_SHORT_ID_BATCH`.
    pub fn generate_short_ids(&self, count: usize) -> Result<Vec<ShortId>, KeyMaterialError> {
        if count > MAX_SHORT_ID_BATCH {
            return Err(KeyMaterialError::TooManyShortIds {
                requested: count,
                max: MAX_SHORT_ID_BATCH,
            });
        }
        let mut seen = HashSet::with_capacity(count);
        let mut short_ids = Vec::with_capacity(count);
        while short_ids.len() < count {
            let id = self.short_id_generator.generate();
            if seen.insert(id.clone()) {
                short_ids.push(id);
            }
        }
        tracing::debug!(count, "generated short ids");
        Ok(short_ids)
    }

    /// Builds the key material for a Reality inbound.
    ///
    /// With `private_key` the existing key is kept and only its public half
    /// is derived; otherwise a fresh pair is generated.
    pub fn reality_key_material(
        &self,
        short_id_count: usize,
        private_key: Option<&str>,
    ) -> Result<RealityKeyMaterial, KeyMaterialError> {
        let key_pair = match private_key {
            Some(private_key) => KeyPair {
                public_key: self.public_key_from_private(private_key)?,
                private_key: private_key.to_string(),
            },
            None => self.generate_key_pair()?,
        };

        Ok(RealityKeyMaterial {
            key_pair,
            short_ids: self.generate_short_ids(short_id_count)?,
        })
    }
}
