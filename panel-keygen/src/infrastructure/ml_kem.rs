//! ML-KEM-768 (FIPS 203) backed by the `ml-kem` crate.
//!
//! Key pairs are expanded from a 64 byte seed `d || z` drawn from the OS
//! random source. The seed is what gets exported as the private key; the
//! decapsulation key is re-derived from it on the consuming side.

use async_trait::async_trait;
use ml_kem::{EncodedSizeUser, KemCore, MlKem768, B32};
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

use crate::domain::primitive::{
    EncapsulationPrimitive, KeyExportFormat, KeyGenerationError, KeyUsage,
};

pub const ML_KEM_768_PUBLIC_KEY_LEN: usize = 1184;
pub const ML_KEM_SEED_LEN: usize = 64;

type EncapsulationKey = <MlKem768 as KemCore>::EncapsulationKey;

pub struct MlKem768KeyPair {
    seed: Zeroizing<[u8; ML_KEM_SEED_LEN]>,
    encapsulation_key: EncapsulationKey,
    usages: Vec<KeyUsage>,
}

impl MlKem768KeyPair {
    pub fn usages(&self) -> &[KeyUsage] {
        &self.usages
    }

    fn expand(seed: Zeroizing<[u8; ML_KEM_SEED_LEN]>, usages: Vec<KeyUsage>) -> Self {
        let (d, z) = split_seed(&seed);
        let (_decapsulation_key, encapsulation_key) = MlKem768::generate_deterministic(&d, &z);
        Self {
            seed,
            encapsulation_key,
            usages,
        }
    }
}

fn split_seed(seed: &[u8; ML_KEM_SEED_LEN]) -> (B32, B32) {
    let mut d = [0u8; 32];
    let mut z = [0u8; 32];
    d.copy_from_slice(&seed[..32]);
    z.copy_from_slice(&seed[32..]);
    (B32::from(d), B32::from(z))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MlKem768Primitive;

#[async_trait]
impl EncapsulationPrimitive for MlKem768Primitive {
    type KeyPair = MlKem768KeyPair;

    fn algorithm(&self) -> &'static str {
        "ML-KEM-768"
    }

    async fn generate_key_pair(
        &self,
        usages: &[KeyUsage],
    ) -> Result<MlKem768KeyPair, KeyGenerationError> {
        if usages.is_empty() {
            return Err(KeyGenerationError::Usage(
                "at least one of encapsulate/decapsulate is required".to_string(),
            ));
        }
        let usages = usages.to_vec();

        // matrix expansion is CPU bound, keep it off the async workers
        tokio::task::spawn_blocking(move || {
            let mut seed = Zeroizing::new([0u8; ML_KEM_SEED_LEN]);
            OsRng
                .try_fill_bytes(&mut *seed)
                .map_err(|e| KeyGenerationError::Unavailable(e.to_string()))?;
            Ok(MlKem768KeyPair::expand(seed, usages))
        })
        .await
        .map_err(|e| KeyGenerationError::Unavailable(format!("key generation task failed: {e}")))?
    }

    fn export_key(
        &self,
        key_pair: &MlKem768KeyPair,
        format: KeyExportFormat,
    ) -> Result<Zeroizing<Vec<u8>>, KeyGenerationError> {
        match format {
            KeyExportFormat::RawPublic => Ok(Zeroizing::new(
                key_pair.encapsulation_key.as_bytes().as_slice().to_vec(),
            )),
            KeyExportFormat::RawSeed => {
                if !key_pair.usages.contains(&KeyUsage::Decapsulate) {
                    return Err(KeyGenerationError::Export(
                        "seed export requires the decapsulate usage".to_string(),
                    ));
                }
                Ok(Zeroizing::new(key_pair.seed.to_vec()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ml_kem::kem::{Decapsulate, Encapsulate};

    const BOTH: [KeyUsage; 2] = [KeyUsage::Encapsulate, KeyUsage::Decapsulate];

    #[tokio::test]
    async fn exports_have_fips203_sizes() {
        let kem = MlKem768Primitive;
        let key_pair = kem.generate_key_pair(&BOTH).await.unwrap();

        let public_key = kem.export_key(&key_pair, KeyExportFormat::RawPublic).unwrap();
        let seed = kem.export_key(&key_pair, KeyExportFormat::RawSeed).unwrap();

        assert_eq!(public_key.len(), ML_KEM_768_PUBLIC_KEY_LEN);
        assert_eq!(seed.len(), ML_KEM_SEED_LEN);
    }

    #[tokio::test]
    async fn exported_seed_reproduces_a_working_key_pair() {
        let kem = MlKem768Primitive;
        let key_pair = kem.generate_key_pair(&BOTH).await.unwrap();
        let public_key = kem.export_key(&key_pair, KeyExportFormat::RawPublic).unwrap();
        let seed = kem.export_key(&key_pair, KeyExportFormat::RawSeed).unwrap();

        let mut seed_array = [0u8; ML_KEM_SEED_LEN];
        seed_array.copy_from_slice(&seed);
        let (d, z) = split_seed(&seed_array);
        let (dk, ek) = MlKem768::generate_deterministic(&d, &z);
        assert_eq!(ek.as_bytes().as_slice(), public_key.as_slice());

        let (ciphertext, sender_secret) = ek.encapsulate(&mut OsRng).unwrap();
        let receiver_secret = dk.decapsulate(&ciphertext).unwrap();
        assert_eq!(sender_secret, receiver_secret);
    }

    #[tokio::test]
    async fn two_generations_differ() {
        let kem = MlKem768Primitive;
        let first = kem.generate_key_pair(&BOTH).await.unwrap();
        let second = kem.generate_key_pair(&BOTH).await.unwrap();

        assert_ne!(
            kem.export_key(&first, KeyExportFormat::RawSeed).unwrap().as_slice(),
            kem.export_key(&second, KeyExportFormat::RawSeed).unwrap().as_slice()
        );
    }

    #[tokio::test]
    async fn seed_export_requires_decapsulate_usage() {
        let kem = MlKem768Primitive;
        let key_pair = kem
            .generate_key_pair(&[KeyUsage::Encapsulate])
            .await
            .unwrap();

        assert!(kem.export_key(&key_pair, KeyExportFormat::RawPublic).is_ok());
        assert!(matches!(
            kem.export_key(&key_pair, KeyExportFormat::RawSeed),
            Err(KeyGenerationError::Export(_))
        ));
    }

    #[tokio::test]
    async fn empty_usages_are_rejected() {
        let result = MlKem768Primitive.generate_key_pair(&[]).await;
        assert!(matches!(result, Err(KeyGenerationError::Usage(_))));
    }
}
