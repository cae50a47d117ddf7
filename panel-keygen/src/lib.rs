//! Key material for panel connection profiles: X25519 key pairs for
//! Reality, ML-KEM-768 key pairs, short IDs, and the base64url encoding they
//! are exchanged in.

pub mod application_service;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application_service::key_material_service::{
    DefaultKeyMaterialService, KeyMaterialError, KeyMaterialService,
};
pub use domain::key_material::{EncapsulationKeyPair, KeyPair, RealityKeyMaterial};
pub use domain::short_id::ShortId;
pub use infrastructure::base64url::{decode_base64url, encode_base64url, DecodeError};
