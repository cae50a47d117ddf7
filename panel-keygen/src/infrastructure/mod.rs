pub mod base64url;
pub mod ml_kem;
pub mod short_id;
pub mod x25519;
