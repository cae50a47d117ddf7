use serde::{Deserialize, Serialize};

use crate::domain::short_id::ShortId;

/// Key agreement key pair, both halves base64url encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub private_key: String,
    pub public_key: String,
}

/// Key encapsulation key pair.
///
/// `private_key` is the exported seed, not the expanded decapsulation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncapsulationKeyPair {
    pub public_key: String,
    pub private_key: String,
}

/// Everything a Reality inbound needs from the key generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealityKeyMaterial {
    pub key_pair: KeyPair,
    pub short_ids: Vec<ShortId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_pair_serializes_with_snake_case_fields() {
        let key_pair = KeyPair {
            private_key: "cHJpdmF0ZQ".into(),
            public_key: "cHVibGlj".into(),
        };
        let json = serde_json::to_string(&key_pair).unwrap();
        assert!(json.contains("\"private_key\":\"cHJpdmF0ZQ\""));
        assert!(json.contains("\"public_key\":\"cHVibGlj\""));
    }

    #[test]
    fn reality_key_material_serializes_short_ids_as_strings() {
        let material = RealityKeyMaterial {
            key_pair: KeyPair {
                private_key: "a".into(),
                public_key: "b".into(),
            },
            short_ids: vec![ShortId::parse("0a1b").unwrap()],
        };
        let json = serde_json::to_string(&material).unwrap();
        assert!(json.contains("\"short_ids\":[\"0a1b\"]"));
    }
}
