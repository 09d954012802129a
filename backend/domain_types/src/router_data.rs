use common_enums::AttemptStatus;
use hyperswitch_masking::{ExposeInterface, Secret};

#[derive(Default, Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    HeaderKey {
        api_key: Secret<String>,
    },
    BodyKey {
        api_key: Secret<String>,
        key1: Secret<String>,
    },
    SignatureKey {
        api_key: Secret<String>,
        key1: Secret<String>,
        api_secret: Secret<String>,
    },
    MultiAuthKey {
        api_key: Secret<String>,
        key1: Secret<String>,
        api_secret: Secret<String>,
        key2: Secret<String>,
    },
    #[default]
    NoKey,
}

impl ConnectorAuthType {
    // show only first and last two digits of the key and mask others with *
    // mask the entire key if it's length is less than or equal to 4
    fn mask_key(&self, key: String) -> Secret<String> {
        let key_len = key.len();
        let masked_key = if key_len <= 4 {
            "*".repeat(key_len)
        } else {
            key.chars()
                .enumerate()
                .map(|(index, character)| {
                    if index < 2 || index >= key_len - 2 {
                        character
                    } else {
                        '*'
                    }
                })
                .collect()
        };
        Secret::new(masked_key)
    }

    // Mask the keys in the auth_type
    pub fn get_masked_keys(&self) -> Self {
        match self {
            Self::NoKey => Self::NoKey,
            Self::HeaderKey { api_key } => Self::HeaderKey {
                api_key: self.mask_key(api_key.clone().expose()),
            },
            Self::BodyKey { api_key, key1 } => Self::BodyKey {
                api_key: self.mask_key(api_key.clone().expose()),
                key1: self.mask_key(key1.clone().expose()),
            },
            Self::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Self::SignatureKey {
                api_key: self.mask_key(api_key.clone().expose()),
                key1: self.mask_key(key1.clone().expose()),
                api_secret: self.mask_key(api_secret.clone().expose()),
            },
            Self::MultiAuthKey {
                api_key,
                key1,
                api_secret,
                key2,
            } => Self::MultiAuthKey {
                api_key: self.mask_key(api_key.clone().expose()),
                key1: self.mask_key(key1.clone().expose()),
                api_secret: self.mask_key(api_secret.clone().expose()),
                key2: self.mask_key(key2.clone().expose()),
            },
        }
    }

    /// Every credential value, for literal scrubbing of captured traffic
    pub fn secret_values(&self) -> Vec<String> {
        match self {
            Self::NoKey => vec![],
            Self::HeaderKey { api_key } => vec![api_key.clone().expose()],
            Self::BodyKey { api_key, key1 } => {
                vec![api_key.clone().expose(), key1.clone().expose()]
            }
            Self::SignatureKey {
                api_key,
                api_secret,
                ..
            } => vec![api_key.clone().expose(), api_secret.clone().expose()],
            Self::MultiAuthKey {
                api_key,
                api_secret,
                ..
            } => vec![api_key.clone().expose(), api_secret.clone().expose()],
        }
    }
}

/// A processor error decoded from a non 2xx reply
#[derive(Clone, Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub reason: Option<String>,
    pub status_code: u16,
    pub attempt_status: Option<AttemptStatus>,
    pub connector_transaction_id: Option<String>,
    /// Every field of the parsed error body
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl Default for ErrorResponse {
    fn default() -> Self {
        Self {
            code: common_utils::consts::NO_ERROR_CODE.to_string(),
            message: common_utils::consts::NO_ERROR_MESSAGE.to_string(),
            reason: None,
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            attempt_status: None,
            connector_transaction_id: None,
            params: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use hyperswitch_masking::PeekInterface;

    use super::*;

    #[test]
    fn masked_keys_keep_two_characters_at_each_end() {
        let auth = ConnectorAuthType::BodyKey {
            api_key: Secret::new("abcdefgh".to_string()),
            key1: Secret::new("xyz".to_string()),
        };
        match auth.get_masked_keys() {
            ConnectorAuthType::BodyKey { api_key, key1 } => {
                assert_eq!(api_key.peek(), "ab****gh");
                assert_eq!(key1.peek(), "***");
            }
            other => panic!("unexpected auth type {other:?}"),
        }
    }

    #[test]
    fn auth_type_deserializes_from_tagged_json() {
        let auth: ConnectorAuthType = serde_json::from_value(serde_json::json!({
            "auth_type": "SignatureKey",
            "api_key": "user",
            "key1": "merchant",
            "api_secret": "pass"
        }))
        .unwrap();
        assert_eq!(auth.secret_values(), vec!["user".to_string(), "pass".to_string()]);
    }
}
