use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, OsRng},
    AeadCore, Aes256Gcm, Key, KeyInit,
};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const NONCE_LEN: usize = 12;

/// What travels through the provider in the OAuth `state` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthState {
    pub id: String,
    pub return_to: String,
}

impl OAuthState {
    pub fn new(return_to: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            return_to: return_to.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum OAuthStateError {
    #[error("invalid state key")]
    InvalidKey,
    #[error("invalid state")]
    Invalid,
}

/// Seals `OAuthState` with AES-256-GCM so it cannot be forged or read in transit.
///
/// Sealed form: base64url(nonce || ciphertext), unpadded.
pub struct StateSealer {
    cipher: Aes256Gcm,
}

impl StateSealer {
    pub fn from_base64_key(key_b64: &str) -> Result<Self, OAuthStateError> {
        let key_bytes = BASE64_STANDARD
            .decode(key_b64.trim())
            .map_err(|_| OAuthStateError::InvalidKey)?;
        if key_bytes.len() != 32 {
            return Err(OAuthStateError::InvalidKey);
        }
        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);

        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    pub fn seal(&self, state: &OAuthState) -> Result<String, OAuthStateError> {
        let plaintext = serde_json::to_vec(state).map_err(|_| OAuthStateError::Invalid)?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_ref())
            .map_err(|_| OAuthStateError::Invalid)?;

        let mut sealed = nonce.to_vec();
        sealed.extend_from_slice(&ciphertext);
        Ok(BASE64_URL_SAFE_NO_PAD.encode(sealed))
    }

    pub fn open(&self, sealed: &str) -> Result<OAuthState, OAuthStateError> {
        let bytes = BASE64_URL_SAFE_NO_PAD
            .decode(sealed)
            .map_err(|_| OAuthStateError::Invalid)?;
        if bytes.len() <= NONCE_LEN {
            return Err(OAuthStateError::Invalid);
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let nonce = GenericArray::from_slice(nonce_bytes);
        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| OAuthStateError::Invalid)?;

        let state: OAuthState =
            serde_json::from_slice(&plaintext).map_err(|_| OAuthStateError::Invalid)?;
        if state.return_to.is_empty() {
            return Err(OAuthStateError::Invalid);
        }

        Ok(state)
    }
}
