//! Login tokens
//!
//! A login token carries a [`MiniUser`] through a cookie. The payload is
//! masked with a SHA-256 keystream derived from the configured secret and
//! tagged so that a tampered or foreign token is rejected.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::debug_log;
use crate::models::MiniUser;

const NONCE_LEN: usize = 16;
const TAG_LEN: usize = 16;

/// Issues and validates login tokens
#[derive(Clone)]
pub struct TokenCipher {
    key: [u8; 32],
}

impl std::fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCipher").finish_non_exhaustive()
    }
}

impl TokenCipher {
    pub fn new(secret: &str) -> Self {
        Self {
            key: Sha256::digest(secret.as_bytes()).into(),
        }
    }

    /// Encode `user` as a login token
    pub fn get_login_token(&self, user: &MiniUser) -> String {
        // MiniUser holds only strings and a bool
        let payload = serde_json::to_vec(user).unwrap_or_default();
        let nonce: [u8; NONCE_LEN] = rand::random();

        let mut token = Vec::with_capacity(NONCE_LEN + payload.len() + TAG_LEN);
        token.extend_from_slice(&nonce);
        token.extend(self.apply_keystream(&nonce, &payload));
        let tag = self.tag(&nonce, &token[NONCE_LEN..]);
        token.extend_from_slice(&tag);

        URL_SAFE_NO_PAD.encode(token)
    }

    /// Decode a login token, or `None` if it is malformed, tampered with or
    /// issued under another secret.
    pub fn validate_token(&self, token: &str) -> Option<MiniUser> {
        let bytes = match URL_SAFE_NO_PAD.decode(token.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug_log!("Rejected login token: {}", e);
                return None;
            }
        };
        if bytes.len() < NONCE_LEN + TAG_LEN {
            debug_log!("Rejected login token: too short");
            return None;
        }

        let (nonce, rest) = bytes.split_at(NONCE_LEN);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);
        if self.tag(nonce, ciphertext) != tag {
            debug_log!("Rejected login token: tag mismatch");
            return None;
        }

        let payload = self.apply_keystream(nonce, ciphertext);
        match serde_json::from_slice(&payload) {
            Ok(user) => Some(user),
            Err(e) => {
                debug_log!("Rejected login token payload: {}", e);
                None
            }
        }
    }

    fn apply_keystream(&self, nonce: &[u8], data: &[u8]) -> Vec<u8> {
        data.chunks(32)
            .enumerate()
            .flat_map(|(counter, chunk)| {
                let block = Sha256::new()
                    .chain_update(self.key)
                    .chain_update(nonce)
                    .chain_update((counter as u64).to_be_bytes())
                    .finalize();
                chunk
                    .iter()
                    .zip(block)
                    .map(|(byte, mask)| byte ^ mask)
                    .collect::<Vec<u8>>()
            })
            .collect()
    }

    fn tag(&self, nonce: &[u8], ciphertext: &[u8]) -> [u8; TAG_LEN] {
        let digest = Sha256::new()
            .chain_update(self.key)
            .chain_update(nonce)
            .chain_update(ciphertext)
            .finalize();
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&digest[..TAG_LEN]);
        tag
    }
}
