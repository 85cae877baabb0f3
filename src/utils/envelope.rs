use crate::domain::model::EncryptedEnvelope;
use crate::utils::error::{Result, ScoutError};
use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as B64, Engine as _};
use rand::RngCore;
use rsa::pkcs8::DecodePublicKey;
use rsa::sha2::Sha256;
use rsa::{Oaep, RsaPublicKey};

/// JWE 標頭，固定使用 RSA-OAEP-256 + A256GCM
const PROTECTED_HEADER: &str = r#"{"alg":"RSA-OAEP-256","enc":"A256GCM"}"#;

const CEK_LEN: usize = 32;
const IV_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// 持有伺服器公鑰，於啟動時載入一次
pub struct Sealer {
    public_key: RsaPublicKey,
}

impl Sealer {
    pub fn from_pem(pem: &str) -> Result<Self> {
        let public_key =
            RsaPublicKey::from_public_key_pem(pem).map_err(|e| ScoutError::ConfigError {
                message: format!("invalid public key PEM: {}", e),
            })?;
        Ok(Self { public_key })
    }

    pub fn from_pem_file(path: &std::path::Path) -> Result<Self> {
        let pem = std::fs::read_to_string(path)?;
        Self::from_pem(&pem)
    }

    /// 將明文封裝成五段式加密信封
    pub fn seal(&self, plaintext: &[u8]) -> Result<EncryptedEnvelope> {
        let mut rng = rand::thread_rng();

        let mut cek = [0u8; CEK_LEN];
        rng.fill_bytes(&mut cek);
        let mut iv = [0u8; IV_LEN];
        rng.fill_bytes(&mut iv);

        let protected = B64.encode(PROTECTED_HEADER.as_bytes());

        // 內容金鑰以 RSA-OAEP-SHA256 加密
        let encrypted_key = self
            .public_key
            .encrypt(&mut rng, Oaep::new::<Sha256>(), &cek)
            .map_err(|e| ScoutError::EnvelopeError {
                message: format!("RSA-OAEP encryption failed: {}", e),
            })?;

        // 內容以 AES-256-GCM 加密，AAD 為 protected 標頭
        let cipher = Aes256Gcm::new_from_slice(&cek).map_err(|e| ScoutError::EnvelopeError {
            message: format!("invalid content key: {}", e),
        })?;
        let sealed = cipher
            .encrypt(
                Nonce::from_slice(&iv),
                Payload {
                    msg: plaintext,
                    aad: protected.as_bytes(),
                },
            )
            .map_err(|_| ScoutError::EnvelopeError {
                message: "AES-GCM encryption failed".to_string(),
            })?;

        let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

        Ok(EncryptedEnvelope {
            protected,
            encrypted_key: B64.encode(encrypted_key),
            iv: B64.encode(iv),
            ciphertext: B64.encode(ciphertext),
            tag: B64.encode(tag),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs8::EncodePublicKey;
    use rsa::RsaPrivateKey;

    fn open(private_key: &RsaPrivateKey, envelope: &EncryptedEnvelope) -> Vec<u8> {
        let cek = private_key
            .decrypt(
                Oaep::new::<Sha256>(),
                &B64.decode(&envelope.encrypted_key).unwrap(),
            )
            .unwrap();

        let mut sealed = B64.decode(&envelope.ciphertext).unwrap();
        sealed.extend_from_slice(&B64.decode(&envelope.tag).unwrap());

        let cipher = Aes256Gcm::new_from_slice(&cek).unwrap();
        cipher
            .decrypt(
                Nonce::from_slice(&B64.decode(&envelope.iv).unwrap()),
                Payload {
                    msg: &sealed,
                    aad: envelope.protected.as_bytes(),
                },
            )
            .unwrap()
    }

    fn test_keypair() -> (RsaPrivateKey, String) {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
        let pem = private_key
            .to_public_key()
            .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
            .unwrap();
        (private_key, pem)
    }

    #[test]
    fn test_seal_and_open_roundtrip() {
        let (private_key, pem) = test_keypair();
        let sealer = Sealer::from_pem(&pem).unwrap();

        let plaintext = br#"{"data":[{"name":"Cafe","distance_km":0.42}]}"#;
        let envelope = sealer.seal(plaintext).unwrap();

        assert_eq!(open(&private_key, &envelope), plaintext.to_vec());
    }

    #[test]
    fn test_protected_header_declares_algorithms() {
        let (_, pem) = test_keypair();
        let sealer = Sealer::from_pem(&pem).unwrap();

        let envelope = sealer.seal(b"{}").unwrap();
        let header = B64.decode(&envelope.protected).unwrap();
        let header: serde_json::Value = serde_json::from_slice(&header).unwrap();

        assert_eq!(header["alg"], "RSA-OAEP-256");
        assert_eq!(header["enc"], "A256GCM");
    }

    #[test]
    fn test_segments_are_base64url_without_padding() {
        let (_, pem) = test_keypair();
        let sealer = Sealer::from_pem(&pem).unwrap();

        let envelope = sealer.seal(b"hello").unwrap();
        for segment in [
            &envelope.protected,
            &envelope.encrypted_key,
            &envelope.iv,
            &envelope.ciphertext,
            &envelope.tag,
        ] {
            assert!(!segment.contains('='));
            assert!(!segment.contains('+'));
            assert!(!segment.contains('/'));
        }
    }

    #[test]
    fn test_invalid_pem_is_rejected() {
        assert!(Sealer::from_pem("not a pem").is_err());
    }
}
