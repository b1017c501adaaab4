use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("stored password is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("stored password is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Reversible password encoding (standard Base64 of the UTF-8 bytes).
///
/// This is not a hash. Anyone holding a stored value recovers the plaintext
/// with `decode`. It exists so stored records stay compatible with accounts
/// created by earlier deployments of the storefront.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordCodec;

impl PasswordCodec {
    pub fn encode(plaintext: &str) -> String {
        BASE64.encode(plaintext.as_bytes())
    }

    pub fn decode(encoded: &str) -> Result<String, CodecError> {
        let bytes = BASE64.decode(encoded)?;
        Ok(String::from_utf8(bytes)?)
    }

    pub fn verify(plaintext: &str, encoded: &str) -> bool {
        Self::encode(plaintext) == encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_matches_known_base64() {
        assert_eq!(PasswordCodec::encode("12345678"), "MTIzNDU2Nzg=");
        assert_eq!(PasswordCodec::encode("password123"), "cGFzc3dvcmQxMjM=");
        assert_eq!(PasswordCodec::encode(""), "");
    }

    #[test]
    fn decode_recovers_plaintext() {
        for p in ["12345678", "securePass123", "pässwörd ✓", "with:colon and spaces", ""] {
            let encoded = PasswordCodec::encode(p);
            assert_eq!(PasswordCodec::decode(&encoded).unwrap(), p);
        }
    }

    #[test]
    fn verify_compares_encodings() {
        let stored = PasswordCodec::encode("testPassword123");
        assert!(PasswordCodec::verify("testPassword123", &stored));
        assert!(!PasswordCodec::verify("testPassword124", &stored));
        assert!(!PasswordCodec::verify("", &stored));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            PasswordCodec::decode("not base64!!"),
            Err(CodecError::InvalidEncoding(_))
        ));
        // 0xff 0xfe is valid base64 but not UTF-8
        assert!(matches!(
            PasswordCodec::decode("//4="),
            Err(CodecError::InvalidUtf8(_))
        ));
    }
}
