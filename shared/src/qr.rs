//! Per-table QR token codec
//!
//! The token printed inside a table's QR code is the base64 (URL-safe,
//! unpadded) encoding of `table:{table_id}`. Decoding it server-side
//! resolves the table and drives order activation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;

const TOKEN_PREFIX: &str = "table:";

/// QR token decode errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QrTokenError {
    #[error("Token is not valid base64")]
    InvalidEncoding,

    #[error("Token payload is not valid UTF-8")]
    InvalidPayload,

    #[error("Token does not identify a table")]
    WrongKind,
}

/// Encode a table id into a QR token
pub fn encode_table_token(table_id: &str) -> String {
    URL_SAFE_NO_PAD.encode(format!("{TOKEN_PREFIX}{table_id}"))
}

/// Decode a QR token back into a table id
pub fn decode_table_token(token: &str) -> Result<String, QrTokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.as_bytes())
        .map_err(|_| QrTokenError::InvalidEncoding)?;
    let payload = String::from_utf8(bytes).map_err(|_| QrTokenError::InvalidPayload)?;
    let table_id = payload
        .strip_prefix(TOKEN_PREFIX)
        .ok_or(QrTokenError::WrongKind)?;
    if table_id.is_empty() {
        return Err(QrTokenError::WrongKind);
    }
    Ok(table_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let token = encode_table_token("9f8a7b6c");
        assert_eq!(decode_table_token(&token).unwrap(), "9f8a7b6c");
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode_table_token("a-table-id-with-many-characters-0123456789");
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            decode_table_token("not base64!!"),
            Err(QrTokenError::InvalidEncoding)
        );
    }

    #[test]
    fn test_rejects_wrong_kind() {
        let token = URL_SAFE_NO_PAD.encode("order:abc");
        assert_eq!(decode_table_token(&token), Err(QrTokenError::WrongKind));

        let empty = URL_SAFE_NO_PAD.encode("table:");
        assert_eq!(decode_table_token(&empty), Err(QrTokenError::WrongKind));
    }
}
