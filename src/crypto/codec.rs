// Base64 envelope for cookie payloads (standard alphabet, padded).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn encode(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

pub fn decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_payload_triple() {
        assert_eq!(
            encode(b"testuser|DIXXXXXXXXXXXXXXXXXX|1300158099"),
            "dGVzdHVzZXJ8RElYWFhYWFhYWFhYWFhYWFhYWFh8MTMwMDE1ODA5OQ=="
        );
    }

    #[test]
    fn decodes_payload_triple() {
        let bytes = decode("dGVzdHVzZXJ8RElYWFhYWFhYWFhYWFhYWFhYWFh8MTMwMDE2MTM5OQ==").unwrap();
        assert_eq!(bytes, b"testuser|DIXXXXXXXXXXXXXXXXXX|1300161399");
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(decode("INVALID").is_err());
        assert!(decode("not base64!").is_err());
    }

    #[test]
    fn rejects_url_safe_alphabet() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet
        assert_eq!(encode(&[0xfb, 0xff]), "+/8=");
        assert!(decode("-_8=").is_err());
    }
}
