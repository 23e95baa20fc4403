mod common;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use multicipher_core::constants::cipher_ids;
    use multicipher_core::telemetry::TelemetrySnapshot;
    use multicipher_core::{CipherSession, MultiCipherReader};

    use crate::common;

    #[test]
    fn successful_decode_counts_header_and_bytes() {
        let session = common::session();
        let bytes = common::encode_stream(
            b"counted payload",
            &[cipher_ids::AES256_GCM, cipher_ids::CHACHA20_POLY1305],
            &session,
        );

        let mut reader = MultiCipherReader::new(Cursor::new(bytes), &session);
        let mut out = Vec::new();
        let mut buf = [0u8; 8];
        loop {
            let n = reader.read_bytes(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }

        let c = reader.counters();
        assert_eq!(c.headers_parsed, 1);
        assert_eq!(c.chain_stages, 2);
        assert_eq!(c.bytes_plaintext, b"counted payload".len() as u64);
        assert_eq!(c.failures(), 0);
    }

    #[test]
    fn header_tag_failure_is_classified() {
        let session = common::session();
        let bytes = common::encode_stream(b"x", &[cipher_ids::AES128_GCM], &session);

        let wrong = CipherSession::new("wrong password");
        let mut reader = MultiCipherReader::new(Cursor::new(bytes), &wrong);
        assert!(reader.read_byte().is_err());

        let c = reader.counters();
        assert_eq!(c.headers_parsed, 0);
        assert_eq!(c.header_tag_failures, 1);
        assert_eq!(c.payload_tag_failures, 0);
    }

    #[test]
    fn payload_tag_failure_is_classified() {
        let session = common::session();
        let ids = [cipher_ids::AES256_GCM];
        let mut bytes = common::encode_stream(b"abcdef", &ids, &session);
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let mut reader = MultiCipherReader::new(Cursor::new(bytes), &session);
        assert!(reader.read_byte().is_err());

        let c = reader.counters();
        assert_eq!(c.headers_parsed, 1);
        assert_eq!(c.payload_tag_failures, 1);
        assert_eq!(c.bytes_plaintext, 0);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let session = common::session();
        let bytes = common::encode_stream(b"snap", &[], &session);

        let mut reader = MultiCipherReader::new(Cursor::new(bytes), &session);
        let mut out = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut out).unwrap();

        let snapshot = TelemetrySnapshot::from(reader.counters(), reader.elapsed_secs());
        assert_eq!(snapshot.bytes_plaintext, 4);
        assert_eq!(snapshot.headers_parsed, 1);

        let json = snapshot.to_json();
        assert!(json.contains("\"bytes_plaintext\":4"));

        let parsed: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
