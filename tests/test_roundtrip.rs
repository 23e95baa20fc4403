// End-to-end encode/decode suite across chain lengths 0..=3, plus payload
// tamper detection and the reversed-chain negative case.

mod common;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use multicipher_core::constants::cipher_ids;
    use multicipher_core::header::decode_stream_header;
    use multicipher_core::{
        CipherSession, DecryptChain, IntegrityError, MultiCipherReader, StreamError,
    };

    use crate::common;

    fn payload() -> Vec<u8> {
        (0u16..600).map(|i| (i % 251) as u8).collect()
    }

// 1. Round trips

    #[test]
    fn roundtrip_every_single_cipher() {
        let session = common::session();
        for id in [
            cipher_ids::AES128_GCM,
            cipher_ids::AES256_GCM,
            cipher_ids::CHACHA20_POLY1305,
            cipher_ids::XCHACHA20_POLY1305,
        ] {
            let bytes = common::encode_stream(&payload(), &[id], &session);
            assert_eq!(
                common::decode_stream(&bytes, &session).unwrap(),
                payload(),
                "cipher id 0x{:02x}",
                id
            );
        }
    }

    #[test]
    fn roundtrip_chain_lengths_zero_to_three() {
        let session = common::session();
        let chains: [&[u8]; 4] = [
            &[],
            &[cipher_ids::CHACHA20_POLY1305],
            &[cipher_ids::AES256_GCM, cipher_ids::XCHACHA20_POLY1305],
            &[
                cipher_ids::AES128_GCM,
                cipher_ids::CHACHA20_POLY1305,
                cipher_ids::AES256_GCM,
            ],
        ];
        for ids in chains {
            let bytes = common::encode_stream(&payload(), ids, &session);
            assert_eq!(
                common::decode_stream(&bytes, &session).unwrap(),
                payload(),
                "chain {:?}",
                ids
            );
        }
    }

    #[test]
    fn roundtrip_repeated_cipher_uses_distinct_salts() {
        let session = common::session();
        let ids = [cipher_ids::AES256_GCM, cipher_ids::AES256_GCM];
        let bytes = common::encode_stream(&payload(), &ids, &session);

        let mut cursor = Cursor::new(bytes.clone());
        let (header, _) = decode_stream_header(&mut cursor, &session).unwrap();
        assert_ne!(header.entries[0].salt, header.entries[1].salt);
        assert_ne!(header.entries[0].iv, header.entries[1].iv);

        assert_eq!(common::decode_stream(&bytes, &session).unwrap(), payload());
    }

    #[test]
    fn roundtrip_empty_payload() {
        let session = common::session();
        for ids in [&[][..], &[cipher_ids::AES256_GCM][..]] {
            let bytes = common::encode_stream(b"", ids, &session);
            assert_eq!(common::decode_stream(&bytes, &session).unwrap(), b"");
        }
    }

    #[test]
    fn byte_at_a_time_reads_match_bulk_reads() {
        let session = common::session();
        let bytes =
            common::encode_stream(&payload(), &[cipher_ids::XCHACHA20_POLY1305], &session);

        let mut reader = MultiCipherReader::new(Cursor::new(bytes), &session);
        let mut out = Vec::new();
        while let Some(b) = reader.read_byte().unwrap() {
            out.push(b);
        }
        assert_eq!(out, payload());
        // reading past the end stays at end
        assert_eq!(reader.read_byte().unwrap(), None);
    }

    #[test]
    fn identity_chain_passes_raw_bytes_through() {
        let session = common::session();
        let bytes = common::encode_stream(&payload(), &[], &session);
        let header_len = common::header_len(&[]);
        // with no chain entries the payload bytes follow the header verbatim
        assert_eq!(&bytes[header_len..], &payload()[..]);
    }

// 2. Payload tamper detection

    #[test]
    fn payload_bit_flip_is_payload_tag_mismatch() {
        let session = common::session();
        let ids = [cipher_ids::AES256_GCM];
        let mut bytes = common::encode_stream(&payload(), &ids, &session);
        let header_len = common::header_len(&ids);
        bytes[header_len + 7] ^= 0x10;

        let err = common::decode_stream(&bytes, &session).unwrap_err();
        assert!(matches!(
            err,
            StreamError::Integrity(IntegrityError::PayloadTagMismatch)
        ));
    }

    #[test]
    fn inner_layer_tamper_detected_in_multilayer_chain() {
        let session = common::session();
        let ids = [cipher_ids::CHACHA20_POLY1305, cipher_ids::AES256_GCM];
        let mut bytes = common::encode_stream(&payload(), &ids, &session);
        // flip the stream's last byte: the outer layer's trailing tag
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let err = common::decode_stream(&bytes, &session).unwrap_err();
        assert!(matches!(
            err,
            StreamError::Integrity(IntegrityError::PayloadTagMismatch)
        ));
    }

// 3. Stage order is load-bearing

    #[test]
    fn reversed_stage_order_does_not_decrypt() {
        let session = common::session();
        let ids = [cipher_ids::AES256_GCM, cipher_ids::CHACHA20_POLY1305];
        let bytes = common::encode_stream(&payload(), &ids, &session);

        let mut cursor = Cursor::new(bytes);
        let (_, mut stages) = decode_stream_header(&mut cursor, &session).unwrap();
        stages.reverse();

        let mut chain = DecryptChain::new(cursor, stages);
        let mut out = Vec::new();
        let mut buf = [0u8; 64];
        let result = loop {
            match chain.read_bytes(&mut buf) {
                Ok(0) => break Ok(()),
                Ok(n) => out.extend_from_slice(&buf[..n]),
                Err(e) => break Err(e),
            }
        };
        // wrong order must fail outright; it can never reproduce the payload
        assert!(result.is_err() || out != payload());
    }

// 4. Sessions are shareable across readers

    #[test]
    fn one_session_decodes_many_streams() {
        let session = CipherSession::new(common::PASSWORD);
        let a = common::encode_stream(b"first", &[cipher_ids::AES128_GCM], &session);
        let b = common::encode_stream(b"second", &[cipher_ids::CHACHA20_POLY1305], &session);

        let mut ra = MultiCipherReader::new(Cursor::new(a), &session);
        let mut rb = MultiCipherReader::new(Cursor::new(b), &session);

        // interleaved reads from two readers over the same session
        assert_eq!(ra.read_byte().unwrap(), Some(b'f'));
        assert_eq!(rb.read_byte().unwrap(), Some(b's'));
        assert_eq!(ra.read_byte().unwrap(), Some(b'i'));
        assert_eq!(rb.read_byte().unwrap(), Some(b'e'));
    }
}
