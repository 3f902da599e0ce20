//! Content hash tests: known answers, streaming equivalence around the
//! 64 KiB block boundary, and short tags.

mod common;

use std::io::{self, Read};

use uptane_crypto::services::STREAM_BLOCK_SIZE;
use uptane_crypto::{CryptoError, Hash, HashType, MultiPartHasher};

/// Reader that hands out at most `chunk` bytes per call.
struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reader that fails after the first call.
struct FailingReader {
    calls: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.calls > 1 {
            return Err(io::Error::new(io::ErrorKind::Other, "device unplugged"));
        }
        buf[0] = 42;
        Ok(1)
    }
}

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 256) as u8).collect()
}

#[test]
fn empty_sha256_known_answer() {
    let hash = Hash::generate(HashType::Sha256, b"").unwrap();
    assert_eq!(hash.hash_type(), HashType::Sha256);
    assert_eq!(
        hash.digest(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_uppercase()
    );
}

#[test]
fn streaming_matches_one_shot_at_block_boundaries() {
    common::init_logging();
    for len in [0, 1, STREAM_BLOCK_SIZE, STREAM_BLOCK_SIZE + 1] {
        let data = sample(len);
        for hash_type in [HashType::Sha256, HashType::Sha512] {
            let expected = Hash::generate(hash_type, &data).unwrap();
            let (streamed, read) = Hash::generate_from_reader(hash_type, data.as_slice()).unwrap();
            assert_eq!(streamed, expected, "len {len} {hash_type}");
            assert_eq!(read, len as u64);
        }
    }
}

#[test]
fn streaming_with_arbitrary_chunk_boundaries() {
    let data = sample(3 * STREAM_BLOCK_SIZE + 17);
    let expected = Hash::generate(HashType::Sha512, &data).unwrap();
    for chunk in [1, 7, 4096, STREAM_BLOCK_SIZE - 1, STREAM_BLOCK_SIZE + 3] {
        let reader = ChunkedReader {
            data: &data,
            chunk,
        };
        let (streamed, read) = Hash::generate_from_reader(HashType::Sha512, reader).unwrap();
        assert_eq!(streamed, expected, "chunk {chunk}");
        assert_eq!(read, data.len() as u64);
    }
}

#[test]
fn multi_part_updates_match_one_shot() {
    let data = sample(STREAM_BLOCK_SIZE + 1);
    for hash_type in [HashType::Sha256, HashType::Sha512] {
        let (head, tail) = data.split_at(12345);
        let feed = || {
            let mut hasher = MultiPartHasher::create(hash_type).unwrap();
            hasher.update(head);
            hasher.update(&[]);
            hasher.update(tail);
            hasher
        };
        let hex_digest = feed().into_hex_digest();
        let hash = feed().into_hash();
        assert_eq!(hash, Hash::generate(hash_type, &data).unwrap());
        assert_eq!(hex_digest, hash.digest());
    }
}

#[test]
fn unsupported_algorithm() {
    assert!(MultiPartHasher::create(HashType::UnknownAlgorithm).is_none());
    assert!(matches!(
        Hash::generate(HashType::UnknownAlgorithm, b"data"),
        Err(CryptoError::UnsupportedAlgorithm(_))
    ));
    assert!(matches!(
        Hash::generate_from_reader(HashType::UnknownAlgorithm, &b"data"[..]),
        Err(CryptoError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn read_errors_are_reported() {
    let result = Hash::generate_from_reader(HashType::Sha256, FailingReader { calls: 0 });
    assert!(matches!(result, Err(CryptoError::Io(_))));
}

#[test]
fn short_tag_prefers_sha256_entry() {
    let data = b"firmware image";
    let sha256 = Hash::generate(HashType::Sha256, data).unwrap();
    let sha512 = Hash::generate(HashType::Sha512, data).unwrap();

    let expected = sha256.digest()[..12].to_lowercase();
    assert_eq!(Hash::short_tag(&[sha512.clone(), sha256.clone()]), expected);
    assert_eq!(Hash::short_tag(&[sha256, sha512]), expected);
}

#[test]
fn hashes_from_metadata_names() {
    let from_name = Hash::from_type_name("sha256", "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
    assert_eq!(from_name, Hash::generate(HashType::Sha256, b"").unwrap());
    assert_eq!(from_name.type_string(), "sha256");
}
