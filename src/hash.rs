use sha2::{Digest, Sha256};

const CHUNK_SIZE: usize = 8192;

/// SHA-256 of the blob content, hex-encoded. Fed in fixed-size chunks so the
/// same routine works against a reader when uploads stop fitting in memory.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    for chunk in bytes.chunks(CHUNK_SIZE) {
        hasher.update(chunk);
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_digest() {
        assert_eq!(
            sha256_hex(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn chunking_does_not_change_the_digest() {
        let big = vec![0xabu8; CHUNK_SIZE * 3 + 17];
        let mut hasher = Sha256::new();
        hasher.update(&big);
        assert_eq!(sha256_hex(&big), format!("{:x}", hasher.finalize()));
    }
}
