//! Hash algorithm and content-hash value types.
//!
//! `HashType` declaration order is significant: [`Hash::short_tag`] prefers
//! the variant declared first.

use std::fmt;

/// Content hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashType {
    Sha256,
    Sha512,
    UnknownAlgorithm,
}

impl HashType {
    /// Algorithm name as it appears in metadata.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HashType::Sha256 => "sha256",
            HashType::Sha512 => "sha512",
            HashType::UnknownAlgorithm => "unknown",
        }
    }

    /// Parse a lowercase metadata algorithm name. Anything else is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "sha256" => HashType::Sha256,
            "sha512" => HashType::Sha512,
            _ => HashType::UnknownAlgorithm,
        }
    }

    #[must_use]
    pub fn digest_size(&self) -> Option<usize> {
        match self {
            HashType::Sha256 => Some(32),
            HashType::Sha512 => Some(64),
            HashType::UnknownAlgorithm => None,
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable (algorithm, digest) pair. The digest is always stored upper-case hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hash {
    hash_type: HashType,
    digest: String,
}

impl Hash {
    #[must_use]
    pub fn new(hash_type: HashType, digest: impl AsRef<str>) -> Self {
        Self {
            hash_type,
            digest: digest.as_ref().to_ascii_uppercase(),
        }
    }

    /// Build from a metadata algorithm name (`"sha256"`, `"sha512"`).
    #[must_use]
    pub fn from_type_name(type_name: &str, digest: impl AsRef<str>) -> Self {
        Self::new(HashType::from_name(type_name), digest)
    }

    #[must_use]
    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    #[must_use]
    pub fn type_string(&self) -> &'static str {
        self.hash_type.as_str()
    }

    /// Upper-case hex digest.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Short lower-case tag identifying an artifact by one of its hashes.
    ///
    /// Picks the first hash of the lowest-ordered known algorithm (so SHA-256
    /// wins over SHA-512) and returns the first 12 digest characters. Returns
    /// `"(unknown)"` when no hash uses a known algorithm.
    #[must_use]
    pub fn short_tag(hashes: &[Hash]) -> String {
        let mut best = HashType::UnknownAlgorithm;
        let mut tag = String::from("(unknown)");
        for hash in hashes {
            if hash.hash_type < best {
                tag = hash.digest.chars().take(12).collect();
                best = hash.hash_type;
            }
        }
        tag.to_ascii_lowercase()
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash: {}", self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stored_upper_case() {
        let h = Hash::new(HashType::Sha256, "abcdef");
        assert_eq!(h.digest(), "ABCDEF");
        assert_eq!(Hash::from_type_name("sha512", "ff").digest(), "FF");
    }

    #[test]
    fn type_name_parsing() {
        assert_eq!(Hash::from_type_name("sha256", "").hash_type(), HashType::Sha256);
        assert_eq!(Hash::from_type_name("sha512", "").hash_type(), HashType::Sha512);
        assert_eq!(
            Hash::from_type_name("SHA256", "").hash_type(),
            HashType::UnknownAlgorithm
        );
        assert_eq!(Hash::from_type_name("md5", "").type_string(), "unknown");
    }

    #[test]
    fn equality_requires_both_fields() {
        let a = Hash::new(HashType::Sha256, "aa");
        assert_eq!(a, Hash::new(HashType::Sha256, "AA"));
        assert_ne!(a, Hash::new(HashType::Sha512, "aa"));
        assert_ne!(a, Hash::new(HashType::Sha256, "ab"));
    }

    #[test]
    fn short_tag_prefers_sha256() {
        let sha512 = Hash::new(HashType::Sha512, "BBBBBBBBBBBBBBBBBBBBBBBB");
        let sha256 = Hash::new(HashType::Sha256, "AAAAAAAAAAAA11112222");
        assert_eq!(Hash::short_tag(&[sha512.clone(), sha256.clone()]), "aaaaaaaaaaaa");
        assert_eq!(Hash::short_tag(&[sha256, sha512.clone()]), "aaaaaaaaaaaa");
        assert_eq!(Hash::short_tag(&[sha512]), "bbbbbbbbbbbb");
    }

    #[test]
    fn short_tag_unknown() {
        assert_eq!(Hash::short_tag(&[]), "(unknown)");
        let odd = Hash::from_type_name("blake3", "CCCCCCCCCCCCCCCC");
        assert_eq!(Hash::short_tag(&[odd]), "(unknown)");
    }

    #[test]
    fn display_format() {
        assert_eq!(Hash::new(HashType::Sha256, "ab").to_string(), "Hash: AB");
    }
}
