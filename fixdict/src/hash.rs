//! This module defines the hash function and equality policies for string keys.

/// Multiplier of the polynomial hash
const BKDR_SEED: u64 = 131;

/// Polynomial BKDR hash of the given bytes.
///
/// Computed as `h = h * 131 + b` for every byte `b`, wrapping modulo 2^64.
pub fn bkdr_hash64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |hash, &byte| {
        hash.wrapping_mul(BKDR_SEED).wrapping_add(u64::from(byte))
    })
}

/// Variant of [bkdr_hash64] that lowercases every ASCII byte before mixing it.
///
/// For ASCII input, `ascii_ci_bkdr_hash64(s) == bkdr_hash64(s.to_ascii_lowercase())`.
pub fn ascii_ci_bkdr_hash64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |hash, &byte| {
        hash.wrapping_mul(BKDR_SEED)
            .wrapping_add(u64::from(byte.to_ascii_lowercase()))
    })
}

/// How string keys are hashed and compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StringPolicy {
    /// Keys match only if they are byte-wise equal
    #[default]
    CaseSensitive,
    /// Keys match if they are equal after ASCII lowercasing
    AsciiCaseInsensitive,
}

impl StringPolicy {
    /// Select the policy for the given case sensitivity flag.
    pub fn from_case_insensitive(case_insensitive: bool) -> Self {
        if case_insensitive {
            StringPolicy::AsciiCaseInsensitive
        } else {
            StringPolicy::CaseSensitive
        }
    }

    /// Hash of a key under this policy.
    pub fn hash(self, key: &str) -> u64 {
        match self {
            StringPolicy::CaseSensitive => bkdr_hash64(key.as_bytes()),
            StringPolicy::AsciiCaseInsensitive => ascii_ci_bkdr_hash64(key.as_bytes()),
        }
    }

    /// Convert a single byte of a query into the form in which keys are stored.
    pub fn convert_byte(self, byte: u8) -> u8 {
        match self {
            StringPolicy::CaseSensitive => byte,
            StringPolicy::AsciiCaseInsensitive => byte.to_ascii_lowercase(),
        }
    }

    /// Compare a `stored` key, which was normalized during the build,
    /// with an arbitrary `query`.
    pub fn equals(self, stored: &str, query: &str) -> bool {
        stored.len() == query.len() && self.equals_same_length(stored, query)
    }

    /// Like [StringPolicy::equals] but assumes that both keys have the same length.
    pub fn equals_same_length(self, stored: &str, query: &str) -> bool {
        debug_assert_eq!(stored.len(), query.len());

        match self {
            StringPolicy::CaseSensitive => stored == query,
            StringPolicy::AsciiCaseInsensitive => stored
                .bytes()
                .zip(query.bytes())
                .all(|(stored, query)| stored == query.to_ascii_lowercase()),
        }
    }

    /// Bring a key into the form in which it is stored.
    pub fn normalize(self, key: &str) -> Box<str> {
        match self {
            StringPolicy::CaseSensitive => Box::from(key),
            StringPolicy::AsciiCaseInsensitive => key.to_ascii_lowercase().into_boxed_str(),
        }
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;
    use test_log::test;

    use super::{ascii_ci_bkdr_hash64, bkdr_hash64, StringPolicy};

    #[test]
    fn known_values() {
        assert_eq!(bkdr_hash64(b""), 0);
        assert_eq!(bkdr_hash64(b"a"), 97);
        assert_eq!(bkdr_hash64(b"ab"), 97 * 131 + 98);
        assert_eq!(bkdr_hash64(b"\0a"), bkdr_hash64(b"a"));
    }

    #[test]
    fn known_collisions() {
        let pairs = [
            ("0BCPElfPXEtMOUE", "AyshlQKfxmMdGE4"),
            ("2P2H907ksk6vQFW", "MkFJCq2VQyMywJf"),
            ("4KGSiDd_WBUdLEg", "eEq531p7C604fY2"),
        ];

        for (first, second) in pairs {
            assert_eq!(bkdr_hash64(first.as_bytes()), bkdr_hash64(second.as_bytes()));
        }
    }

    #[test]
    fn case_insensitive_policy() {
        let policy = StringPolicy::AsciiCaseInsensitive;

        assert_eq!(policy.hash("ShEeP"), bkdr_hash64(b"sheep"));
        assert!(policy.equals("sheep", "SHEEP"));
        assert!(!policy.equals("sheep", "sheeps"));
        assert!(!StringPolicy::CaseSensitive.equals("sheep", "Sheep"));
        assert_eq!(&*policy.normalize("RaBbIt"), "rabbit");
        assert_eq!(policy.convert_byte(b'Q'), b'q');
        assert_eq!(StringPolicy::CaseSensitive.convert_byte(b'Q'), b'Q');
    }

    #[quickcheck]
    fn ci_hash_matches_lowercase(input: String) -> bool {
        ascii_ci_bkdr_hash64(input.as_bytes())
            == bkdr_hash64(input.to_ascii_lowercase().as_bytes())
    }
}
