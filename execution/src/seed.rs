//! Seed derivation.
//!
//! Maps arbitrary text to a reproducible 32-bit seed. Two strategies exist:
//!
//! - [`SeedStrategy::Sha256`]: first 4 bytes of `SHA-256(utf8(text))`, big-endian.
//! - [`SeedStrategy::Rolling`]: `hash = hash * 31 + unit (mod 2^32)` over UTF-16 code units.
//!
//! The rolling hash is kept for compatibility with legacy clients; new callers should
//! use SHA-256.

use commonware_cryptography::{sha256::Sha256, Hasher};
use ecos_types::Seed;

/// How seed text is turned into a [`Seed`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SeedStrategy {
    #[default]
    Sha256,
    Rolling,
}

impl SeedStrategy {
    pub fn derive(self, text: &str) -> Seed {
        match self {
            SeedStrategy::Sha256 => sha256_seed(text),
            SeedStrategy::Rolling => rolling_seed(text),
        }
    }
}

/// Which text feeds the seed derivation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SeedConvention {
    /// The trimmed dream text alone.
    #[default]
    DreamOnly,
    /// `dream + "|" + prompt`, with an empty prompt when none is given.
    DreamWithPrompt,
}

impl SeedConvention {
    pub fn source(self, dream: &str, prompt: Option<&str>) -> String {
        match self {
            SeedConvention::DreamOnly => dream.to_string(),
            SeedConvention::DreamWithPrompt => format!("{dream}|{}", prompt.unwrap_or_default()),
        }
    }
}

/// Seed from the first four bytes of the SHA-256 digest of `text`.
pub fn sha256_seed(text: &str) -> Seed {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize().0;
    Seed(u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]))
}

/// Polynomial rolling hash (base 31) over UTF-16 code units.
pub fn rolling_seed(text: &str) -> Seed {
    let hash = text
        .encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(u32::from(unit)));
    Seed(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonware_utils::hex;

    #[test]
    fn sha256_seed_uses_leading_digest_bytes() {
        let mut hasher = Sha256::new();
        hasher.update(b"testseed");
        let digest = hasher.finalize();
        assert!(hex(digest.as_ref()).starts_with("0338566b"));
        assert_eq!(sha256_seed("testseed"), Seed(0x0338_566B));
    }

    #[test]
    fn empty_text_hashes_zero_bytes() {
        // SHA-256("") = e3b0c442...
        assert_eq!(sha256_seed(""), Seed(0xE3B0_C442));
        assert_eq!(rolling_seed(""), Seed(0));
    }

    #[test]
    fn rolling_seed_matches_known_values() {
        assert_eq!(rolling_seed("a"), Seed(97));
        assert_eq!(rolling_seed("abc"), Seed(96_354));
        assert_eq!(rolling_seed("testseed"), Seed(3_149_101_571));
    }

    #[test]
    fn rolling_seed_iterates_utf16_units() {
        assert_eq!(rolling_seed("ação"), Seed(3_118_866));
        // Astral code points contribute both surrogates.
        assert_eq!(rolling_seed("😀"), Seed(1_772_899));
    }

    #[test]
    fn derivation_is_repeatable() {
        for strategy in [SeedStrategy::Sha256, SeedStrategy::Rolling] {
            let text = "Sonhei que voava sobre o mar";
            assert_eq!(strategy.derive(text), strategy.derive(text));
        }
    }

    #[test]
    fn single_character_change_moves_sha256_seed() {
        for sample in ["testseed", "", "sonhei com um gato", "voando alto"] {
            let extended = format!("{sample}x");
            assert_ne!(sha256_seed(sample), sha256_seed(&extended), "sample {sample:?}");
        }
        assert_eq!(sha256_seed("testseedx"), Seed(1_525_747_437));
    }

    #[test]
    fn convention_builds_seed_source() {
        assert_eq!(SeedConvention::DreamOnly.source("mar", Some("p")), "mar");
        assert_eq!(
            SeedConvention::DreamWithPrompt.source("mar", Some("p")),
            "mar|p"
        );
        assert_eq!(SeedConvention::DreamWithPrompt.source("mar", None), "mar|");
    }
}
