//! Draw parameters and results.
//!
//! A [`DrawSpec`] can only be built when the requested count fits inside the
//! inclusive range, so a unique draw over it always terminates.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

/// 32-bit seed derived from the dream text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(pub u32);

impl Seed {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum DrawSpecError {
    #[error("draw count must be positive")]
    ZeroCount,
    #[error("inverted range (min={min}, max={max})")]
    InvertedRange { min: u32, max: u32 },
    #[error("cannot draw {count} unique values from {min}..={max} ({available} available)")]
    CountExceedsRange {
        count: u32,
        min: u32,
        max: u32,
        available: u64,
    },
}

/// Parameters of one "pick K unique integers from [min, max]" draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawSpec {
    count: u32,
    min: u32,
    max: u32,
}

impl DrawSpec {
    pub fn new(count: u32, min: u32, max: u32) -> Result<Self, DrawSpecError> {
        if count == 0 {
            return Err(DrawSpecError::ZeroCount);
        }
        if min > max {
            return Err(DrawSpecError::InvertedRange { min, max });
        }
        let available = Self::span_of(min, max);
        if u64::from(count) > available {
            return Err(DrawSpecError::CountExceedsRange {
                count,
                min,
                max,
                available,
            });
        }
        Ok(Self { count, min, max })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of integers in `min..=max`.
    pub fn span(&self) -> u64 {
        Self::span_of(self.min, self.max)
    }

    fn span_of(min: u32, max: u32) -> u64 {
        u64::from(max) - u64::from(min) + 1
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Ascending list of distinct drawn numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawResult(Vec<u32>);

impl DrawResult {
    /// Builds a result from already-distinct values, sorting them.
    pub fn from_unsorted(mut numbers: Vec<u32>) -> Self {
        numbers.sort_unstable();
        Self(numbers)
    }

    pub fn numbers(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl FromIterator<u32> for DrawResult {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

/// Renders numbers zero-padded to two digits and joined with `", "`.
impl fmt::Display for DrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, number) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{number:02}")?;
        }
        Ok(())
    }
}

/// Lottery-style draw presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lottery {
    Lotofacil,
    MegaSena,
    DiaDeSorte,
}

impl Lottery {
    /// The canonical draw order. Each draw consumes generator state left by the previous one.
    pub const CANONICAL: [Lottery; 3] =
        [Lottery::Lotofacil, Lottery::MegaSena, Lottery::DiaDeSorte];

    pub fn spec(self) -> DrawSpec {
        let (count, max) = match self {
            Lottery::Lotofacil => (15, 25),
            Lottery::MegaSena => (6, 60),
            Lottery::DiaDeSorte => (7, 31),
        };
        // Preset bounds always satisfy count <= span.
        DrawSpec {
            count,
            min: 1,
            max,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lottery::Lotofacil => "Lotofácil",
            Lottery::MegaSena => "Mega-Sena",
            Lottery::DiaDeSorte => "Dia de Sorte",
        }
    }
}

impl fmt::Display for Lottery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Response language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Pt,
    En,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_zero_padded_list() {
        let result = DrawResult::from_unsorted(vec![25, 1, 7]);
        assert_eq!(result.to_string(), "01, 07, 25");
    }

    #[test]
    fn formats_empty_and_wide_numbers() {
        assert_eq!(DrawResult::default().to_string(), "");
        let result = DrawResult::from_unsorted(vec![100, 9]);
        assert_eq!(result.to_string(), "09, 100");
    }

    #[test]
    fn rejects_count_larger_than_range() {
        let err = DrawSpec::new(30, 1, 25).unwrap_err();
        assert_eq!(
            err,
            DrawSpecError::CountExceedsRange {
                count: 30,
                min: 1,
                max: 25,
                available: 25,
            }
        );
    }

    #[test]
    fn rejects_zero_count_and_inverted_range() {
        assert_eq!(DrawSpec::new(0, 1, 25), Err(DrawSpecError::ZeroCount));
        assert_eq!(
            DrawSpec::new(1, 9, 3),
            Err(DrawSpecError::InvertedRange { min: 9, max: 3 })
        );
    }

    #[test]
    fn accepts_exhaustive_draw() {
        let spec = DrawSpec::new(25, 1, 25).expect("full range is drawable");
        assert_eq!(spec.span(), 25);
    }

    #[test]
    fn full_u32_range_does_not_overflow() {
        let spec = DrawSpec::new(1, 0, u32::MAX).expect("single draw over u32");
        assert_eq!(spec.span(), 1u64 << 32);
    }

    #[test]
    fn lottery_presets_are_valid() {
        for lottery in Lottery::CANONICAL {
            let preset = lottery.spec();
            let checked = DrawSpec::new(preset.count(), preset.min(), preset.max())
                .expect("preset must be valid");
            assert_eq!(preset, checked);
        }
        assert_eq!(Lottery::MegaSena.spec().count(), 6);
        assert_eq!(Lottery::MegaSena.spec().max(), 60);
    }

    #[test]
    fn lang_and_lottery_serde_names() {
        assert_eq!(serde_json::to_string(&Lang::En).unwrap(), "\"en\"");
        assert_eq!(serde_json::from_str::<Lang>("\"pt\"").unwrap(), Lang::Pt);
        assert_eq!(
            serde_json::to_string(&Lottery::DiaDeSorte).unwrap(),
            "\"dia_de_sorte\""
        );
    }

    #[test]
    fn seed_displays_as_hex() {
        assert_eq!(Seed(0x0338566B).to_string(), "0x0338566b");
    }

    proptest! {
        #[test]
        fn spec_validation_matches_span(count in 0u32..100, min in 0u32..50, width in 0u32..60) {
            let max = min + width;
            let spec = DrawSpec::new(count, min, max);
            let valid = count > 0 && u64::from(count) <= u64::from(width) + 1;
            prop_assert_eq!(spec.is_ok(), valid);
        }
    }
}
