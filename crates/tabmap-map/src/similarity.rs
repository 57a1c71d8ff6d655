//! String similarity measures used for fuzzy column matching.
//!
//! Every measure returns a score in `[0, 1]` where `1` means identical.
//! A source column is only auto-mapped when the score is strictly greater
//! than [`FUZZY_MATCH_THRESHOLD`].

use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};

/// Minimum (exclusive) score for a fuzzy match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.9;

/// True if `score` is strictly above [`FUZZY_MATCH_THRESHOLD`].
pub fn exceeds_threshold(score: f64) -> bool {
    score > FUZZY_MATCH_THRESHOLD
}

/// A bounded string similarity measure.
///
/// Any `Fn(&str, &str) -> f64` closure is a measure.
pub trait Similarity {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Sørensen–Dice coefficient over character bigrams.
///
/// Whitespace is ignored, so `"first name"` and `"firstname"` are identical.
/// Strings shorter than two characters score 0 unless they are equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigramDice;

impl Similarity for BigramDice {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::sorensen_dice(a, b)
    }
}

/// Jaro-Winkler similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        jaro_winkler::similarity(a.chars(), b.chars())
    }
}

/// Selectable similarity measure, for configuration files and flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMetric {
    #[default]
    BigramDice,
    JaroWinkler,
}

impl Similarity for SimilarityMetric {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        match self {
            Self::BigramDice => BigramDice.similarity(a, b),
            Self::JaroWinkler => JaroWinkler.similarity(a, b),
        }
    }
}
