//! Column mapping for imports.
//!
//! [`MappingSuggester`] proposes a destination key per source column;
//! [`MappingEditor`] owns the mappings while the user adjusts them and
//! decides whether the import may be submitted.

mod editor;
mod error;
mod similarity;
mod suggest;

pub use editor::MappingEditor;
pub use error::{MappingError, Result};
pub use similarity::{
    BigramDice, FUZZY_MATCH_THRESHOLD, JaroWinkler, Similarity, SimilarityMetric,
    exceeds_threshold,
};
pub use suggest::MappingSuggester;
