//! Row transformation.
//!
//! Applies a finalized set of column mappings to the data rows of a decoded
//! file, merging source cells that share a destination key through the
//! template's combiner for that key.

mod rows;

pub use rows::RowTransformer;
