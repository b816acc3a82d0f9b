//! # Data Loader Crate
//!
//! Loads the two precomputed artifacts behind the recommender: the movie
//! table and the square similarity matrix built from it.
//!
//! ## Main Components
//!
//! - **types**: `Movie`, `SimilarityMatrix` and the `DataIndex` context
//! - **parser**: JSON deserialization of both artifact files
//! - **index**: All-or-nothing loading and validation
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DataIndex, MOVIES_FILE, SIMILARITY_FILE};
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(
//!     Path::new(MOVIES_FILE),
//!     Path::new(SIMILARITY_FILE),
//! )?;
//!
//! let position = index.position_of("Avatar").unwrap();
//! let scores = index.similarity_row(position).unwrap();
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{MOVIES_FILE, SIMILARITY_FILE};
pub use types::{
    // Type aliases
    MovieId,
    // Core types
    Movie,
    SimilarityMatrix,
    DataIndex,
};
