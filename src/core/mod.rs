//! Pure transforms over JSON values.
//!
//! Nothing here performs I/O: [`normalize`] sanitizes outbound request
//! bodies and [`tabular`] turns search responses into CSV text.

pub mod normalize;
pub mod tabular;

pub use normalize::{normalize, normalize_body, normalize_text, plain_float};
pub use tabular::{NO_DOCUMENTS, NO_SEARCH_RESULTS, hits_to_csv, search_results_to_csv};
