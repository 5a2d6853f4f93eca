//! Pattern-based extraction of structured records from a planning document.
//!
//! Every stage takes plain lines (or text) and returns plain records. A
//! heading or key that cannot be found yields an empty result rather than
//! an error, and lines that only look like a record are skipped.

pub mod entity;
pub mod normalize;
pub mod patterns;
pub mod section;
pub mod series;
pub mod traffic;
pub mod weather;
