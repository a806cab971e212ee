//! Reconstruction of tables and body text from an analysis result.
//!
//! [`TableReconstructor`] turns one table's flat cell list into a rectangular
//! grid with caption and surrounding context; [`TextReconstructor`] merges
//! all non-table lines into a single body-text stream. Both are pure over
//! their inputs: each call allocates its own grid and buffers, so a shared
//! instance can serve concurrent conversions without synchronization.

mod options;
mod table;
mod text;

pub use options::{ConvertOptions, ZeroSpanPolicy};
pub use table::TableReconstructor;
pub use text::TextReconstructor;
