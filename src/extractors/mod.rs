// src/extractors/mod.rs
pub mod classify;
pub mod concept;
pub mod context;
pub mod facts;
pub mod report;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use classify::FilingMetadata;
#[allow(unused_imports)]
pub use facts::{Context, Fact, FactIndex, Period};
#[allow(unused_imports)]
pub use report::{extract_report, ReportItem};
