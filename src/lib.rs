//! EEG signal comparison engine.
//!
//! Loads two recordings, pairs them sample by sample, labels each sample by
//! its declared frequency band and summarises the comparison.
//!
//! ```no_run
//! use eeg_compare::analysis::{compute_aligned_samples, summary::summarize};
//! use eeg_compare::data::loader::load_file;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let a = load_file(Path::new("baseline.csv"))?;
//! let b = load_file(Path::new("session.csv"))?;
//! let samples = compute_aligned_samples(&a.rows, "Fp1", &b.rows, "Fp1", "Alpha", "Beta");
//! let summary = summarize(&samples, "Alpha", "Beta");
//! println!("{}", summary.narrative_summary);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod color;
pub mod data;
pub mod session;

pub use analysis::band::{classify, Classification, FrequencyBand};
pub use analysis::summary::{summarize, Summary};
pub use analysis::{compute_aligned_samples, AlignedSample, SignalSelection};
pub use data::model::{CellValue, Row, Table};
