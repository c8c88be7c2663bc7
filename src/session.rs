use std::fmt;

use thiserror::Error;

use crate::analysis::export::export_table;
use crate::analysis::summary::{summarize, Summary};
use crate::analysis::{compute_aligned_samples, AlignedSample, SignalSelection};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Which of the two recordings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recording {
    First,
    Second,
}

impl fmt::Display for Recording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recording::First => f.write_str("recording 1"),
            Recording::Second => f.write_str("recording 2"),
        }
    }
}

/// Reasons a comparison cannot be generated yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no table loaded for {0}")]
    MissingTable(Recording),
    #[error("no channel selected for {0}")]
    MissingChannel(Recording),
    #[error("no frequency band selected for {0}")]
    MissingBand(Recording),
}

// ---------------------------------------------------------------------------
// Comparison session
// ---------------------------------------------------------------------------

/// Inputs and results of one comparison, independent of any front-end.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSession {
    /// Loaded recordings (None until loaded).
    pub table_a: Option<Table>,
    pub table_b: Option<Table>,

    /// Channel and band chosen per recording.
    pub selection_a: SignalSelection,
    pub selection_b: SignalSelection,

    /// Output of the last successful `generate`.
    pub samples: Vec<AlignedSample>,
    pub summary: Summary,
    generated: bool,
}

impl ComparisonSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a loaded table. Any previous results are discarded.
    pub fn set_table(&mut self, which: Recording, table: Table) {
        log::info!(
            "{which}: loaded {} rows with columns {:?}",
            table.len(),
            table.headers
        );
        match which {
            Recording::First => self.table_a = Some(table),
            Recording::Second => self.table_b = Some(table),
        }
        self.clear_results();
    }

    pub fn select_channel(&mut self, which: Recording, column: impl Into<String>) {
        self.selection_mut(which).column = column.into();
    }

    pub fn select_band(&mut self, which: Recording, band: impl Into<String>) {
        self.selection_mut(which).band = band.into();
    }

    fn selection_mut(&mut self, which: Recording) -> &mut SignalSelection {
        match which {
            Recording::First => &mut self.selection_a,
            Recording::Second => &mut self.selection_b,
        }
    }

    fn clear_results(&mut self) {
        self.samples.clear();
        self.summary = Summary::default();
        self.generated = false;
    }

    /// Check that both recordings are loaded and fully selected.
    pub fn validate(&self) -> Result<(&Table, &Table), SessionError> {
        let table_a = self
            .table_a
            .as_ref()
            .ok_or(SessionError::MissingTable(Recording::First))?;
        let table_b = self
            .table_b
            .as_ref()
            .ok_or(SessionError::MissingTable(Recording::Second))?;

        for (which, sel) in [
            (Recording::First, &self.selection_a),
            (Recording::Second, &self.selection_b),
        ] {
            if sel.column.is_empty() {
                return Err(SessionError::MissingChannel(which));
            }
            if sel.band.is_empty() {
                return Err(SessionError::MissingBand(which));
            }
        }

        for (which, table, sel) in [
            (Recording::First, table_a, &self.selection_a),
            (Recording::Second, table_b, &self.selection_b),
        ] {
            if !table.has_column(&sel.column) {
                log::warn!(
                    "{which}: column '{}' not present, its samples read as 0",
                    sel.column
                );
            }
        }

        Ok((table_a, table_b))
    }

    /// Run the pipeline over the current inputs and keep the results.
    pub fn generate(&mut self) -> Result<&[AlignedSample], SessionError> {
        let (table_a, table_b) = self.validate()?;

        let samples = compute_aligned_samples(
            &table_a.rows,
            &self.selection_a.column,
            &table_b.rows,
            &self.selection_b.column,
            &self.selection_a.band,
            &self.selection_b.band,
        );
        let summary = summarize(&samples, &self.selection_a.band, &self.selection_b.band);

        log::info!(
            "compared {} samples ({} vs {} rows)",
            samples.len(),
            table_a.len(),
            table_b.len()
        );

        self.samples = samples;
        self.summary = summary;
        self.generated = true;
        Ok(&self.samples)
    }

    /// Tabular export of the last run; `None` before anything was generated.
    pub fn export_table(&self) -> Option<String> {
        self.generated
            .then(|| export_table(&self.samples, &self.selection_a, &self.selection_b))
    }
}
