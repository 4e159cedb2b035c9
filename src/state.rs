use crate::error::{CompressionError, Result};
use crate::stats::FileReport;
use crate::strength::{CompressionStrength, StrengthPreset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Explicit session state with pure transitions: the selected files,
/// the strength control, the non-reentrant running flag and the last
/// completed run's reports. Replaces ambient mutable variables so every
/// transition is unit-testable without any rendering environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    selected: Vec<PathBuf>,
    strength: CompressionStrength,
    active_preset: Option<StrengthPreset>,
    running: bool,
    results: Vec<FileReport>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            strength: CompressionStrength::default(),
            active_preset: None,
            running: false,
            results: Vec::new(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[PathBuf] {
        &self.selected
    }

    pub fn strength(&self) -> CompressionStrength {
        self.strength
    }

    /// The preset marked active, if the strength came from one. A
    /// slider value leaves no preset active.
    pub fn active_preset(&self) -> Option<StrengthPreset> {
        self.active_preset
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reports of the last completed run; empty or aligned one-to-one
    /// with the selection.
    pub fn results(&self) -> &[FileReport] {
        &self.results
    }

    /// Replace the selection. Results from a superseded selection are
    /// released here so stale stats can never show against new files.
    pub fn select_files(&mut self, files: Vec<PathBuf>) {
        self.selected = files;
        self.results.clear();
    }

    pub fn set_preset(&mut self, preset: StrengthPreset) {
        self.strength = preset.strength();
        self.active_preset = Some(preset);
    }

    pub fn set_slider(&mut self, strength: CompressionStrength) {
        self.strength = strength;
        self.active_preset = None;
    }

    /// Non-reentrant run guard: a second start while one run is in
    /// flight is rejected, not queued.
    pub fn start_run(&mut self) -> Result<()> {
        if self.running {
            return Err(CompressionError::BatchInProgress);
        }
        if self.selected.is_empty() {
            return Err(CompressionError::NoImageFilesFound(
                "selection is empty".to_string(),
            ));
        }
        self.running = true;
        self.results.clear();
        Ok(())
    }

    /// Store a completed run. Only a full batch is accepted: exactly one
    /// report per selected file, positionally aligned.
    pub fn complete_run(&mut self, reports: Vec<FileReport>) -> Result<()> {
        self.running = false;
        if reports.len() != self.selected.len() {
            return Err(CompressionError::BatchShapeMismatch(
                reports.len(),
                self.selected.len(),
            ));
        }
        self.results = reports;
        Ok(())
    }

    /// Abort bookkeeping: clears the running flag so the user may retry;
    /// no partial results are kept.
    pub fn fail_run(&mut self) {
        self.running = false;
        self.results.clear();
    }
}
