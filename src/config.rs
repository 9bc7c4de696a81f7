//! Report configuration.
//!
//! Everything has a default; a JSON file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::blocks::{BlockKind, DEFAULT_TOP_N};
use crate::cell_ref::MAX_COLS;
use crate::error::{ReportError, Result};

/// Which of the two report layouts to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportVariant {
    /// Identity, improvement generations, top solutions, optimizer parameters.
    #[default]
    Summary,
    /// Identity and the tolerance-increment matrix.
    Tolerance,
}

impl ReportVariant {
    /// Blocks written for each record, in order.
    #[must_use]
    pub fn blocks(self) -> &'static [BlockKind] {
        match self {
            Self::Summary => &[
                BlockKind::Identity,
                BlockKind::ImprovementGenerations,
                BlockKind::TopSolutions,
                BlockKind::OptimizerParams,
            ],
            Self::Tolerance => &[BlockKind::Identity, BlockKind::ToleranceSteps],
        }
    }

    #[must_use]
    pub fn identity_format(self) -> IdentityFormat {
        match self {
            Self::Summary => IdentityFormat::Slashed,
            Self::Tolerance => IdentityFormat::Json,
        }
    }
}

impl FromStr for ReportVariant {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "tolerance" => Ok(Self::Tolerance),
            other => Err(ReportError::Config(format!("unknown report variant `{other}`"))),
        }
    }
}

/// Direction in which a record's blocks are chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Row fixed at the record's top; each block starts right of the previous one.
    #[default]
    Across,
    /// Column fixed at the record's left edge; each block starts below the previous one.
    Down,
}

/// Whether trials in the tolerance matrix are visually separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialSeparation {
    /// Step columns run on across trial boundaries.
    #[default]
    None,
    /// One blank column between consecutive non-empty trials.
    GapColumn,
}

/// How the identity block renders a [`ProblemId`](crate::types::ProblemId).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityFormat {
    /// `dataset/instance/case`
    Slashed,
    /// `{"dataset":..,"instance":..,"case":..}`
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub variant: ReportVariant,
    /// Overrides the variant's block list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<BlockKind>>,
    /// Overrides the variant's identity format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_format: Option<IdentityFormat>,
    pub flow: Flow,
    /// Rows shown in the top-solutions block.
    pub top_n: usize,
    /// Blank rows between records, at least 1.
    pub record_gap: u32,
    /// Column every record starts in.
    pub left_col: u32,
    pub trial_separation: TrialSeparation,
    pub sheet_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            variant: ReportVariant::Summary,
            blocks: None,
            identity_format: None,
            flow: Flow::Across,
            top_n: DEFAULT_TOP_N,
            record_gap: 1,
            left_col: 0,
            trial_separation: TrialSeparation::None,
            sheet_name: "problem summaries".to_string(),
        }
    }
}

impl ReportConfig {
    #[must_use]
    pub fn for_variant(variant: ReportVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Block list in effect.
    #[must_use]
    pub fn block_list(&self) -> &[BlockKind] {
        self.blocks
            .as_deref()
            .unwrap_or_else(|| self.variant.blocks())
    }

    /// Identity format in effect.
    #[must_use]
    pub fn identity(&self) -> IdentityFormat {
        self.identity_format
            .unwrap_or_else(|| self.variant.identity_format())
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(ReportError::Config("top_n must be at least 1".into()));
        }
        if self.record_gap == 0 {
            return Err(ReportError::Config(
                "record_gap must be at least 1 blank row".into(),
            ));
        }
        if self.block_list().is_empty() {
            return Err(ReportError::Config("block list is empty".into()));
        }
        if self.left_col >= MAX_COLS {
            return Err(ReportError::Config(format!(
                "left_col {} is past the last column",
                self.left_col
            )));
        }
        validate_sheet_name(&self.sheet_name)
    }
}

/// Excel sheet names: 1-31 chars, none of `[]:*?/\`, no leading/trailing `'`.
fn validate_sheet_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > 31 {
        return Err(ReportError::Config(format!(
            "sheet name must be 1-31 characters, got {len}"
        )));
    }
    if let Some(bad) = name.chars().find(|c| "[]:*?/\\".contains(*c)) {
        return Err(ReportError::Config(format!(
            "sheet name contains `{bad}`"
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(ReportError::Config(
            "sheet name cannot start or end with an apostrophe".into(),
        ));
    }
    Ok(())
}
