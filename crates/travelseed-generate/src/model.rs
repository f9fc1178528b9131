use serde::{Deserialize, Serialize};
use travelseed_core::EntityIdStrategy;

use crate::errors::{GenerationError, Result};

/// Number of categories a run writes, each with its own file ordinal.
const CATEGORY_COUNT: u32 = 7;

/// File ordinals are rendered with two digits.
const MAX_ORDINAL: u32 = 99;

/// Options for the generation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Two-digit ordinal given to the first category's files.
    pub ordinal_base: u32,
    /// Sub-directory receiving the SQL event scripts.
    pub events_dir: String,
    /// Sub-directory receiving the MongoDB snapshot scripts.
    pub snapshots_dir: String,
    /// Entity id generation strategy.
    pub entity_ids: EntityIdStrategy,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            ordinal_base: 50,
            events_dir: "sql".to_string(),
            snapshots_dir: "mongo".to_string(),
            entity_ids: EntityIdStrategy::Random,
        }
    }
}

impl GenerateOptions {
    /// Check that every category ordinal stays two digits wide.
    pub fn validate(&self) -> Result<()> {
        let last_ordinal = self.ordinal_base.checked_add(CATEGORY_COUNT - 1);
        match last_ordinal {
            Some(last) if last <= MAX_ORDINAL => Ok(()),
            _ => Err(GenerationError::InvalidOptions(format!(
                "ordinal_base {} must be at most {} so that all {CATEGORY_COUNT} category files get two-digit ordinals",
                self.ordinal_base,
                MAX_ORDINAL + 1 - CATEGORY_COUNT
            ))),
        }
    }
}

/// Summary of one category's output files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub name: String,
    pub ordinal: u32,
    pub entities: u64,
    pub first_event_id: Option<u64>,
    pub last_event_id: Option<u64>,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub started_at: String,
    pub events_emitted: u64,
    pub categories: Vec<CategoryReport>,
}

impl GenerationReport {
    pub fn new(run_id: String, started_at: String) -> Self {
        Self {
            run_id,
            started_at,
            events_emitted: 0,
            categories: Vec::new(),
        }
    }

    pub fn record_category(&mut self, category: CategoryReport) {
        self.events_emitted += category.entities;
        self.categories.push(category);
    }
}
