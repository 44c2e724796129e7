use rayon::prelude::*;

use crate::domain::group::Grouping;
use crate::domain::phone::{CanonicalNumber, NormalizerConfig};
use crate::domain::record::{Record, Row};
use crate::error::CoreError;
use crate::grouping::{group_by_key, link_by_columns, ColumnNumbers};
use crate::rules::{EquivalenceRule, UnclassifiedPolicy};

/// Batches at least this large are normalized on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub normalizer: NormalizerConfig,
    pub rule: EquivalenceRule,
    pub unclassified: UnclassifiedPolicy,
    /// `None` keeps normalization on the calling thread.
    pub parallel_threshold: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            rule: EquivalenceRule::Exact,
            unclassified: UnclassifiedPolicy::Group,
            parallel_threshold: Some(DEFAULT_PARALLEL_THRESHOLD),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        self.normalizer.validate()?;
        self.rule.validate()?;
        if self.parallel_threshold == Some(0) {
            return Err(CoreError::InvalidParallelThreshold(0));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn normalize(&self, raw: &str) -> Result<CanonicalNumber, CoreError> {
        self.config.normalizer.normalize(raw)
    }

    pub fn group_records(&self, records: Vec<Record>) -> Grouping<Record> {
        let normalizer = &self.config.normalizer;
        let normalized = self.map_batch(records, |record| {
            let result = normalizer.normalize(&record.raw);
            (record, result)
        });
        group_by_key(normalized, &self.config.rule, self.config.unclassified)
    }

    pub fn link_rows(&self, rows: Vec<Row>) -> Grouping<Row> {
        let normalized = self.map_batch(rows, |row| {
            let result = self.normalize_row(&row);
            (row, result)
        });
        link_by_columns(normalized, &self.config.rule, self.config.unclassified)
    }

    /// Normalizes every non-empty column; one bad value makes the whole row unclassifiable.
    pub fn normalize_row(&self, row: &Row) -> Result<ColumnNumbers, CoreError> {
        let normalizer = &self.config.normalizer;
        let mut columns: ColumnNumbers = vec![None; row.values.len()];
        let mut seen = false;
        for (column, value) in row.non_empty_values() {
            columns[column] = Some(normalizer.normalize(value)?);
            seen = true;
        }
        if !seen {
            return Err(CoreError::EmptyRecord);
        }
        Ok(columns)
    }

    fn map_batch<T, U, F>(&self, items: Vec<T>, f: F) -> Vec<U>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> U + Sync + Send,
    {
        match self.config.parallel_threshold {
            Some(threshold) if items.len() >= threshold => items.into_par_iter().map(f).collect(),
            _ => items.into_iter().map(f).collect(),
        }
    }
}
