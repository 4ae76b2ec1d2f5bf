//! Versioned classifier parameters and their accuracy history.
//!
//! The store is a plain collaborator: classification and evaluation never
//! read it implicitly. A caller loads [`ParameterStore::active`], passes the
//! config into `classify`/`evaluate`, and writes results back.
//!
//! History is append-only. A commit adds a new record and the newest record
//! is the active one; nothing is ever edited in place.

use crate::config::ClassifierConfig;
use crate::error::{GiziError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Accuracy records returned by default, newest first.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One committed classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Sequential id, starting at 1.
    pub id: u64,
    /// The configuration committed.
    pub config: ClassifierConfig,
    /// Who made the change, if known.
    pub changed_by: Option<String>,
    /// Commit time.
    pub changed_at: DateTime<Utc>,
}

/// An accuracy measured for a committed configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyRecord {
    /// Record the accuracy belongs to.
    pub parameter_id: u64,
    /// Fraction in [0, 1].
    pub accuracy: f64,
    /// Measurement time.
    pub recorded_at: DateTime<Utc>,
}

/// Accuracy record joined with the configuration it measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyEntry {
    /// The measurement.
    pub record: AccuracyRecord,
    /// The configuration that was measured.
    pub config: ClassifierConfig,
}

/// Append-only storage of classifier configurations.
pub trait ParameterStore {
    /// The most recently committed record.
    ///
    /// # Errors
    ///
    /// Implementation defined; the in-memory store always has one.
    fn active(&self) -> Result<ParameterRecord>;

    /// Validates and appends `config`, making it active.
    ///
    /// # Errors
    ///
    /// `InvalidHyperparameter` if the config does not validate.
    fn commit(
        &mut self,
        config: ClassifierConfig,
        changed_by: Option<String>,
    ) -> Result<ParameterRecord>;

    /// Looks up a record by id.
    fn get(&self, id: u64) -> Option<ParameterRecord>;

    /// Every record, oldest first.
    fn history(&self) -> Vec<ParameterRecord>;

    /// Stores an accuracy measured for record `parameter_id`.
    ///
    /// # Errors
    ///
    /// `RecordNotFound` for an unknown id, `InvalidHyperparameter` for an
    /// accuracy outside [0, 1].
    fn record_accuracy(&mut self, parameter_id: u64, accuracy: f64) -> Result<AccuracyRecord>;

    /// Up to `limit` accuracy records, newest first.
    fn accuracy_history(&self, limit: usize) -> Vec<AccuracyRecord>;

    /// [`ParameterStore::accuracy_history`] joined with the measured configs.
    fn accuracy_entries(&self, limit: usize) -> Vec<AccuracyEntry> {
        self.accuracy_history(limit)
            .into_iter()
            .filter_map(|record| {
                self.get(record.parameter_id)
                    .map(|p| AccuracyEntry { record, config: p.config })
            })
            .collect()
    }
}

/// In-memory [`ParameterStore`], seeded with [`ClassifierConfig::default`].
#[derive(Debug, Clone)]
pub struct InMemoryParameterStore {
    records: Vec<ParameterRecord>,
    accuracies: Vec<AccuracyRecord>,
}

impl Default for InMemoryParameterStore {
    fn default() -> Self {
        Self::with_initial(ClassifierConfig::default())
    }
}

impl InMemoryParameterStore {
    /// Store holding only the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `config` as record 1.
    #[must_use]
    pub fn with_initial(config: ClassifierConfig) -> Self {
        Self {
            records: vec![ParameterRecord {
                id: 1,
                config,
                changed_by: None,
                changed_at: Utc::now(),
            }],
            accuracies: Vec::new(),
        }
    }

    /// Number of committed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: the store is seeded on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.records.last().map_or(1, |r| r.id + 1)
    }
}

impl ParameterStore for InMemoryParameterStore {
    fn active(&self) -> Result<ParameterRecord> {
        self.records
            .last()
            .cloned()
            .ok_or(GiziError::RecordNotFound(0))
    }

    fn commit(
        &mut self,
        config: ClassifierConfig,
        changed_by: Option<String>,
    ) -> Result<ParameterRecord> {
        config.validate()?;
        let record = ParameterRecord {
            id: self.next_id(),
            config,
            changed_by,
            changed_at: Utc::now(),
        };
        info!(
            id = record.id,
            k = record.config.k,
            changed_by = record.changed_by.as_deref().unwrap_or("-"),
            "classifier parameters committed"
        );
        self.records.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: u64) -> Option<ParameterRecord> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    fn history(&self) -> Vec<ParameterRecord> {
        self.records.clone()
    }

    fn record_accuracy(&mut self, parameter_id: u64, accuracy: f64) -> Result<AccuracyRecord> {
        if self.get(parameter_id).is_none() {
            return Err(GiziError::RecordNotFound(parameter_id));
        }
        if !(0.0..=1.0).contains(&accuracy) {
            return Err(GiziError::invalid_hyperparameter(
                "accuracy",
                accuracy,
                "in [0, 1]",
            ));
        }
        let record = AccuracyRecord {
            parameter_id,
            accuracy,
            recorded_at: Utc::now(),
        };
        self.accuracies.push(record.clone());
        Ok(record)
    }

    fn accuracy_history(&self, limit: usize) -> Vec<AccuracyRecord> {
        self.accuracies.iter().rev().take(limit).cloned().collect()
    }
}
