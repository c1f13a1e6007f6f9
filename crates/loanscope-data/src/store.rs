//! Selected-client record store.
//!
//! Each browser session owns one "currently selected client". Records are
//! kept in memory and mirrored to a small CSV file that is rewritten in full
//! on every selection, so a restart picks up where the officers left off.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use loanscope_common::entities::{days_to_years, BIRTH_COLUMN, GENDER_COLUMN};
use loanscope_common::{Gender, LoanscopeError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::frame::Frame;

/// The applicant a loan officer is currently reviewing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedClient {
    pub applicant_id: i64,
    pub row_index: usize,
    /// Whole years, truncated toward zero
    pub age: i64,
    pub gender: Gender,
}

impl SelectedClient {
    /// Derive the record for an applicant from the population.
    pub fn resolve(population: &Frame, applicant_id: i64) -> Result<Self> {
        let row_index = population.row_of(applicant_id)?;
        let days_birth = population.require(row_index, BIRTH_COLUMN)?;
        let gender_code = population.require(row_index, GENDER_COLUMN)?;

        Ok(Self {
            applicant_id,
            row_index,
            age: days_to_years(days_birth).trunc() as i64,
            gender: Gender::from_code(gender_code),
        })
    }

    /// Age as shown on the dashboard.
    pub fn age_label(&self) -> String {
        format!("{} ans", self.age)
    }
}

/// One line of the persisted file.
#[derive(Debug, Serialize, Deserialize)]
struct RecordRow {
    session: String,
    applicant_id: i64,
    row_index: usize,
    age: i64,
    gender: Gender,
}

/// File-backed map of session -> selected client.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Mutex<BTreeMap<String, SelectedClient>>,
}

impl RecordStore {
    /// Open the store, loading previously persisted selections if the file exists.
    /// Persisted selections are re-resolved against `population`; those whose
    /// applicant is gone are dropped.
    pub async fn open(path: impl Into<PathBuf>, population: &Frame) -> Result<Self> {
        let path = path.into();
        if !tokio::fs::try_exists(&path).await? {
            debug!("No selection file at {:?}, starting empty", path);
            return Ok(Self { path, records: Mutex::new(BTreeMap::new()) });
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let persisted = parse_records(&content)?;
        let (records, changed) = reconcile(persisted, population);
        info!("Loaded {} client selection(s) from {:?}", records.len(), path);

        let store = Self { path, records: Mutex::new(records) };
        if changed {
            let records = store.records.lock().await;
            store.persist(&records).await?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Select an applicant for a session, persist, and return the new record.
    pub async fn select(
        &self,
        session: &str,
        population: &Frame,
        applicant_id: i64,
    ) -> Result<SelectedClient> {
        let client = SelectedClient::resolve(population, applicant_id)?;

        let mut records = self.records.lock().await;
        let previous = records.insert(session.to_string(), client.clone());
        if let Err(e) = self.persist(&records).await {
            // keep memory and disk in step
            match previous {
                Some(prev) => records.insert(session.to_string(), prev),
                None => records.remove(session),
            };
            return Err(e);
        }

        info!(
            session = %session,
            applicant_id,
            row_index = client.row_index,
            "Client selected"
        );
        Ok(client)
    }

    /// The most recent selection of a session.
    pub async fn current(&self, session: &str) -> Result<SelectedClient> {
        self.records
            .lock()
            .await
            .get(session)
            .cloned()
            .ok_or(LoanscopeError::UninitializedState)
    }

    async fn persist(&self, records: &BTreeMap<String, SelectedClient>) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for (session, client) in records {
            writer.serialize(RecordRow {
                session: session.clone(),
                applicant_id: client.applicant_id,
                row_index: client.row_index,
                age: client.age,
                gender: client.gender,
            })?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| LoanscopeError::Io(e.into_error()))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let tmp = self.path.with_extension("csv.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn parse_records(content: &str) -> Result<BTreeMap<String, SelectedClient>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut records = BTreeMap::new();
    for row in reader.deserialize() {
        let row: RecordRow = row?;
        records.insert(
            row.session,
            SelectedClient {
                applicant_id: row.applicant_id,
                row_index: row.row_index,
                age: row.age,
                gender: row.gender,
            },
        );
    }
    Ok(records)
}

/// Re-derive every record from the population. Returns the surviving
/// records and whether any of them differ from what was on disk.
fn reconcile(
    persisted: BTreeMap<String, SelectedClient>,
    population: &Frame,
) -> (BTreeMap<String, SelectedClient>, bool) {
    let mut changed = false;
    let mut records = BTreeMap::new();
    for (session, stored) in persisted {
        match SelectedClient::resolve(population, stored.applicant_id) {
            Ok(client) => {
                if client != stored {
                    debug!(
                        session = %session,
                        applicant_id = client.applicant_id,
                        "Selection refreshed from population"
                    );
                    changed = true;
                }
                records.insert(session, client);
            }
            Err(e) => {
                warn!(
                    session = %session,
                    applicant_id = stored.applicant_id,
                    "Dropping stale selection: {}",
                    e
                );
                changed = true;
            }
        }
    }
    (records, changed)
}
