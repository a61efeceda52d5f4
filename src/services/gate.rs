// src/services/gate.rs

//! Once-per-day participation gate.
//!
//! The last participation date lives in a small JSON key/value file on the
//! local device. It is keyed to the device, not to a participant, so clearing
//! the file or switching machines bypasses it.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use thiserror::Error;

pub const PARTICIPATION_KEY: &str = "lastQuizParticipation";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum GateError {
    #[error("failed to access gate storage: {0}")]
    Io(#[from] io::Error),
    #[error("gate storage is not a JSON object: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Device-local calendar date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a settable date.
#[derive(Debug)]
pub struct FixedClock(Mutex<NaiveDate>);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        FixedClock(Mutex::new(date))
    }

    pub fn set(&self, date: NaiveDate) {
        *self.0.lock() = date;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.0.lock()
    }
}

/// String key/value pairs persisted as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, GateError> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), GateError> {
        // A corrupt file is replaced rather than blocking the write.
        let mut items = self.read_all().unwrap_or_default();
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write beside the target and rename over it, so an interrupted write
        // never leaves a truncated file behind.
        let staging = self.staging_path();
        fs::write(&staging, serde_json::to_vec_pretty(&items)?)?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, GateError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Clone)]
pub struct DailyGate {
    storage: LocalStorage,
    clock: Arc<dyn Clock>,
}

impl DailyGate {
    pub fn new(storage: LocalStorage, clock: Arc<dyn Clock>) -> Self {
        DailyGate { storage, clock }
    }

    /// True unless the stored participation date is today.
    pub fn is_eligible(&self) -> bool {
        let today = self.clock.today();
        match self.storage.get_item(PARTICIPATION_KEY) {
            Ok(Some(value)) => match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
                Ok(last) => last != today,
                Err(_) => {
                    tracing::warn!("Ignoring unparsable participation date {:?}", value);
                    true
                }
            },
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(
                    "Could not read participation record at {}: {}",
                    self.storage.path().display(),
                    e
                );
                true
            }
        }
    }

    pub fn mark_participated(&self) -> Result<(), GateError> {
        let today = self.clock.today().format(DATE_FORMAT).to_string();
        self.storage.set_item(PARTICIPATION_KEY, &today)?;
        tracing::debug!("Participation recorded for {}", today);
        Ok(())
    }
}
