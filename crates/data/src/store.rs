//! Flat-file store: `events.json` and `ratings.json` under a data directory.
//!
//! Writes are whole-file. The store is intentionally dumb; validation and
//! state transitions live in the tracker and engine, and the store persists
//! whatever well-formed records it is handed.

use anyhow::{Context, Result};
use catalyst_rater_core::{Event, Rating};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One row of the combined export: an event joined with its latest rating,
/// if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRecord {
    pub event: Event,
    pub rating: Option<Rating>,
}

pub struct EventStore {
    events_path: PathBuf,
    ratings_path: PathBuf,
}

impl EventStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(Self {
            events_path: dir.join("events.json"),
            ratings_path: dir.join("ratings.json"),
        })
    }

    /// Loads all events. A missing file is an empty store.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_events(&self) -> Result<Vec<Event>> {
        read_json(&self.events_path)
    }

    /// Replaces the event file wholesale.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save_events(&self, events: &[Event]) -> Result<()> {
        write_json(&self.events_path, events)?;
        tracing::debug!(count = events.len(), path = %self.events_path.display(), "Saved events");
        Ok(())
    }

    /// Inserts or replaces an event by id.
    ///
    /// # Errors
    /// Returns an error on any load or save failure.
    pub fn upsert_event(&self, event: &Event) -> Result<()> {
        let mut events = self.load_events()?;
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => *slot = event.clone(),
            None => events.push(event.clone()),
        }
        self.save_events(&events)
    }

    /// Looks up one event by id.
    ///
    /// # Errors
    /// Returns an error on a load failure.
    pub fn get_event(&self, id: &str) -> Result<Option<Event>> {
        Ok(self.load_events()?.into_iter().find(|e| e.id == id))
    }

    /// Removes an event by id. Returns whether anything was removed. The
    /// event's rating, if present, goes with it.
    ///
    /// # Errors
    /// Returns an error on any load or save failure.
    pub fn delete_event(&self, id: &str) -> Result<bool> {
        let mut events = self.load_events()?;
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Ok(false);
        }
        self.save_events(&events)?;

        let mut ratings = self.load_ratings()?;
        ratings.retain(|r| r.event_id != id);
        write_json(&self.ratings_path, &ratings)?;
        Ok(true)
    }

    /// Loads all ratings. A missing file is an empty store.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_ratings(&self) -> Result<Vec<Rating>> {
        read_json(&self.ratings_path)
    }

    /// Inserts or replaces the rating for its event. Last write wins, so
    /// re-scoring an event leaves exactly one rating behind.
    ///
    /// # Errors
    /// Returns an error on any load or save failure.
    pub fn upsert_rating(&self, rating: &Rating) -> Result<()> {
        let mut ratings = self.load_ratings()?;
        match ratings.iter_mut().find(|r| r.event_id == rating.event_id) {
            Some(slot) => *slot = rating.clone(),
            None => ratings.push(rating.clone()),
        }
        write_json(&self.ratings_path, &ratings)?;
        tracing::debug!(event_id = %rating.event_id, grade = %rating.grade, "Saved rating");
        Ok(())
    }

    /// Latest rating for an event, if one has been stored.
    ///
    /// # Errors
    /// Returns an error on a load failure.
    pub fn rating_for(&self, event_id: &str) -> Result<Option<Rating>> {
        Ok(self
            .load_ratings()?
            .into_iter()
            .find(|r| r.event_id == event_id))
    }

    /// Writes the combined event+rating export to `path`.
    ///
    /// # Errors
    /// Returns an error on any load or write failure.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<Vec<ExportRecord>> {
        let ratings = self.load_ratings()?;
        let records: Vec<ExportRecord> = self
            .load_events()?
            .into_iter()
            .map(|event| {
                let rating = ratings.iter().find(|r| r.event_id == event.id).cloned();
                ExportRecord { event, rating }
            })
            .collect();
        write_json(path.as_ref(), &records)?;
        tracing::info!(count = records.len(), path = %path.as_ref().display(), "Exported records");
        Ok(records)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value).context("Failed to serialize records")?;
    fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))
}
