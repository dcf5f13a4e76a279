//! Versioned persistence for the schedule.
//!
//! The schedule lives in a single JSON record: a format-version tag plus the
//! full course sequence. Loading probes the tag first and dispatches on it, so
//! a future format revision is one more match arm; an unrecognized tag is an
//! explicit error, never a guess at field meaning. Saving writes to a sibling
//! temp file and renames it over the target, so a crash mid-write cannot
//! leave a half-written record behind.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::course::Course;
use crate::error::{TimetableError, TimetableResult};
use crate::store::ScheduleStore;

/// Current on-disk format revision.
pub const FORMAT_VERSION: u32 = 1;

/// Full persisted record (current shape).
#[derive(Serialize, Deserialize)]
struct PersistedSchedule {
    version: u32,
    courses: Vec<Course>,
}

/// Just the tag, read before committing to a record shape.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Gateway to the schedule's durable storage location.
pub struct ScheduleFile {
    path: PathBuf,
}

impl ScheduleFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        ScheduleFile { path: path.into() }
    }

    /// The application-default location under the platform data directory.
    pub fn default_path() -> TimetableResult<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TimetableError::Config("Could not determine data directory".into()))?
            .join("timetable");

        Ok(data_dir.join("schedule.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the persisted record into a fresh store.
    ///
    /// The decoded courses replay the store's own structural and overlap
    /// checks; a record that fails them is corrupt, not silently repaired. On
    /// any error no store is produced, so the caller's prior state stands.
    pub fn load(&self) -> TimetableResult<ScheduleStore> {
        let content = std::fs::read_to_string(&self.path)?;

        let probe: VersionProbe = serde_json::from_str(&content)
            .map_err(|e| TimetableError::Corrupt(format!("unreadable version tag: {e}")))?;

        let courses = match probe.version {
            1 => decode_v1(&content)?,
            found => {
                return Err(TimetableError::UnknownVersion {
                    found,
                    supported: FORMAT_VERSION,
                })
            }
        };

        let store = ScheduleStore::from_courses(courses)
            .map_err(|e| TimetableError::Corrupt(e.to_string()))?;
        log::debug!(
            "loaded {} courses from {}",
            store.len(),
            self.path.display()
        );
        Ok(store)
    }

    /// `load`, treating a missing file as an empty schedule (first run).
    pub fn load_or_default(&self) -> TimetableResult<ScheduleStore> {
        match self.load() {
            Err(TimetableError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no schedule file at {}, starting empty", self.path.display());
                Ok(ScheduleStore::new())
            }
            other => other,
        }
    }

    /// Serialize the full sequence under the current version tag, atomically.
    pub fn save(&self, store: &ScheduleStore) -> TimetableResult<()> {
        let record = PersistedSchedule {
            version: FORMAT_VERSION,
            courses: store.all_courses().to_vec(),
        };
        let content = serde_json::to_string_pretty(&record)
            .map_err(|e| TimetableError::Corrupt(format!("serialization failed: {e}")))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write-to-temp-then-rename keeps the old record intact on a crash.
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;

        log::debug!(
            "saved {} courses to {}",
            store.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn decode_v1(content: &str) -> TimetableResult<Vec<Course>> {
    let record: PersistedSchedule = serde_json::from_str(content)
        .map_err(|e| TimetableError::Corrupt(e.to_string()))?;
    Ok(record.courses)
}
