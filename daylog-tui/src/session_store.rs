//! Local day state that only lives until midnight.
//!
//! `session.json` points at the server-side day plan and `work_log.json`
//! caches the entries logged so far. Both are dropped once the local date
//! moves past the day they were written on.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::{Date, OffsetDateTime, UtcOffset};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::types::WorkLogItem;

const SESSION_KEY: &str = "session.json";
const WORK_LOG_KEY: &str = "work_log.json";

pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, contents: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Files under a single directory, written owner-only on unix.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.root.join(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(raw))
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        secure_write(&self.root.join(key), contents)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.root.join(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Wall clock in the local offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// Reads the local offset, falling back to UTC. Only reliable while the
    /// process is still single-threaded.
    pub fn detect() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        Self { offset }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlanSession {
    pub day_plan_id: String,
    pub plan_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub written_at: OffsetDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkLogCache {
    items: Vec<WorkLogItem>,
    #[serde(with = "time::serde::rfc3339")]
    written_at: OffsetDateTime,
}

trait Stamped {
    fn written_at(&self) -> OffsetDateTime;
}

impl Stamped for DayPlanSession {
    fn written_at(&self) -> OffsetDateTime {
        self.written_at
    }
}

impl Stamped for WorkLogCache {
    fn written_at(&self) -> OffsetDateTime {
        self.written_at
    }
}

pub struct SessionStore<S: Storage, C: Clock> {
    storage: S,
    clock: C,
}

impl SessionStore<FileStorage, SystemClock> {
    pub fn on_disk(root: PathBuf, clock: SystemClock) -> Self {
        Self::new(FileStorage::new(root), clock)
    }
}

impl<S: Storage, C: Clock> SessionStore<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    pub fn today(&self) -> Date {
        self.clock.now().date()
    }

    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// True once local midnight has passed since `written_at`.
    fn is_expired(&self, written_at: OffsetDateTime) -> bool {
        let now = self.clock.now();
        now.date() > written_at.to_offset(now.offset()).date()
    }

    fn load<T: DeserializeOwned + Stamped>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.storage.read(key)? else {
            return Ok(None);
        };

        let value: T = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("discarding malformed {}: {}", key, e);
                self.storage.remove(key)?;
                return Ok(None);
            }
        };

        if self.is_expired(value.written_at()) {
            tracing::debug!("{} is from a previous day, clearing", key);
            self.storage.remove(key)?;
            return Ok(None);
        }

        Ok(Some(value))
    }

    fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.storage.write(key, &raw)
    }

    pub fn load_day_plan(&self) -> Result<Option<DayPlanSession>> {
        self.load(SESSION_KEY)
    }

    pub fn save_day_plan(&self, day_plan_id: &str, plan_date: Date) -> Result<()> {
        self.store(
            SESSION_KEY,
            &DayPlanSession {
                day_plan_id: day_plan_id.to_string(),
                plan_date,
                written_at: self.clock.now(),
            },
        )
    }

    pub fn load_work_log(&self) -> Result<Vec<WorkLogItem>> {
        Ok(self
            .load::<WorkLogCache>(WORK_LOG_KEY)?
            .map(|cache| cache.items)
            .unwrap_or_default())
    }

    pub fn save_work_log(&self, items: &[WorkLogItem]) -> Result<()> {
        self.store(
            WORK_LOG_KEY,
            &WorkLogCache {
                items: items.to_vec(),
                written_at: self.clock.now(),
            },
        )
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove(SESSION_KEY)?;
        self.storage.remove(WORK_LOG_KEY)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;
    use time::macros::{date, datetime};

    #[derive(Clone, Default)]
    pub struct MemoryStorage {
        files: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        pub fn contains(&self, key: &str) -> bool {
            self.files.borrow().contains_key(key)
        }
    }

    impl Storage for MemoryStorage {
        fn read(&self, key: &str) -> Result<Option<String>> {
            Ok(self.files.borrow().get(key).cloned())
        }

        fn write(&self, key: &str, contents: &str) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(key.to_string(), contents.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.files.borrow_mut().remove(key);
            Ok(())
        }
    }

    #[derive(Clone)]
    pub struct FixedClock {
        now: Rc<Cell<OffsetDateTime>>,
    }

    impl FixedClock {
        pub fn at(now: OffsetDateTime) -> Self {
            Self {
                now: Rc::new(Cell::new(now)),
            }
        }

        pub fn set(&self, now: OffsetDateTime) {
            self.now.set(now);
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> OffsetDateTime {
            self.now.get()
        }
    }

    fn item(id: &str) -> WorkLogItem {
        WorkLogItem {
            id: id.to_string(),
            description: "Review".to_string(),
            timestamp: datetime!(2025-03-01 09:00 UTC),
            project_id: None,
            project_source: None,
            unplanned_reason: Some("Meeting".to_string()),
            mentioned_issues: None,
            duration_minutes: Some(30),
        }
    }

    #[test]
    fn session_survives_the_day_and_expires_after_midnight() {
        let storage = MemoryStorage::default();
        let clock = FixedClock::at(datetime!(2025-03-01 08:00 +1));
        let store = SessionStore::new(storage.clone(), clock.clone());

        store.save_day_plan("plan-1", date!(2025-03-01)).unwrap();
        store.save_work_log(&[item("a")]).unwrap();

        clock.set(datetime!(2025-03-01 23:59 +1));
        let session = store.load_day_plan().unwrap().unwrap();
        assert_eq!(session.day_plan_id, "plan-1");
        assert_eq!(store.load_work_log().unwrap().len(), 1);

        clock.set(datetime!(2025-03-02 00:01 +1));
        assert_eq!(store.load_day_plan().unwrap(), None);
        assert!(store.load_work_log().unwrap().is_empty());
        assert!(!storage.contains(SESSION_KEY));
        assert!(!storage.contains(WORK_LOG_KEY));
    }

    #[test]
    fn malformed_session_is_treated_as_absent_and_removed() {
        let storage = MemoryStorage::default();
        storage.write(SESSION_KEY, "{not json").unwrap();
        let store = SessionStore::new(
            storage.clone(),
            FixedClock::at(datetime!(2025-03-01 08:00 UTC)),
        );

        assert_eq!(store.load_day_plan().unwrap(), None);
        assert!(!storage.contains(SESSION_KEY));
    }

    #[test]
    fn clear_removes_everything() {
        let storage = MemoryStorage::default();
        let store = SessionStore::new(
            storage.clone(),
            FixedClock::at(datetime!(2025-03-01 08:00 UTC)),
        );
        store.save_day_plan("plan-1", date!(2025-03-01)).unwrap();
        store.save_work_log(&[item("a")]).unwrap();

        store.clear().unwrap();
        assert!(!storage.contains(SESSION_KEY));
        assert!(!storage.contains(WORK_LOG_KEY));
    }
}
