use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{self, BlobStore};
use crate::Result;

/// Blob name for the persisted chore list.
pub const CHORES_FILE: &str = "chores.json";

/// Cadence kind for a chore.
///
/// Deserialization is lenient: an unrecognized kind in persisted data
/// becomes `Daily`, so a chore with a mangled schedule keeps showing up
/// every day instead of silently disappearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    OneTime,
}

impl Schedule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Schedule::Daily => "daily",
            Schedule::Weekly => "weekly",
            Schedule::Monthly => "monthly",
            Schedule::Yearly => "yearly",
            Schedule::OneTime => "onetime",
        }
    }

    /// Lenient parse for persisted data; anything unrecognized is `Daily`.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or(Schedule::Daily)
    }
}

impl std::str::FromStr for Schedule {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Schedule::Daily),
            "weekly" => Ok(Schedule::Weekly),
            "monthly" => Ok(Schedule::Monthly),
            "yearly" => Ok(Schedule::Yearly),
            "onetime" => Ok(Schedule::OneTime),
            other => Err(crate::Error::Config(format!(
                "Unknown schedule kind: {}",
                other
            ))),
        }
    }
}

impl Serialize for Schedule {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Schedule::parse_lenient(&raw))
    }
}

/// A recurring (or one-shot) household task.
///
/// `schedule_param` carries the cadence-specific encoding (see the
/// evaluator docs) and `last_done` is a `yyyy-mm-dd` string, empty when
/// the chore has never been completed. Both stay raw strings so a
/// hand-edited file can never make the list unloadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    pub name: String,
    pub schedule: Schedule,
    #[serde(default)]
    pub schedule_param: String,
    #[serde(default)]
    pub last_done: String,
}

/// Completion state parsed out of the raw `last_done` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Never completed.
    Never,
    /// Completed on the given day.
    On(NaiveDate),
    /// `last_done` holds something that is not a date.
    Unreadable,
}

impl Chore {
    pub fn new(name: impl Into<String>, schedule: Schedule, schedule_param: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schedule,
            schedule_param: schedule_param.into(),
            last_done: String::new(),
        }
    }

    pub fn completion(&self) -> Completion {
        let raw = self.last_done.trim();
        if raw.is_empty() {
            return Completion::Never;
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Completion::On(date),
            Err(_) => Completion::Unreadable,
        }
    }
}

/// Load the chore list; a missing or corrupt blob is an empty list.
pub fn load_chores(store: &dyn BlobStore) -> Vec<Chore> {
    store::load_json(store, CHORES_FILE).unwrap_or_default()
}

pub fn save_chores(store: &dyn BlobStore, chores: &[Chore]) -> Result<()> {
    store::save_json(store, CHORES_FILE, &chores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn schedule_round_trips_through_json() {
        let chore = Chore {
            name: "Water plants".to_string(),
            schedule: Schedule::OneTime,
            schedule_param: "2026-09-01".to_string(),
            last_done: String::new(),
        };

        let json = serde_json::to_string(&chore).unwrap();
        assert!(json.contains("\"onetime\""));

        let back: Chore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chore);
    }

    #[test]
    fn unknown_schedule_kind_becomes_daily() {
        let chore: Chore =
            serde_json::from_str(r#"{"name":"x","schedule":"fortnightly","schedule_param":""}"#)
                .unwrap();
        assert_eq!(chore.schedule, Schedule::Daily);
    }

    #[test]
    fn completion_states() {
        let mut chore = Chore::new("x", Schedule::Daily, "");
        assert_eq!(chore.completion(), Completion::Never);

        chore.last_done = "2026-08-20".to_string();
        assert_eq!(
            chore.completion(),
            Completion::On(NaiveDate::from_ymd_opt(2026, 8, 20).unwrap())
        );

        chore.last_done = "last tuesday".to_string();
        assert_eq!(chore.completion(), Completion::Unreadable);
    }

    #[test]
    fn chore_list_round_trips_through_store() {
        let store = MemoryStore::new();
        let chores = vec![
            Chore::new("Vacuum", Schedule::Weekly, "1,0"),
            Chore::new("Filters", Schedule::Monthly, "15"),
        ];

        save_chores(&store, &chores).unwrap();
        assert_eq!(load_chores(&store), chores);
    }

    #[test]
    fn missing_or_corrupt_blob_loads_empty() {
        let store = MemoryStore::new();
        assert!(load_chores(&store).is_empty());

        store.write(CHORES_FILE, "not json").unwrap();
        assert!(load_chores(&store).is_empty());
    }
}
