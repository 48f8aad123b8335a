use serde::{Deserialize, Serialize};

use crate::store::{self, BlobStore};
use crate::Result;

/// Blob name for the life-metrics document.
pub const LIFE_FILE: &str = "life.json";

/// Whole life-metrics document, persisted as a single blob.
///
/// Every container defaults, so a missing or hand-mangled file loads as
/// an empty document instead of erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeData {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub fitness: Fitness,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub learning: Learning,
    #[serde(default)]
    pub social: Social,
}

impl Default for LifeData {
    fn default() -> Self {
        Self {
            version: default_version(),
            fitness: Fitness::default(),
            mood: Mood::default(),
            learning: Learning::default(),
            social: Social::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub goals: Goals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default = "default_weekly_target")]
    pub weekly_gym_target: u32,
    #[serde(default = "default_primary_goal")]
    pub primary: String,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            weekly_gym_target: default_weekly_target(),
            primary: default_primary_goal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// `yyyy-mm-dd`; longer timestamps are tolerated by keying on the
    /// first ten characters.
    pub date: String,
    #[serde(rename = "type", default = "default_workout_kind")]
    pub kind: String,
    /// Minutes; absent when the entry came in without one.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    #[serde(default)]
    pub entries: Vec<MoodEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: String,
    /// 1-10 scale.
    pub mood: u8,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Learning {
    #[serde(default)]
    pub books: Vec<LearningItem>,
    #[serde(default)]
    pub courses: Vec<LearningItem>,
    #[serde(default)]
    pub skills: Vec<LearningItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningItem {
    pub date: String,
    #[serde(rename = "type", default = "default_learning_kind")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub date: String,
    #[serde(rename = "type", default = "default_interaction_kind")]
    pub kind: String,
    #[serde(rename = "with")]
    pub with_whom: String,
    #[serde(default)]
    pub notes: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_weekly_target() -> u32 {
    4
}

fn default_primary_goal() -> String {
    "Build strength and muscle mass".to_string()
}

fn default_workout_kind() -> String {
    "gym".to_string()
}

fn default_learning_kind() -> String {
    "book".to_string()
}

fn default_interaction_kind() -> String {
    "friend".to_string()
}

/// Load the life document; a missing or corrupt blob is the default one.
pub fn load_life(store: &dyn BlobStore) -> LifeData {
    store::load_json(store, LIFE_FILE).unwrap_or_default()
}

pub fn save_life(store: &dyn BlobStore, life: &LifeData) -> Result<()> {
    store::save_json(store, LIFE_FILE, life)
}
