mod log;
mod models;
mod streaks;

pub use log::{log_activity, LogOutcome};
pub use models::{
    load_life, save_life, Fitness, Goals, Interaction, Learning, LearningItem, LifeData, Mood,
    MoodEntry, Social, Workout, LIFE_FILE,
};
pub use streaks::{achievements, calculate_streak, AchievementReport, Badge, StreakSummary};
