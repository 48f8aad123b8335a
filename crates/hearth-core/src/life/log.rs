use chrono::NaiveDate;

use super::models::{Interaction, LearningItem, LifeData, MoodEntry, Workout};
use super::streaks::calculate_streak;

const FITNESS_KEYWORDS: &[&str] = &[
    "gym", "workout", "lift", "ran", "run", "soccer", "tennis", "exercise", "training",
    "push day", "leg day",
];

// Ordered: the first mood word found wins.
const MOOD_KEYWORDS: &[(&str, u8)] = &[
    ("great", 9),
    ("good", 7),
    ("okay", 5),
    ("meh", 4),
    ("bad", 2),
    ("terrible", 1),
    ("awesome", 10),
    ("amazing", 10),
];

const LEARNING_KEYWORDS: &[&str] = &["read", "book", "course", "learned", "studied", "article"];

const SOCIAL_KEYWORDS: &[&str] = &[
    "hung out", "met", "call", "dinner", "lunch", "coffee", "friend", "family",
];

/// What a free-text logging attempt recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOutcome {
    /// Category labels, e.g. `"workout logged"` or `"mood: 9/10"`.
    pub logged: Vec<String>,
    /// Friendly confirmation for the user.
    pub message: String,
}

/// Scan free text for activity keywords and append matching entries to
/// the document. One message can land in several categories at once.
///
/// Matching is plain substring containment over the lowercased text.
/// Returns `None`, leaving the document untouched, when nothing matches.
pub fn log_activity(life: &mut LifeData, text: &str, today: NaiveDate) -> Option<LogOutcome> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let day = today.format("%Y-%m-%d").to_string();
    let mut logged: Vec<String> = Vec::new();

    if FITNESS_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        let kind = if lowered.contains("gym") || lowered.contains("lift") {
            "gym"
        } else if lowered.contains("run") {
            "run"
        } else {
            "workout"
        };
        life.fitness.workouts.push(Workout {
            date: day.clone(),
            kind: kind.to_string(),
            duration: Some(60),
            notes: clip(&lowered, 100),
        });
        logged.push("workout logged".to_string());
    }

    if let Some(&(_, value)) = MOOD_KEYWORDS.iter().find(|(kw, _)| lowered.contains(kw)) {
        life.mood.entries.push(MoodEntry {
            date: day.clone(),
            mood: value,
            notes: clip(&lowered, 100),
        });
        logged.push(format!("mood: {}/10", value));
    }

    if LEARNING_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        let kind = if lowered.contains("book") { "book" } else { "article" };
        life.learning.books.push(LearningItem {
            date: day.clone(),
            kind: kind.to_string(),
            title: clip(&lowered, 50),
            notes: String::new(),
        });
        logged.push("learning item logged".to_string());
    }

    if SOCIAL_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        life.social.interactions.push(Interaction {
            date: day,
            kind: "friend".to_string(),
            with_whom: clip(&lowered, 30),
            notes: String::new(),
        });
        logged.push("social interaction logged".to_string());
    }

    if logged.is_empty() {
        return None;
    }

    let message = build_message(&logged, life, today);
    Some(LogOutcome { logged, message })
}

fn build_message(logged: &[String], life: &LifeData, today: NaiveDate) -> String {
    let mut message = String::from("Got it! ");

    if logged.iter().any(|l| l == "workout logged") {
        let target = life.fitness.goals.weekly_gym_target;
        let streak = calculate_streak(&life.fitness.workouts, target, today);
        if streak.current_streak > 0 {
            message.push_str(&format!(
                "🏋️ Workout recorded! 🔥 {}-day streak! ({}/{} this week) ",
                streak.current_streak, streak.weekly_count, streak.weekly_target
            ));
        } else {
            message.push_str(&format!(
                "🏋️ Workout recorded! ({}/{} this week) ",
                streak.weekly_count, streak.weekly_target
            ));
        }
    }
    if logged.iter().any(|l| l.starts_with("mood:")) {
        message.push_str("😊 Mood noted! ");
    }
    if logged.iter().any(|l| l == "learning item logged") {
        message.push_str("📚 Learning logged! ");
    }
    if logged.iter().any(|l| l == "social interaction logged") {
        message.push_str("👥 Social time recorded! ");
    }

    message.trim_end().to_string()
}

/// First `max` characters of the text.
fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
