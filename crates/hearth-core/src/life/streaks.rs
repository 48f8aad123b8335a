use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use super::models::Workout;

/// Current-streak and weekly-progress summary for the fitness card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub weekly_count: u32,
    pub weekly_target: u32,
    pub weekly_progress_pct: u32,
}

/// One badge, unlocked or pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementReport {
    pub achievements: Vec<Badge>,
    pub total_workouts: u32,
    pub longest_streak: u32,
    /// First still-locked badge, if any remain.
    pub next_badge: Option<Badge>,
}

/// Walk backward from `today` counting consecutive workout days.
///
/// Today itself is optional: a day with no workout logged yet falls
/// through to yesterday instead of breaking the streak. The walk stops
/// after 365 days as a safety limit.
pub fn calculate_streak(workouts: &[Workout], target: u32, today: NaiveDate) -> StreakSummary {
    if workouts.is_empty() {
        return StreakSummary {
            current_streak: 0,
            weekly_count: 0,
            weekly_target: target,
            weekly_progress_pct: 0,
        };
    }

    let week_dates: HashSet<String> = (0..7)
        .map(|i| (today - Duration::days(i)).format("%Y-%m-%d").to_string())
        .collect();
    let weekly_count = workouts
        .iter()
        .filter(|w| week_dates.contains(workout_day(w)))
        .count() as u32;

    let workout_dates: HashSet<&str> = workouts.iter().map(workout_day).collect();

    let mut streak = 0u32;
    let mut check = today;
    loop {
        let day = check.format("%Y-%m-%d").to_string();
        if workout_dates.contains(day.as_str()) {
            streak += 1;
            check = check - Duration::days(1);
        } else if check == today {
            // Today not logged yet; look at yesterday before giving up.
            check = check - Duration::days(1);
        } else {
            break;
        }
        if streak > 365 {
            break;
        }
    }

    let weekly_progress_pct = if target == 0 {
        0
    } else {
        (weekly_count * 100 / target).min(100)
    };

    StreakSummary {
        current_streak: streak,
        weekly_count,
        weekly_target: target,
        weekly_progress_pct,
    }
}

const BADGES: &[(&str, &str, &str, &str)] = &[
    ("first_workout", "First Step", "Completed your first workout", "🌱"),
    ("five_workouts", "Getting Started", "Completed 5 workouts", "💪"),
    ("ten_workouts", "Consistent", "Completed 10 workouts", "🔥"),
    ("twenty_workouts", "Dedicated", "Completed 20 workouts", "⭐"),
    ("fifty_workouts", "Beast Mode", "Completed 50 workouts", "🦍"),
    ("streak_3", "3-Day Streak", "3 days in a row", "🎯"),
    ("streak_7", "Week Warrior", "7 days in a row", "🗓️"),
    ("streak_14", "Fortnight Fighter", "14 days in a row", "🛡️"),
    ("streak_30", "Monthly Master", "30 days in a row", "👑"),
];

fn unlocked(id: &str, total: u32, longest: u32) -> bool {
    match id {
        "first_workout" => total >= 1,
        "five_workouts" => total >= 5,
        "ten_workouts" => total >= 10,
        "twenty_workouts" => total >= 20,
        "fifty_workouts" => total >= 50,
        "streak_3" => longest >= 3,
        "streak_7" => longest >= 7,
        "streak_14" => longest >= 14,
        "streak_30" => longest >= 30,
        _ => false,
    }
}

/// Badges earned from the workout history, plus the next one to chase.
pub fn achievements(workouts: &[Workout]) -> AchievementReport {
    if workouts.is_empty() {
        return AchievementReport {
            achievements: Vec::new(),
            total_workouts: 0,
            longest_streak: 0,
            next_badge: None,
        };
    }

    let total = workouts.len() as u32;
    let longest = longest_streak(workouts);

    let mut earned = Vec::new();
    let mut next_badge = None;
    for &(id, name, desc, icon) in BADGES {
        let badge = Badge { id, name, desc, icon };
        if unlocked(id, total, longest) {
            earned.push(badge);
        } else if next_badge.is_none() {
            next_badge = Some(badge);
        }
    }

    AchievementReport {
        achievements: earned,
        total_workouts: total,
        longest_streak: longest,
        next_badge,
    }
}

/// Longest run of consecutive workout days anywhere in the history.
/// Duplicate same-day entries count once; unparsable dates are ignored.
fn longest_streak(workouts: &[Workout]) -> u32 {
    let mut dates: Vec<NaiveDate> = workouts
        .iter()
        .filter_map(|w| NaiveDate::parse_from_str(workout_day(w), "%Y-%m-%d").ok())
        .collect();
    dates.sort_unstable();
    dates.dedup();

    let mut longest = 0u32;
    let mut current = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for date in dates {
        current = match prev {
            Some(p) if date.signed_duration_since(p).num_days() == 1 => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        prev = Some(date);
    }
    longest
}

/// First ten characters of the date field, tolerating full timestamps.
fn workout_day(workout: &Workout) -> &str {
    workout.date.get(..10).unwrap_or(&workout.date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(date: &str) -> Workout {
        Workout {
            date: date.to_string(),
            kind: "gym".to_string(),
            duration: Some(60),
            notes: String::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_history_is_all_zeroes() {
        let summary = calculate_streak(&[], 4, day(2026, 8, 24));
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.weekly_progress_pct, 0);
    }

    #[test]
    fn consecutive_days_count_back_from_today() {
        let workouts = vec![
            workout("2026-08-24"),
            workout("2026-08-23"),
            workout("2026-08-22"),
        ];
        let summary = calculate_streak(&workouts, 4, day(2026, 8, 24));

        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.weekly_count, 3);
        assert_eq!(summary.weekly_progress_pct, 75);
    }

    #[test]
    fn unlogged_today_falls_through_to_yesterday() {
        let workouts = vec![workout("2026-08-23"), workout("2026-08-22")];
        let summary = calculate_streak(&workouts, 4, day(2026, 8, 24));

        assert_eq!(summary.current_streak, 2);
    }

    #[test]
    fn gap_before_yesterday_means_no_streak() {
        let workouts = vec![workout("2026-08-21")];
        let summary = calculate_streak(&workouts, 4, day(2026, 8, 24));

        assert_eq!(summary.current_streak, 0);
    }

    #[test]
    fn weekly_progress_caps_at_one_hundred() {
        let workouts = vec![
            workout("2026-08-24"),
            workout("2026-08-23"),
            workout("2026-08-22"),
            workout("2026-08-21"),
            workout("2026-08-20"),
        ];
        let summary = calculate_streak(&workouts, 4, day(2026, 8, 24));

        assert_eq!(summary.weekly_count, 5);
        assert_eq!(summary.weekly_progress_pct, 100);
    }

    #[test]
    fn timestamps_key_on_the_day_part() {
        let workouts = vec![workout("2026-08-24T07:30:00")];
        let summary = calculate_streak(&workouts, 4, day(2026, 8, 24));

        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.weekly_count, 1);
    }

    #[test]
    fn badges_unlock_on_totals_and_streaks() {
        let workouts: Vec<Workout> = (1..=10)
            .map(|i| workout(&format!("2026-08-{:02}", i)))
            .collect();

        let report = achievements(&workouts);

        assert_eq!(report.total_workouts, 10);
        assert_eq!(report.longest_streak, 10);
        let ids: Vec<&str> = report.achievements.iter().map(|b| b.id).collect();
        assert_eq!(
            ids,
            vec!["first_workout", "five_workouts", "ten_workouts", "streak_3", "streak_7"]
        );
        assert_eq!(report.next_badge.as_ref().unwrap().id, "twenty_workouts");
    }

    #[test]
    fn longest_streak_ignores_duplicates_and_gaps() {
        let workouts = vec![
            workout("2026-08-01"),
            workout("2026-08-01"),
            workout("2026-08-02"),
            workout("2026-08-10"),
            workout("2026-08-11"),
            workout("2026-08-12"),
        ];

        let report = achievements(&workouts);
        assert_eq!(report.longest_streak, 3);
        assert_eq!(report.total_workouts, 6);
    }

    #[test]
    fn no_workouts_reports_nothing_pending() {
        let report = achievements(&[]);
        assert!(report.achievements.is_empty());
        assert!(report.next_badge.is_none());
    }
}
