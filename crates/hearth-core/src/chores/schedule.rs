use chrono::{Datelike, NaiveDate};

use super::models::{Chore, Completion, Schedule};

/// Cadence parsed out of `schedule_param`.
enum Cadence {
    Daily,
    Weekly { weeks: u32, weekday: u32 },
    Monthly { day: u32 },
    Yearly { month: u32, day: u32 },
    OneTime { date: NaiveDate },
}

/// Interpret `schedule_param` for the chore's cadence kind.
///
/// Encodings:
/// - daily: param ignored
/// - weekly: `"<weeks>,<dow>"` with 0 = Monday; a bare integer is the
///   weekday with the week multiplier defaulting to 1
/// - monthly: day of month, 1..=31
/// - yearly: `"mm-dd"`
/// - onetime: `"yyyy-mm-dd"`
fn parse_cadence(chore: &Chore) -> Option<Cadence> {
    let param = chore.schedule_param.trim();

    match chore.schedule {
        Schedule::Daily => Some(Cadence::Daily),
        Schedule::Weekly => {
            let (weeks, weekday) = match param.split_once(',') {
                Some((w, d)) => (w.trim().parse().ok()?, d.trim().parse().ok()?),
                None => (1, param.parse().ok()?),
            };
            if weekday > 6 {
                return None;
            }
            Some(Cadence::Weekly { weeks, weekday })
        }
        Schedule::Monthly => {
            let day: u32 = param.parse().ok()?;
            if !(1..=31).contains(&day) {
                return None;
            }
            Some(Cadence::Monthly { day })
        }
        Schedule::Yearly => {
            let (month, day) = param.split_once('-')?;
            let month: u32 = month.parse().ok()?;
            let day: u32 = day.parse().ok()?;
            if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
                return None;
            }
            Some(Cadence::Yearly { month, day })
        }
        Schedule::OneTime => {
            let date = NaiveDate::parse_from_str(param, "%Y-%m-%d").ok()?;
            Some(Cadence::OneTime { date })
        }
    }
}

/// True when the chore's trigger condition holds today.
///
/// Fails open: a malformed `schedule_param` or an unreadable `last_done`
/// makes the chore due, so bad data surfaces on the dashboard instead of
/// hiding the chore.
pub fn due_today(chore: &Chore, today: NaiveDate) -> bool {
    let cadence = match parse_cadence(chore) {
        Some(cadence) => cadence,
        None => return true,
    };

    let last_done = match chore.completion() {
        Completion::Never => None,
        Completion::On(date) => Some(date),
        Completion::Unreadable => return true,
    };

    match cadence {
        // Daily chores are due every day, even right after being marked done.
        Cadence::Daily => true,
        Cadence::Weekly { weeks, weekday } => {
            today.weekday().num_days_from_monday() == weekday
                && last_done.map_or(true, |done| {
                    today.signed_duration_since(done).num_days() >= i64::from(weeks) * 7
                })
        }
        Cadence::Monthly { day } => {
            // The month gate is a flat 30 days rather than a calendar month.
            today.day() == day
                && last_done.map_or(true, |done| {
                    today.signed_duration_since(done).num_days() >= 30
                })
        }
        Cadence::Yearly { month, day } => today.month() == month && today.day() == day,
        Cadence::OneTime { date } => today == date,
    }
}

/// True when the chore's trigger already passed this period without a
/// completion. A chore completed today is never overdue; beyond that the
/// rules are cadence-specific and deliberately cruder than `due_today`:
/// a malformed weekly/monthly param reads as not overdue, and the yearly
/// and onetime comparisons work on the raw strings (lexicographic order
/// matches chronological order for zero-padded dates).
pub fn overdue(chore: &Chore, today: NaiveDate) -> bool {
    if chore.completion() == Completion::On(today) {
        return false;
    }

    match chore.schedule {
        // No grace period: a daily chore not done today is already overdue.
        Schedule::Daily => true,
        Schedule::Weekly => match parse_cadence(chore) {
            Some(Cadence::Weekly { weekday, .. }) => {
                today.weekday().num_days_from_monday() > weekday
            }
            _ => false,
        },
        Schedule::Monthly => match parse_cadence(chore) {
            Some(Cadence::Monthly { day }) => today.day() > day,
            _ => false,
        },
        Schedule::Yearly => today.format("%m-%d").to_string() > chore.schedule_param,
        Schedule::OneTime => chore.schedule_param < today.format("%Y-%m-%d").to_string(),
    }
}

/// Names of the chores due today, in list order (duplicates included).
pub fn due_chores(chores: &[Chore], today: NaiveDate) -> Vec<String> {
    chores
        .iter()
        .filter(|chore| due_today(chore, today))
        .map(|chore| chore.name.clone())
        .collect()
}

/// Names of the overdue chores, in list order.
pub fn overdue_chores(chores: &[Chore], today: NaiveDate) -> Vec<String> {
    chores
        .iter()
        .filter(|chore| overdue(chore, today))
        .map(|chore| chore.name.clone())
        .collect()
}
