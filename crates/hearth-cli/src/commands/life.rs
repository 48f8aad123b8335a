use anyhow::Result;
use chrono::Local;

use hearth_core::life::{achievements, calculate_streak, load_life, log_activity, save_life};
use hearth_core::store::BlobStore;

pub fn streaks(store: &dyn BlobStore) -> Result<()> {
    let life = load_life(store);
    let today = Local::now().date_naive();

    let streak = calculate_streak(
        &life.fitness.workouts,
        life.fitness.goals.weekly_gym_target,
        today,
    );
    let report = achievements(&life.fitness.workouts);

    println!("Fitness:");
    println!("  Current streak: {} days", streak.current_streak);
    println!(
        "  This week: {}/{} workouts ({}%)",
        streak.weekly_count, streak.weekly_target, streak.weekly_progress_pct
    );
    println!("  Total workouts: {}", report.total_workouts);
    println!("  Longest streak: {} days", report.longest_streak);

    if !report.achievements.is_empty() {
        println!("\nUnlocked ({}):", report.achievements.len());
        for badge in &report.achievements {
            println!("  {} {} - {}", badge.icon, badge.name, badge.desc);
        }
    }

    if let Some(next) = &report.next_badge {
        println!("\nNext up: {} {} - {}", next.icon, next.name, next.desc);
    }

    Ok(())
}

pub fn log(store: &dyn BlobStore, text: &str) -> Result<()> {
    let mut life = load_life(store);
    let today = Local::now().date_naive();

    match log_activity(&mut life, text, today) {
        Some(outcome) => {
            save_life(store, &life)?;
            println!("{}", outcome.message);
        }
        None => {
            println!("Nothing logged.");
            println!("Mention a workout, your mood, something you read, or time with friends.");
        }
    }

    Ok(())
}
