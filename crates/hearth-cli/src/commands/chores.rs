use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};

use hearth_core::chores::{
    due_chores, due_today, load_chores, overdue, overdue_chores, save_chores, Chore, Completion,
    Schedule,
};
use hearth_core::store::BlobStore;

pub fn list(store: &dyn BlobStore, date: Option<&str>) -> Result<()> {
    let today = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| anyhow!("Invalid --date '{}', expected yyyy-mm-dd", raw))?,
        None => Local::now().date_naive(),
    };

    let chores = load_chores(store);

    if chores.is_empty() {
        println!("No chores yet.");
        println!("\nTo add one, run:");
        println!("  hearth chores add -n <name> -s <schedule> [-p <param>]");
        return Ok(());
    }

    println!("Chores for {} ({}):\n", today.format("%Y-%m-%d"), chores.len());

    for chore in &chores {
        let mut flags: Vec<&str> = Vec::new();
        if due_today(chore, today) {
            flags.push("DUE");
        }
        if overdue(chore, today) {
            flags.push("OVERDUE");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        let cadence = if chore.schedule_param.is_empty() {
            chore.schedule.as_str().to_string()
        } else {
            format!("{} ({})", chore.schedule.as_str(), chore.schedule_param)
        };

        println!("  {} - {}{}", chore.name, cadence, flags);
        match chore.completion() {
            Completion::Never => println!("    Last done: never"),
            Completion::On(date) => println!("    Last done: {}", date.format("%Y-%m-%d")),
            Completion::Unreadable => {
                println!("    Last done: unreadable ({:?})", chore.last_done)
            }
        }
        println!();
    }

    let due = due_chores(&chores, today);
    let late = overdue_chores(&chores, today);
    println!("Due today: {}", join_or_none(&due));
    println!("Overdue:   {}", join_or_none(&late));

    Ok(())
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

pub fn add(store: &dyn BlobStore, name: &str, schedule: &str, param: &str) -> Result<()> {
    let schedule: Schedule = schedule.parse()?;

    let mut chores = load_chores(store);
    if chores.iter().any(|c| c.name == name) {
        println!("A chore named '{}' already exists.", name);
        return Ok(());
    }

    chores.push(Chore::new(name, schedule, param));
    save_chores(store, &chores)?;

    println!("Added chore: {} ({})", name, schedule.as_str());

    Ok(())
}

pub fn done(store: &dyn BlobStore, name: &str) -> Result<()> {
    let mut chores = load_chores(store);
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();

    let mut found = false;
    for chore in chores.iter_mut() {
        if chore.name == name {
            chore.last_done = today.clone();
            found = true;
        }
    }

    if found {
        save_chores(store, &chores)?;
        println!("Marked '{}' as done today.", name);
    } else {
        println!("Chore '{}' not found.", name);
        println!("\nKnown chores:");
        for chore in &chores {
            println!("  - {}", chore.name);
        }
    }

    Ok(())
}

pub fn remove(store: &dyn BlobStore, name: &str) -> Result<()> {
    let mut chores = load_chores(store);
    let before = chores.len();
    chores.retain(|c| c.name != name);

    if chores.len() == before {
        println!("Chore '{}' not found.", name);
        return Ok(());
    }

    save_chores(store, &chores)?;
    println!("Removed chore: {}", name);

    Ok(())
}
