mod models;
mod schedule;

pub use models::{load_chores, save_chores, Chore, Completion, Schedule, CHORES_FILE};
pub use schedule::{due_chores, due_today, overdue, overdue_chores};
