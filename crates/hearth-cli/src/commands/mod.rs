pub mod chores;
pub mod digest;
pub mod life;
pub mod news;
pub mod weather;
