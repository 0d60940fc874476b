pub mod counts;
pub mod health;
