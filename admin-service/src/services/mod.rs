pub mod counts;
pub mod database;

pub use counts::{CountRepository, CountService, CountedTable};
pub use database::Database;
