pub mod reset_db;
pub mod serve;

pub use reset_db::run_reset_db;
pub use serve::run_serve;
