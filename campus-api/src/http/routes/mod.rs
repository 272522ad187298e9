//! Routes that aren't generic resources

pub mod health;
