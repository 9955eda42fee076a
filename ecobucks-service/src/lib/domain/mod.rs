pub mod disposal;
pub mod station;
pub mod user;
