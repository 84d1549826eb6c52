pub mod channels;
pub mod database;
pub mod error;
pub mod sources;
