pub mod attendance;
pub mod catalog;
pub mod core;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod navigation;
pub mod schedule;
pub mod stores;
pub mod utils;
pub mod wal;
pub mod wizard;
