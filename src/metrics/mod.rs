pub mod collector;
pub mod dashboard;
