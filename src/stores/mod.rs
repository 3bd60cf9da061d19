pub mod fixtures;
pub mod kv;
pub mod session_store;
