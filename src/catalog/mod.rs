pub mod printing;
pub mod records;
pub mod renewal;
