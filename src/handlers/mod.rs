pub mod attendance;
pub mod dashboard;
pub mod enrollment;
pub mod fallback;
pub mod health;
pub mod printing;
pub mod records;
pub mod renewal;
pub mod schedule;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;
