pub mod api;
pub mod attendance;
pub mod card;
pub mod enrollment;
pub mod record;
pub mod role;
pub mod schedule;
