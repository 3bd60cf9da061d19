pub mod clock;
pub mod staff;
