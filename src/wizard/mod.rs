pub mod biometrics;
pub mod controller;
pub mod demographics;
pub mod stage;
