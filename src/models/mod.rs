pub mod location;
pub mod rider;
