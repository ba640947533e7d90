//! API service models

pub mod toy;
pub mod user;

// Re-export for convenience
pub use toy::{GeoPoint, Toy, ToyResponse};
pub use user::{UpdateProfile, User, UserResponse};
