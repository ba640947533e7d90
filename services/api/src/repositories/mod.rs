//! Repositories for document-store operations

pub mod toy;
pub mod user;

// Re-export for convenience
pub use toy::ToyRepository;
pub use user::UserRepository;
