pub mod learn;
pub mod profile;
pub mod progress;
pub mod render;
pub mod state;
pub mod wisdom;
pub mod word;

// Re-export the shared state so the binary can build it directly.
pub use state::AppState;
