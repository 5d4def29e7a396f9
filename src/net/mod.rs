pub mod admin;
pub mod health;
pub mod sse;

pub use admin::{AdminState, ReloadSignal};
pub use health::HealthState;
pub use sse::SseState;
