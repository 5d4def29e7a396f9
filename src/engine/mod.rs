pub mod project;
pub mod redact;
pub mod text_match;

pub use project::{project_home, project_panel};
pub use redact::redact as redact_event;
