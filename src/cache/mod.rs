pub mod auth;
pub mod goal_log;
pub mod snapshot;

pub use auth::{AuthEntry, AuthResolver};
pub use goal_log::GoalLog;
pub use snapshot::Broadcaster;
