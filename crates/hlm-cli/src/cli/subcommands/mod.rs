mod attendance;
mod auth;
mod client;
mod finance;
mod notification;
mod project;
mod service;
mod task;
mod team;

pub use attendance::AttendanceCommands;
pub use auth::AuthCommands;
pub use client::ClientCommands;
pub use finance::FinanceCommands;
pub use notification::NotificationCommands;
pub use project::ProjectCommands;
pub use service::ServiceCommands;
pub use task::TaskCommands;
pub use team::TeamCommands;
