mod app_context;
mod route_guard;

pub use app_context::AppContext;
pub use route_guard::{GuardOutcome, guard};
