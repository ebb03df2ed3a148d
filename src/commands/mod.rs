mod analyze;
mod session;

pub use analyze::run_analyze;
pub use session::run_session;
