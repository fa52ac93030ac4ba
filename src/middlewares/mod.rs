pub mod require_role;
pub mod require_session;

pub use require_role::RequireRole;
pub use require_session::RequireSession;
