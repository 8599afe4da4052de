pub mod require_actor;
pub mod require_role;

pub use require_actor::{Actor, RequireActor};
pub use require_role::RequireRole;
