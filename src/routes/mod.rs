pub mod appeals;

pub mod evaluations;

pub mod notifications;

pub mod periods;

pub mod rubrics;

pub use appeals::configure_appeals_routes;
pub use evaluations::configure_evaluations_routes;
pub use notifications::configure_notifications_routes;
pub use periods::configure_periods_routes;
pub use rubrics::configure_rubrics_routes;
