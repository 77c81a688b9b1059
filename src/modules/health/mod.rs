pub mod controller;
pub mod router;

pub use controller::HealthStatus;
pub use router::init_health_router;
