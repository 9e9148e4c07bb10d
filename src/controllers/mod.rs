pub mod dashboard_controller;
pub mod mechanic_controller;
pub mod profile_controller;
pub mod service_request_controller;
