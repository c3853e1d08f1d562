pub mod dashboard_controller;
pub mod home_controller;
