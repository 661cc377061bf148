pub mod auth_service;
pub mod config_service;
pub mod post_service;
