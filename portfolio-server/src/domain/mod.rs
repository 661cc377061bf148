pub mod admin;
pub mod error;
pub mod post;
pub mod site_config;
