pub mod config_repository;
pub mod memory;
pub mod post_repository;
