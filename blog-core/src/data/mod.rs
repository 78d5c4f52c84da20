pub mod post_repository;
pub mod repositories;
