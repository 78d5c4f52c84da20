pub mod description_generator;
pub mod post_store;
