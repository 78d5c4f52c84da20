pub mod app;
pub mod dialog;
pub mod recorder;
pub mod renderer;
pub mod view;
