pub mod core;
pub mod main;
pub mod run_effect;
pub mod screen_result;
pub mod view;
