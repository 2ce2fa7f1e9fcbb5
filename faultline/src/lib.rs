pub mod config;
pub mod error;
pub mod example;
pub mod failure;
pub mod format;
pub mod render;
pub mod report_model;
