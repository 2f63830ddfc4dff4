pub mod app;
pub mod chart;
pub mod config;
pub mod controllers;
pub mod logging;
pub mod presenter;
