//! Salary Dashboard - data scientist salary analysis
//!
//! Loads the salary CSV, computes descriptive statistics and prepares a
//! styled paginated grid, a bar chart and a summary block for the GUI.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod gui;
pub mod present;
pub mod stats;

pub use config::DashboardConfig;
pub use dashboard::Dashboard;
