//! GUI module - User interface components

mod app;
mod table_view;

pub use app::DashboardApp;
