// Library for tests to access modules

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod models;
pub mod prompt;
pub mod request;
pub mod sort;
pub mod state;
pub mod version;
pub mod view;
