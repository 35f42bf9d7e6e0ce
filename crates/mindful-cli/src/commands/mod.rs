pub mod catalog;
pub mod config;
pub mod insights;
pub mod session;
