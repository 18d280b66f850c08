pub mod config;
pub mod dates;
pub mod form;
pub mod render;
pub mod schedule;
pub mod status;
