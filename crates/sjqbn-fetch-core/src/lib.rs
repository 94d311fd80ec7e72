pub mod config;
pub mod logging;

pub mod downloader;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod process;
pub mod volume;
