pub mod config;
pub mod logging;

pub mod export;
pub mod extract;
pub mod mime_ext;
pub mod mirror;
pub mod response;
