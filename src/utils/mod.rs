//! Shared helpers: filesystem access, minification and status logging.

pub mod fs;
pub mod log;
pub mod minify;
