pub(crate) mod config;
pub(crate) mod services;
pub(crate) mod time;
