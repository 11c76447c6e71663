pub(crate) mod agent;
pub(crate) mod config;
pub(crate) mod flock;
