pub(crate) mod avoidance;
pub(crate) mod config;
pub(crate) mod controller;
pub(crate) mod pattern;
pub(crate) mod random;
