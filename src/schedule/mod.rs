pub(crate) mod clock;
pub(crate) mod scheduler;
pub(crate) mod tween;
