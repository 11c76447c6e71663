pub(crate) mod cyclic;
pub(crate) mod ease;
pub(crate) mod wave;
