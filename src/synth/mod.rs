pub(crate) mod cache;
pub(crate) mod palette;
pub(crate) mod pose;
pub(crate) mod raster;
pub(crate) mod shapes;
pub(crate) mod sheet;
pub(crate) mod synthesizer;
