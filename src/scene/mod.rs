//! Scene records, validation, and the catalogs that supply them.

/// Scene catalog trait and built-in catalogs.
pub mod catalog;
/// Scene records and the camera style / environment enums.
pub mod model;
/// Index-addressed scene colors.
pub mod palette;
