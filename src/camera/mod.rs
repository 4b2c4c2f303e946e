//! Camera poses and the per-style trajectory functions.

/// Camera pose type.
pub mod pose;
/// Style-keyed trajectory computation.
pub mod trajectory;
