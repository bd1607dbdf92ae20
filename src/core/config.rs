/// Absolute tolerance used by the `almost_eq()` family and as the default `approx` epsilon.
pub const EPSILON: f64 = 1e-5;
/// Transformed points whose homogeneous `w` lies within this distance of 1 skip the perspective
/// divide.
pub const PERSPECTIVE_DIVIDE_EPSILON: f64 = 1e-6;
