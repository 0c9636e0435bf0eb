mod vector_space_3d;
pub use vector_space_3d::V3D;

/// Node index sentinel which selects the centroid of an element's reference domain
pub const CENTROID: i32 = -1;

/// Linearly map `val` from the range `[in_min, in_max]` onto `[out_min, out_max]`
pub fn map_range(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (val - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
