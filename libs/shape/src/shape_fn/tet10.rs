use super::{lookup_iso_coord, ShapeDerivs, ShapeFn, ShapeValues, Topology};
use crate::ShapeError;
use param_space::V3D;
use smallvec::smallvec;

// vertices first, then the edge midpoints: 0-1, 1-2, 2-0, 0-3, 1-3, 2-3
const ISO_COORDS: [[f64; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.0],
    [0.0, 0.0, 0.5],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
];

/// Quadratic 10-node tetrahedron over the unit simplex
#[derive(Clone, Copy, Debug, Default)]
pub struct Tet10Shape;

impl ShapeFn for Tet10Shape {
    fn topology(&self) -> Topology {
        Topology::Tet10
    }

    fn shape(&self, p: V3D) -> ShapeValues {
        let [r, s, t] = p.to_array();
        let u = 1.0 - r - s - t;

        smallvec![
            u * (2.0 * u - 1.0),
            r * (2.0 * r - 1.0),
            s * (2.0 * s - 1.0),
            t * (2.0 * t - 1.0),
            4.0 * u * r,
            4.0 * r * s,
            4.0 * s * u,
            4.0 * t * u,
            4.0 * r * t,
            4.0 * s * t,
        ]
    }

    fn shape_derivs(&self, p: V3D) -> ShapeDerivs {
        let [r, s, t] = p.to_array();
        let u = 1.0 - r - s - t;
        let du = 1.0 - 4.0 * u;

        ShapeDerivs {
            r: smallvec![
                du,
                4.0 * r - 1.0,
                0.0,
                0.0,
                4.0 * (u - r),
                4.0 * s,
                -4.0 * s,
                -4.0 * t,
                4.0 * t,
                0.0,
            ],
            s: smallvec![
                du,
                0.0,
                4.0 * s - 1.0,
                0.0,
                -4.0 * r,
                4.0 * r,
                4.0 * (u - s),
                -4.0 * t,
                0.0,
                4.0 * t,
            ],
            t: smallvec![
                du,
                0.0,
                0.0,
                4.0 * t - 1.0,
                -4.0 * r,
                0.0,
                -4.0 * s,
                4.0 * (u - t),
                4.0 * r,
                4.0 * s,
            ],
        }
    }

    fn iso_coord(&self, node: i32) -> Result<V3D, ShapeError> {
        lookup_iso_coord(Topology::Tet10, &ISO_COORDS, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tet4Shape;

    #[test]
    fn centroid_values() {
        let h = Tet10Shape.shape(V3D::at(0.25, 0.25, 0.25));
        for vertex in &h[..4] {
            assert!((vertex + 0.125).abs() < 1e-15);
        }
        for edge in &h[4..] {
            assert!((edge - 0.25).abs() < 1e-15);
        }
    }

    #[test]
    fn shares_vertices_with_tet4() {
        for node in 0..4 {
            assert_eq!(Tet10Shape.iso_coord(node), Tet4Shape.iso_coord(node));
        }
        assert_eq!(Tet10Shape.iso_coord(-1), Tet4Shape.iso_coord(-1));
    }
}
