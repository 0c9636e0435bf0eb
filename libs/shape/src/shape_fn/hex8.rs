use super::{lookup_iso_coord, ShapeDerivs, ShapeFn, ShapeValues, Topology};
use crate::ShapeError;
use param_space::V3D;

const ISO_COORDS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Trilinear 8-node hexahedron over `[-1, 1]³`
#[derive(Clone, Copy, Debug, Default)]
pub struct Hex8Shape;

impl ShapeFn for Hex8Shape {
    fn topology(&self) -> Topology {
        Topology::Hex8
    }

    fn shape(&self, p: V3D) -> ShapeValues {
        let [r, s, t] = p.to_array();
        ISO_COORDS
            .iter()
            .map(|[ri, si, ti]| 0.125 * (1.0 + r * ri) * (1.0 + s * si) * (1.0 + t * ti))
            .collect()
    }

    fn shape_derivs(&self, p: V3D) -> ShapeDerivs {
        let [r, s, t] = p.to_array();
        let mut derivs = ShapeDerivs {
            r: ShapeValues::with_capacity(8),
            s: ShapeValues::with_capacity(8),
            t: ShapeValues::with_capacity(8),
        };

        for [ri, si, ti] in ISO_COORDS {
            derivs.r.push(0.125 * ri * (1.0 + s * si) * (1.0 + t * ti));
            derivs.s.push(0.125 * si * (1.0 + r * ri) * (1.0 + t * ti));
            derivs.t.push(0.125 * ti * (1.0 + r * ri) * (1.0 + s * si));
        }

        derivs
    }

    fn iso_coord(&self, node: i32) -> Result<V3D, ShapeError> {
        lookup_iso_coord(Topology::Hex8, &ISO_COORDS, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_weights_at_center() {
        for h in Hex8Shape.shape(V3D::zero()) {
            assert!((h - 0.125).abs() < 1e-15);
        }
    }

    #[test]
    fn face_center() {
        // center of the t = +1 face is shared by nodes 4..8
        let h = Hex8Shape.shape(V3D::at(0.0, 0.0, 1.0));
        assert_eq!(&h[..4], &[0.0; 4]);
        assert_eq!(&h[4..], &[0.25; 4]);
    }
}
