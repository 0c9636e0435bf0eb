use super::{lookup_iso_coord, ShapeDerivs, ShapeFn, ShapeValues, Topology};
use crate::ShapeError;
use param_space::V3D;
use smallvec::smallvec;

const ISO_COORDS: [[f64; 3]; 6] = [
    [0.0, 0.0, -1.0],
    [1.0, 0.0, -1.0],
    [0.0, 1.0, -1.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// 6-node wedge: a linear triangle in `(r, s)` extruded linearly along `t` in `[-1, 1]`
#[derive(Clone, Copy, Debug, Default)]
pub struct Penta6Shape;

impl ShapeFn for Penta6Shape {
    fn topology(&self) -> Topology {
        Topology::Penta6
    }

    fn shape(&self, p: V3D) -> ShapeValues {
        let [r, s, t] = p.to_array();
        let u = 1.0 - r - s;
        let (lo, hi) = (0.5 * (1.0 - t), 0.5 * (1.0 + t));

        smallvec![lo * u, lo * r, lo * s, hi * u, hi * r, hi * s]
    }

    fn shape_derivs(&self, p: V3D) -> ShapeDerivs {
        let [r, s, t] = p.to_array();
        let u = 1.0 - r - s;
        let (lo, hi) = (0.5 * (1.0 - t), 0.5 * (1.0 + t));

        ShapeDerivs {
            r: smallvec![-lo, lo, 0.0, -hi, hi, 0.0],
            s: smallvec![-lo, 0.0, lo, -hi, 0.0, hi],
            t: smallvec![-0.5 * u, -0.5 * r, -0.5 * s, 0.5 * u, 0.5 * r, 0.5 * s],
        }
    }

    fn iso_coord(&self, node: i32) -> Result<V3D, ShapeError> {
        lookup_iso_coord(Topology::Penta6, &ISO_COORDS, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mid_height_splits_evenly() {
        let h = Penta6Shape.shape(V3D::at(1.0, 0.0, 0.0));
        assert_eq!(h.as_slice(), &[0.0, 0.5, 0.0, 0.0, 0.5, 0.0]);
    }
}
