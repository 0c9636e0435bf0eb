use super::{lookup_iso_coord, ShapeDerivs, ShapeFn, ShapeValues, Topology};
use crate::ShapeError;
use param_space::V3D;
use smallvec::smallvec;

const ISO_COORDS: [[f64; 3]; 4] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
];

/// Bilinear 4-node quadrilateral over `[-1, 1]²`
#[derive(Clone, Copy, Debug, Default)]
pub struct Quad4Shape;

impl ShapeFn for Quad4Shape {
    fn topology(&self) -> Topology {
        Topology::Quad4
    }

    fn shape(&self, p: V3D) -> ShapeValues {
        ISO_COORDS
            .iter()
            .map(|[ri, si, _]| 0.25 * (1.0 + p.r() * ri) * (1.0 + p.s() * si))
            .collect()
    }

    fn shape_derivs(&self, p: V3D) -> ShapeDerivs {
        ShapeDerivs {
            r: ISO_COORDS
                .iter()
                .map(|[ri, si, _]| 0.25 * ri * (1.0 + p.s() * si))
                .collect(),
            s: ISO_COORDS
                .iter()
                .map(|[ri, si, _]| 0.25 * si * (1.0 + p.r() * ri))
                .collect(),
            t: smallvec![0.0; 4],
        }
    }

    fn iso_coord(&self, node: i32) -> Result<V3D, ShapeError> {
        lookup_iso_coord(Topology::Quad4, &ISO_COORDS, node)
    }
}
