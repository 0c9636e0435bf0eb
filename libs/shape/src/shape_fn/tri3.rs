use super::{lookup_iso_coord, ShapeDerivs, ShapeFn, ShapeValues, Topology};
use crate::ShapeError;
use param_space::V3D;
use smallvec::smallvec;

const ISO_COORDS: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

/// Linear 3-node triangle
#[derive(Clone, Copy, Debug, Default)]
pub struct Tri3Shape;

impl ShapeFn for Tri3Shape {
    fn topology(&self) -> Topology {
        Topology::Tri3
    }

    fn shape(&self, p: V3D) -> ShapeValues {
        smallvec![1.0 - p.r() - p.s(), p.r(), p.s()]
    }

    fn shape_derivs(&self, _: V3D) -> ShapeDerivs {
        ShapeDerivs {
            r: smallvec![-1.0, 1.0, 0.0],
            s: smallvec![-1.0, 0.0, 1.0],
            t: smallvec![0.0; 3],
        }
    }

    fn iso_coord(&self, node: i32) -> Result<V3D, ShapeError> {
        lookup_iso_coord(Topology::Tri3, &ISO_COORDS, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycentric_values() {
        let h = Tri3Shape.shape(V3D::at(0.2, 0.5, 0.0));
        assert!((h[0] - 0.3).abs() < 1e-15);
        assert!((h[1] - 0.2).abs() < 1e-15);
        assert!((h[2] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn centroid() {
        let c = Tri3Shape.iso_coord(-1).unwrap();
        for h in Tri3Shape.shape(c) {
            assert!((h - 1.0 / 3.0).abs() < 1e-15);
        }
    }
}
