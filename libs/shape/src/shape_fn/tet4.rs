use super::{lookup_iso_coord, ShapeDerivs, ShapeFn, ShapeValues, Topology};
use crate::ShapeError;
use param_space::V3D;
use smallvec::smallvec;

const ISO_COORDS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Linear 4-node tetrahedron over the unit simplex
#[derive(Clone, Copy, Debug, Default)]
pub struct Tet4Shape;

impl ShapeFn for Tet4Shape {
    fn topology(&self) -> Topology {
        Topology::Tet4
    }

    fn shape(&self, p: V3D) -> ShapeValues {
        let [r, s, t] = p.to_array();
        smallvec![1.0 - r - s - t, r, s, t]
    }

    // constant over the element; the point is only accepted for uniformity with higher order shapes
    fn shape_derivs(&self, _: V3D) -> ShapeDerivs {
        ShapeDerivs {
            r: smallvec![-1.0, 1.0, 0.0, 0.0],
            s: smallvec![-1.0, 0.0, 1.0, 0.0],
            t: smallvec![-1.0, 0.0, 0.0, 1.0],
        }
    }

    fn iso_coord(&self, node: i32) -> Result<V3D, ShapeError> {
        lookup_iso_coord(Topology::Tet4, &ISO_COORDS, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use param_space::CENTROID;

    #[test]
    fn vertex_interpolation() {
        let expected: [[f64; 4]; 4] = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];

        for (coords, h) in ISO_COORDS.iter().zip(expected.iter()) {
            assert_eq!(Tet4Shape.shape(V3D::from(*coords)).as_slice(), h);
        }
    }

    #[test]
    fn partition_of_unity() {
        for p in [
            V3D::at(0.1, 0.2, 0.3),
            V3D::at(0.0, 0.5, 0.5),
            V3D::at(2.0, -1.0, 3.5),
        ] {
            let sum: f64 = Tet4Shape.shape(p).iter().sum();
            assert!((sum - 1.0).abs() < 1e-14);
        }
    }

    #[test]
    fn constant_derivatives() {
        let reference = Tet4Shape.shape_derivs(V3D::zero());
        assert_eq!(reference.r.as_slice(), &[-1.0, 1.0, 0.0, 0.0]);
        assert_eq!(reference.s.as_slice(), &[-1.0, 0.0, 1.0, 0.0]);
        assert_eq!(reference.t.as_slice(), &[-1.0, 0.0, 0.0, 1.0]);

        for p in [V3D::at(0.3, 0.3, 0.3), V3D::at(-4.0, 9.0, 0.5)] {
            assert_eq!(Tet4Shape.shape_derivs(p), reference);
        }
    }

    #[test]
    fn iso_coords() {
        assert_eq!(Tet4Shape.iso_coord(CENTROID), Ok(V3D::at(0.25, 0.25, 0.25)));
        assert_eq!(Tet4Shape.iso_coord(0), Ok(V3D::at(0.0, 0.0, 0.0)));
        assert_eq!(Tet4Shape.iso_coord(1), Ok(V3D::at(1.0, 0.0, 0.0)));
        assert_eq!(Tet4Shape.iso_coord(2), Ok(V3D::at(0.0, 1.0, 0.0)));
        assert_eq!(Tet4Shape.iso_coord(3), Ok(V3D::at(0.0, 0.0, 1.0)));
        assert_eq!(
            Tet4Shape.iso_coord(4),
            Err(ShapeError::InvalidIndex {
                topology: Topology::Tet4,
                index: 4
            })
        );
    }
}
