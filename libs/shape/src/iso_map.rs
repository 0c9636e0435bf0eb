use crate::{ShapeError, ShapeFn, MAX_NODES};
use nalgebra::{Matrix3, Vector3};
use param_space::V3D;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Convergence settings for [IsoMap::project]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionSettings {
    /// Newton iteration stops once a parametric step is no longer than this
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 25,
        }
    }
}

/// Mapping between an Element's parametric space and Real space, defined by its nodal coordinates
#[derive(Clone, Debug)]
pub struct IsoMap<SF: ShapeFn> {
    shape_fn: SF,
    nodes: SmallVec<[V3D; MAX_NODES]>,
}

impl<SF: ShapeFn> IsoMap<SF> {
    /// Create a mapping from the real coordinates of an Element's nodes (in the Topology's node order)
    pub fn new(shape_fn: SF, nodes: &[V3D]) -> Result<Self, ShapeError> {
        check_node_count(&shape_fn, nodes.len())?;

        Ok(Self {
            shape_fn,
            nodes: SmallVec::from_slice(nodes),
        })
    }

    pub fn shape_fn(&self) -> &SF {
        &self.shape_fn
    }

    pub fn nodes(&self) -> &[V3D] {
        &self.nodes
    }

    /// Real coordinates of a parametric point
    pub fn map_to_real(&self, p: V3D) -> V3D {
        self.shape_fn
            .shape(p)
            .iter()
            .zip(self.nodes.iter())
            .fold(V3D::zero(), |acc, (h, x)| acc + *x * *h)
    }

    /// Interpolate nodal values at a parametric point
    pub fn interpolate(&self, values: &[f64], p: V3D) -> Result<f64, ShapeError> {
        check_node_count(&self.shape_fn, values.len())?;

        Ok(self
            .shape_fn
            .shape(p)
            .iter()
            .zip(values.iter())
            .map(|(h, v)| h * v)
            .sum())
    }

    /// Jacobian of the mapping at a parametric point. Columns are `dx/dr`, `dx/ds` and `dx/dt`.
    ///
    /// For surface Topologies the third column is the unit normal of the surface.
    pub fn jacobian(&self, p: V3D) -> Matrix3<f64> {
        let derivs = self.shape_fn.shape_derivs(p);
        let mut columns = [V3D::zero(); 3];

        for (node, x) in self.nodes.iter().enumerate() {
            let grad = derivs.gradient(node);
            for (dir, column) in columns.iter_mut().enumerate() {
                *column += *x * grad[dir];
            }
        }

        if self.shape_fn.dim() == 2 {
            let normal = columns[0].cross(&columns[1]);
            let norm = normal.norm();
            if norm > 0.0 {
                columns[2] = normal / norm;
            }
        }

        Matrix3::from_columns(&columns.map(|c| Vector3::from(c.to_array())))
    }

    pub fn jacobian_det(&self, p: V3D) -> f64 {
        self.jacobian(p).determinant()
    }

    /// Find the parametric point which maps onto `real` using Newton iteration from the centroid.
    ///
    /// Surface Topologies project `real` onto the Element's plane; the normal offset is dropped.
    pub fn project(&self, real: V3D, settings: &ProjectionSettings) -> Result<V3D, ShapeError> {
        let dim = self.shape_fn.dim();
        let mut p = self.shape_fn.topology().centroid();

        for iteration in 0..settings.max_iterations {
            let residual = real - self.map_to_real(p);
            let jac_inv = self
                .jacobian(p)
                .try_inverse()
                .ok_or(ShapeError::SingularJacobian(p))?;

            let step = jac_inv * Vector3::from(residual.to_array());
            let step_norm = step.iter().take(dim).map(|d| d * d).sum::<f64>().sqrt();

            for d in 0..dim {
                p[d] += step[d];
            }
            trace!(iteration, step_norm, "newton step");

            if step_norm <= settings.tolerance {
                return Ok(p);
            }
        }

        let residual = (real - self.map_to_real(p)).norm();
        debug!(
            topology = %self.shape_fn.topology(),
            residual,
            "projection failed to converge"
        );

        Err(ShapeError::ProjectionDiverged {
            iterations: settings.max_iterations,
            residual,
        })
    }
}

fn check_node_count<SF: ShapeFn>(shape_fn: &SF, found: usize) -> Result<(), ShapeError> {
    let expected = shape_fn.node_count();
    if found == expected {
        Ok(())
    } else {
        Err(ShapeError::NodeCountMismatch {
            topology: shape_fn.topology(),
            expected,
            found,
        })
    }
}
