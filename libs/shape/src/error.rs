use crate::Topology;
use param_space::V3D;
use thiserror::Error;

/// Errors raised while evaluating or mapping Element shapes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// The node index is neither a node of the Topology nor the centroid sentinel
    #[error("Node index {index} does not exist on a {topology} element; cannot get iso-parametric coordinates!")]
    InvalidIndex { topology: Topology, index: i32 },
    #[error("A {topology} quadrature rule needs at least one point per direction!")]
    InvalidQuadratureOrder { topology: Topology },
    #[error("A {topology} element has {expected} nodes; got {found} nodal entries!")]
    NodeCountMismatch {
        topology: Topology,
        expected: usize,
        found: usize,
    },
    #[error("Jacobian is singular at parametric point {0}; cannot invert the element mapping!")]
    SingularJacobian(V3D),
    /// Newton iteration did not settle within the allowed number of steps
    #[error("Projection did not converge after {iterations} iterations (residual: {residual:e})")]
    ProjectionDiverged { iterations: usize, residual: f64 },
}
