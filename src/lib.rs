extern crate param_space;
extern crate regression;
extern crate shape;

/// Explicitly initialized evaluation context for batch work
pub mod kernel;

pub use kernel::{settings::KernelSettings, Kernel, KernelError};
pub use param_space::{map_range, CENTROID, V3D};
pub use regression::{
    linear_regression, par_linear_regression, Accumulator, Degeneracy, LineFit, RegressionError,
};
pub use shape::{
    gauss_legendre_points, scale_points, Hex8Shape, IsoMap, Penta6Shape, ProjectionSettings,
    Quad4Shape, QuadratureRule, ShapeDerivs, ShapeError, ShapeFn, ShapeSampler, ShapeTable,
    ShapeValues, Tet10Shape, Tet4Shape, Topology, Tri3Shape, MAX_NODES,
};
