extern crate param_space;

mod error;
mod iso_map;
mod quadrature;
mod sampler;
mod shape_fn;

pub use error::ShapeError;
pub use iso_map::{IsoMap, ProjectionSettings};
pub use quadrature::{gauss_legendre_points, scale_points, QuadratureRule};
pub use sampler::{ShapeSampler, ShapeTable};
pub use shape_fn::{
    Hex8Shape, Penta6Shape, Quad4Shape, ShapeDerivs, ShapeFn, ShapeValues, Tet10Shape, Tet4Shape,
    Topology, Tri3Shape, MAX_NODES,
};

pub use param_space::{CENTROID, V3D};
