mod hex8;
mod penta6;
mod quad4;
mod tet10;
mod tet4;
mod tri3;

use crate::ShapeError;
use param_space::{CENTROID, V3D};
use smallvec::SmallVec;
use std::fmt;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

pub use hex8::Hex8Shape;
pub use penta6::Penta6Shape;
pub use quad4::Quad4Shape;
pub use tet10::Tet10Shape;
pub use tet4::Tet4Shape;
pub use tri3::Tri3Shape;

/// Largest node count of any supported [Topology]
pub const MAX_NODES: usize = 10;

/// Shape function values, one entry per node of the Topology
pub type ShapeValues = SmallVec<[f64; MAX_NODES]>;

/// Parametric derivatives of the shape functions along `r`, `s` and `t`
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDerivs {
    pub r: ShapeValues,
    pub s: ShapeValues,
    pub t: ShapeValues,
}

impl ShapeDerivs {
    /// Derivatives along one parametric direction (0: r, 1: s, 2: t)
    ///
    /// Panics if `dir` is greater than 2, as indexing a [V3D] does.
    pub fn direction(&self, dir: usize) -> &ShapeValues {
        match dir {
            0 => &self.r,
            1 => &self.s,
            2 => &self.t,
            _ => panic!("parametric direction out of range: {} (expected 0, 1 or 2)", dir),
        }
    }

    /// Parametric gradient of a single node's shape function
    pub fn gradient(&self, node: usize) -> V3D {
        V3D::at(self.r[node], self.s[node], self.t[node])
    }
}

/// Isoparametric shape functions over an Element's reference domain.
///
/// Each supported [Topology] has a zero-sized implementor (ex: [Tet4Shape]). [Topology] itself also
/// implements this trait by dispatching on its variant, so either can be handed to an [crate::IsoMap] or a [crate::ShapeSampler].
pub trait ShapeFn: Send + Sync {
    fn topology(&self) -> Topology;

    fn node_count(&self) -> usize {
        self.topology().node_count()
    }

    /// Dimension of the reference domain (2 for surface Elements, 3 for solids)
    fn dim(&self) -> usize {
        self.topology().dim()
    }

    /// Shape function values at a parametric point. No range checking is done; points outside
    /// of the reference domain give extrapolated values.
    fn shape(&self, p: V3D) -> ShapeValues;

    fn shape_derivs(&self, p: V3D) -> ShapeDerivs;

    /// Iso-parametric coordinates of a node. [CENTROID] (`-1`) gives the centroid of the reference domain.
    fn iso_coord(&self, node: i32) -> Result<V3D, ShapeError>;
}

/// The closed set of supported Element Topologies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    /// 3-node triangle
    Tri3,
    /// 4-node quadrilateral
    Quad4,
    /// 4-node tetrahedron
    Tet4,
    /// 10-node quadratic tetrahedron
    Tet10,
    /// 6-node wedge
    Penta6,
    /// 8-node hexahedron
    Hex8,
}

impl Topology {
    pub const ALL: [Topology; 6] = [
        Self::Tri3,
        Self::Quad4,
        Self::Tet4,
        Self::Tet10,
        Self::Penta6,
        Self::Hex8,
    ];

    pub const fn node_count(self) -> usize {
        match self {
            Self::Tri3 => 3,
            Self::Quad4 | Self::Tet4 => 4,
            Self::Tet10 => 10,
            Self::Penta6 => 6,
            Self::Hex8 => 8,
        }
    }

    pub const fn dim(self) -> usize {
        match self {
            Self::Tri3 | Self::Quad4 => 2,
            _ => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Tri3 => "tri3",
            Self::Quad4 => "quad4",
            Self::Tet4 => "tet4",
            Self::Tet10 => "tet10",
            Self::Penta6 => "penta6",
            Self::Hex8 => "hex8",
        }
    }

    pub fn centroid(self) -> V3D {
        match self {
            Self::Tri3 | Self::Penta6 => V3D::at(1.0 / 3.0, 1.0 / 3.0, 0.0),
            Self::Tet4 | Self::Tet10 => V3D::at(0.25, 0.25, 0.25),
            Self::Quad4 | Self::Hex8 => V3D::zero(),
        }
    }

    /// The shape function implementation for this Topology
    pub fn shape_fn(self) -> &'static dyn ShapeFn {
        match self {
            Self::Tri3 => &Tri3Shape,
            Self::Quad4 => &Quad4Shape,
            Self::Tet4 => &Tet4Shape,
            Self::Tet10 => &Tet10Shape,
            Self::Penta6 => &Penta6Shape,
            Self::Hex8 => &Hex8Shape,
        }
    }

    /// Produce a Json Object that describes this Topology and its reference nodes
    #[cfg(feature = "json_export")]
    pub fn to_json(self) -> JsonValue {
        let nodes: Vec<Vec<f64>> = (0..self.node_count() as i32)
            .filter_map(|n| self.iso_coord(n).ok())
            .map(|p| p.to_array().to_vec())
            .collect();

        object! {
            "name": self.name(),
            "dim": self.dim(),
            "node_count": self.node_count(),
            "centroid": self.centroid().to_array().to_vec(),
            "nodes": nodes,
        }
    }
}

impl ShapeFn for Topology {
    fn topology(&self) -> Topology {
        *self
    }

    fn shape(&self, p: V3D) -> ShapeValues {
        self.shape_fn().shape(p)
    }

    fn shape_derivs(&self, p: V3D) -> ShapeDerivs {
        self.shape_fn().shape_derivs(p)
    }

    fn iso_coord(&self, node: i32) -> Result<V3D, ShapeError> {
        self.shape_fn().iso_coord(node)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// shared node lookup for all topologies
fn lookup_iso_coord(topology: Topology, nodes: &[[f64; 3]], node: i32) -> Result<V3D, ShapeError> {
    if node == CENTROID {
        return Ok(topology.centroid());
    }

    usize::try_from(node)
        .ok()
        .and_then(|n| nodes.get(n))
        .map(|coords| V3D::from(*coords))
        .ok_or(ShapeError::InvalidIndex {
            topology,
            index: node,
        })
}
