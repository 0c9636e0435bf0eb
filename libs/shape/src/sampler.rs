use crate::{QuadratureRule, ShapeDerivs, ShapeError, ShapeFn, ShapeValues, Topology};
use param_space::V3D;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

/// Structure used to generate [ShapeTable]s for one Topology.
/// Holds the points (and integration weights) at which the shape functions are sampled.
#[derive(Clone, Debug)]
pub struct ShapeSampler<SF: ShapeFn> {
    shape_fn: SF,
    points: Vec<V3D>,
    weights: Vec<f64>,
}

impl<SF: ShapeFn> ShapeSampler<SF> {
    /// Sample at the points of the Topology's `n`-point quadrature rule
    pub fn with(shape_fn: SF, n: usize) -> Result<Self, ShapeError> {
        let QuadratureRule { points, weights } = shape_fn.topology().quadrature(n)?;

        Ok(Self {
            shape_fn,
            points,
            weights,
        })
    }

    /// Sample at arbitrary parametric points (each given a unit weight)
    pub fn at(shape_fn: SF, points: Vec<V3D>) -> Self {
        let weights = vec![1.0; points.len()];
        Self {
            shape_fn,
            points,
            weights,
        }
    }

    pub fn points(&self) -> &[V3D] {
        &self.points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Evaluate the shape functions and their derivatives at every sample point
    pub fn sample(&self) -> ShapeTable {
        ShapeTable {
            topology: self.shape_fn.topology(),
            values: self.points.iter().map(|p| self.shape_fn.shape(*p)).collect(),
            derivs: self
                .points
                .iter()
                .map(|p| self.shape_fn.shape_derivs(*p))
                .collect(),
            points: self.points.clone(),
            weights: self.weights.clone(),
        }
    }
}

/// Shape function values and derivatives tabulated at a set of parametric points
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeTable {
    pub topology: Topology,
    pub points: Vec<V3D>,
    pub weights: Vec<f64>,
    pub values: Vec<ShapeValues>,
    pub derivs: Vec<ShapeDerivs>,
}

impl ShapeTable {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn value(&self, point: usize, node: usize) -> f64 {
        self.values[point][node]
    }

    #[inline]
    pub fn gradient(&self, point: usize, node: usize) -> V3D {
        self.derivs[point].gradient(node)
    }

    /// Weighted sum of `integrand` over the sample points (`integrand` receives the point index)
    pub fn integrate<F>(&self, integrand: F) -> f64
    where
        F: Fn(usize) -> f64,
    {
        self.weights
            .iter()
            .enumerate()
            .map(|(m, w)| integrand(m) * w)
            .sum()
    }

    /// Produce a Json Object with the tabulated shape values
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        let points: Vec<Vec<f64>> = self.points.iter().map(|p| p.to_array().to_vec()).collect();
        let values: Vec<Vec<f64>> = self.values.iter().map(|v| v.to_vec()).collect();

        object! {
            "topology": self.topology.name(),
            "points": points,
            "weights": self.weights.clone(),
            "values": values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hex8Shape, Tet10Shape, Tet4Shape};

    #[test]
    fn tabulated_values_match_direct_evaluation() {
        let sampler = ShapeSampler::with(Tet10Shape, 2).unwrap();
        let table = sampler.sample();

        assert_eq!(table.topology, Topology::Tet10);
        assert_eq!(table.len(), 4);
        for (m, p) in sampler.points().iter().enumerate() {
            let direct = Tet10Shape.shape(*p);
            for node in 0..10 {
                assert_eq!(table.value(m, node), direct[node]);
            }
            assert_eq!(table.derivs[m], Tet10Shape.shape_derivs(*p));
        }
    }

    #[test]
    fn integrated_shape_functions_partition_the_volume() {
        let table = ShapeSampler::with(Hex8Shape, 2).unwrap().sample();

        let mut total = 0.0;
        for node in 0..8 {
            let node_volume = table.integrate(|m| table.value(m, node));
            assert!((node_volume - 1.0).abs() < 1e-12);
            total += node_volume;
        }
        assert!((total - 8.0).abs() < 1e-12);
    }

    #[test]
    fn arbitrary_points() {
        let points = vec![V3D::at(0.0, 0.0, 0.0), V3D::at(0.0, 0.0, 1.0)];
        let table = ShapeSampler::at(Tet4Shape, points).sample();

        assert_eq!(table.weights, vec![1.0, 1.0]);
        assert_eq!(table.value(1, 3), 1.0);
        assert_eq!(table.gradient(0, 0), V3D::at(-1.0, -1.0, -1.0));
    }

    #[test]
    fn invalid_order() {
        assert!(ShapeSampler::with(Topology::Quad4, 0).is_err());
    }

    #[cfg(feature = "json_export")]
    #[test]
    fn table_json() {
        let table = ShapeSampler::with(Tet4Shape, 1).unwrap().sample();
        let js = table.to_json();

        assert_eq!(js["topology"], "tet4");
        assert_eq!(js["values"][0].len(), 4);
        assert_eq!(js["values"][0][0], 0.25);
    }
}
