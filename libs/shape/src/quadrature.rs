use crate::{ShapeError, Topology};
use nalgebra::{DMatrix, SymmetricEigen};
use param_space::V3D;

// 4-point tetrahedron rule (degree 2)
const TET_A: f64 = 0.585_410_196_624_968_5;
const TET_B: f64 = 0.138_196_601_125_010_5;

/// A set of integration points over an Element's reference domain and their weights
#[derive(Clone, Debug, PartialEq)]
pub struct QuadratureRule {
    pub points: Vec<V3D>,
    pub weights: Vec<f64>,
}

impl QuadratureRule {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Integrate `integrand` over the reference domain
    ///
    /// ```
    /// use shape::Topology;
    ///
    /// let rule = Topology::Hex8.quadrature(2).unwrap();
    /// let solution = rule.integrate(|p| p.r().powi(2) * p.s().powi(2));
    ///
    /// assert!((solution - 2.0 * 4.0 / 9.0).abs() < 1e-12);
    /// ```
    pub fn integrate<F>(&self, integrand: F) -> f64
    where
        F: Fn(V3D) -> f64,
    {
        self.points
            .iter()
            .zip(self.weights.iter())
            .map(|(p, w)| integrand(*p) * w)
            .sum()
    }

    fn line_tensor(n: usize, dims: usize) -> Self {
        let (glq_points, glq_weights) = gauss_legendre_points(n);
        let mut points = Vec::with_capacity(n.pow(dims as u32));
        let mut weights = Vec::with_capacity(n.pow(dims as u32));

        let t_range = if dims == 3 { n } else { 1 };
        for k in 0..t_range {
            for j in 0..n {
                for i in 0..n {
                    let (t, w_t) = if dims == 3 {
                        (glq_points[k], glq_weights[k])
                    } else {
                        (0.0, 1.0)
                    };
                    points.push(V3D::at(glq_points[i], glq_points[j], t));
                    weights.push(glq_weights[i] * glq_weights[j] * w_t);
                }
            }
        }

        Self { points, weights }
    }

    fn triangle(n: usize) -> Self {
        if n == 1 {
            Self {
                points: vec![V3D::at(1.0 / 3.0, 1.0 / 3.0, 0.0)],
                weights: vec![0.5],
            }
        } else {
            Self {
                points: vec![
                    V3D::at(1.0 / 6.0, 1.0 / 6.0, 0.0),
                    V3D::at(2.0 / 3.0, 1.0 / 6.0, 0.0),
                    V3D::at(1.0 / 6.0, 2.0 / 3.0, 0.0),
                ],
                weights: vec![1.0 / 6.0; 3],
            }
        }
    }

    fn tetrahedron(n: usize) -> Self {
        if n == 1 {
            Self {
                points: vec![V3D::at(0.25, 0.25, 0.25)],
                weights: vec![1.0 / 6.0],
            }
        } else {
            Self {
                points: vec![
                    V3D::at(TET_B, TET_B, TET_B),
                    V3D::at(TET_A, TET_B, TET_B),
                    V3D::at(TET_B, TET_A, TET_B),
                    V3D::at(TET_B, TET_B, TET_A),
                ],
                weights: vec![1.0 / 24.0; 4],
            }
        }
    }

    fn wedge(n: usize) -> Self {
        let tri = Self::triangle(n);
        let (glq_points, glq_weights) = gauss_legendre_points(n);

        let mut points = Vec::with_capacity(tri.len() * n);
        let mut weights = Vec::with_capacity(tri.len() * n);
        for (t, w_t) in glq_points.iter().zip(glq_weights.iter()) {
            for (p, w) in tri.points.iter().zip(tri.weights.iter()) {
                points.push(V3D::at(p.r(), p.s(), *t));
                weights.push(w * w_t);
            }
        }

        Self { points, weights }
    }
}

impl Topology {
    /// Quadrature rule over this Topology's reference domain.
    ///
    /// `n` is the number of Gauss-Legendre points along each tensor-product direction.
    /// Simplex directions use the 1-point centroid rule for `n == 1` and a degree 2 rule otherwise.
    pub fn quadrature(self, n: usize) -> Result<QuadratureRule, ShapeError> {
        if n == 0 {
            return Err(ShapeError::InvalidQuadratureOrder { topology: self });
        }

        Ok(match self {
            Self::Tri3 => QuadratureRule::triangle(n),
            Self::Quad4 => QuadratureRule::line_tensor(n, 2),
            Self::Tet4 | Self::Tet10 => QuadratureRule::tetrahedron(n),
            Self::Penta6 => QuadratureRule::wedge(n),
            Self::Hex8 => QuadratureRule::line_tensor(n, 3),
        })
    }
}

// https://en.wikipedia.org/wiki/Gaussian_quadrature#Gauss%E2%80%93Legendre_quadrature
/// Gauss-Legendre points and weights over `(-1, 1)`, sorted by position
///
/// Computed with the Golub-Welsch method: the points are the eigenvalues of the symmetric
/// tridiagonal Jacobi matrix of the Legendre recurrence, and each weight is twice the squared
/// first component of the matching eigenvector.
///
/// `n == 0` gives empty vectors.
pub fn gauss_legendre_points(n: usize) -> (Vec<f64>, Vec<f64>) {
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let betas: Vec<f64> = (1..n)
        .map(|i| 0.5 / (1.0 - (2.0 * i as f64).powi(-2)).sqrt())
        .collect();

    let polymat: DMatrix<f64> = DMatrix::from_fn(n, n, |r, c| {
        if r == c + 1 {
            betas[r - 1]
        } else if c == r + 1 {
            betas[c - 1]
        } else {
            0.0
        }
    });

    let eigen_decomp = SymmetricEigen::new(polymat);

    let mut xw: Vec<(f64, f64)> = eigen_decomp
        .eigenvalues
        .iter()
        .cloned()
        .zip(
            eigen_decomp
                .eigenvectors
                .row(0)
                .iter()
                .map(|weight| (*weight).powi(2) * 2.0),
        )
        .collect();

    xw.sort_by(|a, b| a.0.total_cmp(&b.0));

    xw.into_iter().unzip()
}

/// Map points from `(-1, 1)` onto `(min, max)`. Also returns the scaling factor of the mapping.
pub fn scale_points(points: &[f64], min: f64, max: f64) -> (f64, Vec<f64>) {
    let scale_factor = (max - min) / 2.0;
    let offset = (max + min) / 2.0;

    (
        scale_factor,
        points
            .iter()
            .map(|x| x * scale_factor + offset)
            .collect::<Vec<f64>>(),
    )
}
