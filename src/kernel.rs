/// Settings used to initialize a [Kernel]
pub mod settings;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use regression::{linear_regression, par_linear_regression, LineFit, RegressionError};
use settings::KernelSettings;
use shape::{IsoMap, ShapeDerivs, ShapeError, ShapeFn, ShapeSampler, ShapeTable, ShapeValues, V3D};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("Invalid kernel settings: {0}")]
    InvalidSettings(String),
    #[error("Failed to build the kernel thread pool: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Ready-to-use evaluation context.
///
/// Created explicitly with [Kernel::initialize]; owns the settings and a Rayon thread pool
/// which is used for batch evaluations over many points or samples.
///
/// ```
/// use fe_kernel::{Kernel, KernelSettings, Topology, V3D};
///
/// let kernel = Kernel::initialize(KernelSettings::with_threads(2)).unwrap();
/// let values = kernel.tabulate(&Topology::Tet4, &[V3D::at(0.25, 0.25, 0.25)]);
///
/// assert_eq!(values[0].as_slice(), &[0.25; 4]);
/// ```
pub struct Kernel {
    settings: KernelSettings,
    pool: ThreadPool,
}

impl Kernel {
    #[instrument(name = "kernel_init", skip_all)]
    pub fn initialize(settings: KernelSettings) -> Result<Self, KernelError> {
        settings.validate()?;

        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("fe-kernel-{}", i));
        if let Some(num_threads) = settings.num_threads {
            builder = builder.num_threads(num_threads);
        }
        let pool = builder.build()?;

        info!(
            threads = pool.current_num_threads(),
            min_par_len = settings.min_par_len,
            "kernel initialized"
        );

        Ok(Self { settings, pool })
    }

    pub fn settings(&self) -> &KernelSettings {
        &self.settings
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Shape function values at each point, in input order
    pub fn tabulate<SF: ShapeFn>(&self, shape_fn: &SF, points: &[V3D]) -> Vec<ShapeValues> {
        self.map_points(points, |p| shape_fn.shape(p))
    }

    /// Shape function derivatives at each point, in input order
    pub fn tabulate_derivs<SF: ShapeFn>(&self, shape_fn: &SF, points: &[V3D]) -> Vec<ShapeDerivs> {
        self.map_points(points, |p| shape_fn.shape_derivs(p))
    }

    /// Tabulate a Topology's shape functions at its `n`-point quadrature rule
    pub fn sample<SF: ShapeFn>(&self, shape_fn: SF, n: usize) -> Result<ShapeTable, KernelError> {
        Ok(ShapeSampler::with(shape_fn, n)?.sample())
    }

    /// Project real-space points into an Element's parametric space (see [IsoMap::project])
    ///
    /// Each point is projected independently; results are in input order.
    pub fn project_points<SF: ShapeFn>(
        &self,
        map: &IsoMap<SF>,
        points: &[V3D],
    ) -> Vec<Result<V3D, ShapeError>> {
        let projection = self.settings.projection;
        let projected = self.map_points(points, |x| map.project(x, &projection));

        let failures = projected.iter().filter(|r| r.is_err()).count();
        if failures > 0 {
            debug!(
                topology = %map.shape_fn().topology(),
                failures,
                total = points.len(),
                "some points could not be projected"
            );
        }

        projected
    }

    /// Least-squares line through the samples (see [linear_regression])
    pub fn fit_line(&self, samples: &[(f64, f64)]) -> Result<LineFit, RegressionError> {
        let fit = if samples.len() >= self.settings.min_par_len {
            self.pool.install(|| par_linear_regression(samples))
        } else {
            linear_regression(samples)
        };

        if let Err(err) = &fit {
            debug!(samples = samples.len(), %err, "line fit rejected");
        }
        fit
    }

    fn map_points<T, F>(&self, points: &[V3D], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(V3D) -> T + Sync + Send,
    {
        if points.len() >= self.settings.min_par_len {
            debug!(points = points.len(), "parallel batch");
            self.pool
                .install(|| points.par_iter().map(|p| f(*p)).collect())
        } else {
            points.iter().map(|p| f(*p)).collect()
        }
    }
}
