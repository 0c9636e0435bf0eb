use super::KernelError;
use shape::ProjectionSettings;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

/// Batches shorter than this are evaluated on the calling thread
pub const DEFAULT_MIN_PAR_LEN: usize = 1024;

/// Settings used to initialize a [crate::Kernel]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelSettings {
    /// Size of the kernel's thread pool. If `None`, Rayon picks (one thread per core by default)
    pub num_threads: Option<usize>,
    /// Newton iteration settings used by [crate::Kernel::project_points]
    pub projection: ProjectionSettings,
    pub min_par_len: usize,
}

impl KernelSettings {
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), KernelError> {
        if self.num_threads == Some(0) {
            return Err(KernelError::InvalidSettings(
                "thread pool needs at least one thread".to_string(),
            ));
        }
        let tolerance = self.projection.tolerance;
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(KernelError::InvalidSettings(format!(
                "projection tolerance must be non-negative (got {})",
                tolerance
            )));
        }
        if self.projection.max_iterations == 0 {
            return Err(KernelError::InvalidSettings(
                "projection needs at least one iteration".to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "num_threads": self.num_threads,
            "projection_tolerance": self.projection.tolerance,
            "projection_max_iterations": self.projection.max_iterations,
            "min_par_len": self.min_par_len,
        }
    }
}

impl Default for KernelSettings {
    fn default() -> Self {
        Self {
            num_threads: None,
            projection: ProjectionSettings::default(),
            min_par_len: DEFAULT_MIN_PAR_LEN,
        }
    }
}
