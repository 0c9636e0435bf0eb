mod linear;

pub use linear::{
    linear_regression, par_linear_regression, Accumulator, Degeneracy, LineFit, RegressionError,
};
