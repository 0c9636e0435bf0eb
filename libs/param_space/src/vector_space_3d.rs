use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub};

/// A point (or direction) in an Element's parametric space: `(r, s, t)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct V3D {
    inner: [f64; 3],
}

impl V3D {
    pub const fn from([r, s, t]: [f64; 3]) -> Self {
        Self { inner: [r, s, t] }
    }

    pub const fn at(r: f64, s: f64, t: f64) -> Self {
        Self { inner: [r, s, t] }
    }

    pub const fn zero() -> Self {
        Self { inner: [0.0; 3] }
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.inner[0]
    }

    #[inline]
    pub fn s(&self) -> f64 {
        self.inner[1]
    }

    #[inline]
    pub fn t(&self) -> f64 {
        self.inner[2]
    }

    pub fn dot_with(&self, other: &Self) -> f64 {
        self[0] * other[0] + self[1] * other[1] + self[2] * other[2]
    }

    pub fn dot(a: Self, b: Self) -> f64 {
        a.dot_with(&b)
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::from([
            self[1] * other[2] - self[2] * other[1],
            self[2] * other[0] - self[0] * other[2],
            self[0] * other[1] - self[1] * other[0],
        ])
    }

    pub fn norm(&self) -> f64 {
        self.dot_with(self).sqrt()
    }

    pub fn to_array(self) -> [f64; 3] {
        self.inner
    }
}

impl Default for V3D {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f64; 3]> for V3D {
    fn from(inner: [f64; 3]) -> Self {
        Self { inner }
    }
}

impl From<V3D> for [f64; 3] {
    fn from(v: V3D) -> Self {
        v.inner
    }
}

impl Index<usize> for V3D {
    type Output = f64;
    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl IndexMut<usize> for V3D {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.inner[index]
    }
}

impl Add for V3D {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            inner: [self[0] + other[0], self[1] + other[1], self[2] + other[2]],
        }
    }
}

impl AddAssign for V3D {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for V3D {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            inner: [self[0] - other[0], self[1] - other[1], self[2] - other[2]],
        }
    }
}

impl Neg for V3D {
    type Output = Self;
    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Div<f64> for V3D {
    type Output = Self;
    fn div(self, divisor: f64) -> Self {
        Self {
            inner: [self[0] / divisor, self[1] / divisor, self[2] / divisor],
        }
    }
}

impl Mul<f64> for V3D {
    type Output = Self;
    fn mul(self, coefficient: f64) -> Self {
        Self {
            inner: [
                self[0] * coefficient,
                self[1] * coefficient,
                self[2] * coefficient,
            ],
        }
    }
}

impl fmt::Display for V3D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.5}, {:.5}, {:.5}]", self[0], self[1], self[2])
    }
}
