use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A complex number as two `f64` components.
///
/// Doubles as a plane point: `re` is the horizontal axis, `im` the vertical
/// one. Kept `Copy` so the escape-time loop never touches the heap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Returns `re² + im²` without taking the square root.
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Raise to a non-negative integer power by square-and-multiply.
    ///
    /// `powi(0)` is one and `powi(1)` is `self`, so every power the engine
    /// accepts is well-defined.
    #[inline]
    pub fn powi(self, exponent: u32) -> Self {
        let mut result = Self::ONE;
        let mut base = self;
        let mut mask: u32 = 1;
        while mask > 0 && exponent >= mask {
            if exponent & mask != 0 {
                result = result * base;
            }
            mask = mask.wrapping_shl(1);
            base = base * base;
        }
        result
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({};{})", self.re, self.im)
    }
}
