//! Integrands shared by the numerus benchmarks.

#![warn(missing_docs)]

use numerus::prelude::Integrand;

/// Normalised Lorentzian `gamma / pi / ((x - x0)^2 + gamma^2)`.
#[derive(Clone, Copy, Debug)]
pub struct Lorentzian {
    /// Centre of the peak.
    pub x0: f64,
    /// Half width at half maximum.
    pub gamma: f64,
}

impl Lorentzian {
    /// A peak of half width `gamma` centred on `x0`.
    pub fn new(x0: f64, gamma: f64) -> Self {
        Self { x0, gamma }
    }

    /// Exact integral over `[a, b]`.
    pub fn exact(&self, a: f64, b: f64) -> f64 {
        (((b - self.x0) / self.gamma).atan() - ((a - self.x0) / self.gamma).atan()) / std::f64::consts::PI
    }
}

impl Integrand<f64> for Lorentzian {
    type Value = f64;

    fn evaluate(&self, x: f64) -> f64 {
        let d = x - self.x0;
        self.gamma / std::f64::consts::PI / (d * d + self.gamma * self.gamma)
    }
}

/// A smooth integrand that burns `work` iterations per evaluation, for
/// comparing sequential and parallel batch evaluation.
#[derive(Clone, Copy, Debug)]
pub struct Expensive {
    /// Inner loop length per evaluation.
    pub work: usize,
}

impl Integrand<f64> for Expensive {
    type Value = f64;

    fn evaluate(&self, x: f64) -> f64 {
        let mut acc = x;
        for _ in 0..self.work {
            acc = (acc.sin() + x).cos();
        }
        2.0 + acc + 1.0 / (1.0 + 25.0 * x * x)
    }
}
