//! StatValue - an ordered pipeline of additive and multiplicative steps

use serde::{Deserialize, Serialize};

/// One step of a stat pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatStep {
    Add(f64),
    Multiply(f64),
}

/// A stat computed by applying steps to a base value in insertion order
///
/// Unlike a sum-then-product model, order matters here: a flat buff added
/// after a stance multiplier is not scaled by it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub base: f64,
    pub steps: Vec<StatStep>,
}

impl StatValue {
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            steps: Vec::new(),
        }
    }

    pub fn add(&mut self, value: f64) -> &mut Self {
        self.steps.push(StatStep::Add(value));
        self
    }

    pub fn multiply(&mut self, factor: f64) -> &mut Self {
        self.steps.push(StatStep::Multiply(factor));
        self
    }

    /// Fold every step over the base
    pub fn compute(&self) -> f64 {
        self.steps.iter().fold(self.base, |acc, step| match step {
            StatStep::Add(v) => acc + v,
            StatStep::Multiply(f) => acc * f,
        })
    }

    /// Truncate toward zero and floor at zero
    pub fn compute_non_negative(&self) -> i32 {
        let value = self.compute().trunc();
        if value <= 0.0 || value.is_nan() {
            0
        } else {
            value as i32
        }
    }
}
