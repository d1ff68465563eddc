//! Calculation service
//!
//! Thin pass-through over an [`Arithmetic`] implementation. Adds no
//! behavior of its own; front-ends depend on the service rather than the
//! engine so the engine can be swapped out underneath them.

use crate::arithmetic::Arithmetic;
use crate::error::Result;
use crate::operator::Operator;

/// Delegates every operation to the underlying engine
#[derive(Debug, Default, Clone, Copy)]
pub struct CalcService<A: Arithmetic> {
    engine: A,
}

impl<A: Arithmetic> CalcService<A> {
    pub fn new(engine: A) -> Self {
        Self { engine }
    }

    pub fn add(&self, a: f64, b: f64) -> f64 {
        self.engine.add(a, b)
    }

    pub fn subtract(&self, a: f64, b: f64) -> f64 {
        self.engine.subtract(a, b)
    }

    pub fn multiply(&self, a: f64, b: f64) -> f64 {
        self.engine.multiply(a, b)
    }

    pub fn divide(&self, a: f64, b: f64) -> Result<f64> {
        self.engine.divide(a, b)
    }

    /// Dispatch on an operator
    pub fn apply(&self, op: Operator, a: f64, b: f64) -> Result<f64> {
        match op {
            Operator::Add => Ok(self.add(a, b)),
            Operator::Subtract => Ok(self.subtract(a, b)),
            Operator::Multiply => Ok(self.multiply(a, b)),
            Operator::Divide => self.divide(a, b),
        }
    }
}
