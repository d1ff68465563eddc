//! tally-engine - Arithmetic engine for Tally
//!
//! Provides the closed operator set, pure `f64` arithmetic with a single
//! explicit error case (division by zero), and the thin calculation
//! service the front-ends talk to.
//!
//! # Example
//!
//! ```rust
//! use tally_engine::{BasicArithmetic, CalcService, Operator};
//!
//! let service = CalcService::new(BasicArithmetic);
//!
//! let sum = service.apply(Operator::Add, 12.0, 3.0).unwrap();
//! assert_eq!(sum, 15.0);
//!
//! assert!(service.divide(1.0, 0.0).is_err());
//! ```

pub mod arithmetic;
pub mod error;
pub mod operator;
pub mod render;
pub mod service;

// Re-exports for convenience
pub use arithmetic::{Arithmetic, BasicArithmetic};
pub use error::{EngineError, Result};
pub use operator::Operator;
pub use render::format_value;
pub use service::CalcService;
