//! tally-session - Input state machine for Tally
//!
//! Accumulates discrete front-end events into an [`InputBuffer`],
//! validates evaluate requests, runs the evaluate-and-record flow
//! through the calculation service and the persistence gateway, and
//! journals every recoverable failure.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tally_engine::Operator;
//! use tally_session::{CalcSession, Display, InputEvent};
//! use tally_store::{FailureJournal, MemoryStore};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread()
//! #     .enable_all()
//! #     .build()
//! #     .unwrap();
//! # rt.block_on(async {
//! let journal = FailureJournal::new(std::env::temp_dir().join("tally-doc.log"));
//! let mut session = CalcSession::new(Arc::new(MemoryStore::new()), journal);
//!
//! for event in [
//!     InputEvent::Digit('1'),
//!     InputEvent::Digit('2'),
//!     InputEvent::Operator(Operator::Add),
//!     InputEvent::Digit('3'),
//!     InputEvent::Evaluate,
//! ] {
//!     session.step(event).await;
//! }
//!
//! match session.display() {
//!     Display::Result(evaluated) => assert_eq!(evaluated.rendered, "15.0"),
//!     _ => unreachable!(),
//! }
//! # });
//! ```

pub mod buffer;
pub mod error;
pub mod session;

// Re-exports for convenience
pub use buffer::{EntryState, InputBuffer, InputEvent};
pub use error::{Result, SessionError};
pub use session::{CalcSession, Completion, Display, EvalContext, EvalJob, Evaluated};
