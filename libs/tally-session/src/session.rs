//! Evaluate-and-record flow
//!
//! [`CalcSession::apply_event`] is a pure synchronous transition; a
//! valid evaluate detaches into an [`EvalJob`] carrying a generation
//! number. Jobs run through an [`EvalContext`] - inline for the console,
//! on a background task for the keypad UI - and complete back into the
//! session, which discards any completion superseded by a newer
//! evaluate.

use std::sync::Arc;

use tally_engine::{format_value, BasicArithmetic, CalcService, Operator};
use tally_store::{CalculationRecord, CalculationStore, FailureJournal};
use tracing::{debug, warn};

use crate::buffer::{InputBuffer, InputEvent};
use crate::error::{Result, SessionError};

/// What the session shows where a result would appear
#[derive(Debug, Clone, PartialEq)]
pub enum Display {
    Idle,
    Result(Evaluated),
    Error,
}

/// A published result: the raw value and its canonical rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    pub value: f64,
    pub rendered: String,
}

/// A validated evaluate request, detached from the session so it can run
/// on a background task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalJob {
    pub generation: u64,
    pub operand1: f64,
    pub operator: Operator,
    pub operand2: f64,
}

/// Outcome of one evaluate-and-record run
#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub outcome: Result<Evaluated>,
}

/// Everything a detached job needs: service, store handle and journal.
/// Cheap to clone, so the keypad UI hands one to each spawned task.
pub struct EvalContext<S: CalculationStore> {
    service: CalcService<BasicArithmetic>,
    store: Arc<S>,
    journal: FailureJournal,
}

impl<S: CalculationStore> Clone for EvalContext<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service,
            store: Arc::clone(&self.store),
            journal: self.journal.clone(),
        }
    }
}

impl<S: CalculationStore> EvalContext<S> {
    /// Compute, persist, and journal failures. Returns the completion to
    /// hand back to the session that issued the job.
    pub async fn run(&self, job: EvalJob) -> Completion {
        let outcome = self.evaluate(&job).await;
        if let Err(err) = &outcome {
            self.journal.append(&err.to_string());
        }
        Completion {
            generation: job.generation,
            outcome,
        }
    }

    async fn evaluate(&self, job: &EvalJob) -> Result<Evaluated> {
        let value = self.service.apply(job.operator, job.operand1, job.operand2)?;
        let record = CalculationRecord::now(job.operand1, job.operator, job.operand2, value);
        self.store.record(&record).await?;
        debug!("recorded: {}", record.to_line());
        Ok(Evaluated {
            value,
            rendered: format_value(value),
        })
    }
}

/// Interactive calculation session: one input buffer, one sticky result
/// display, and generation bookkeeping for in-flight evaluates
pub struct CalcSession<S: CalculationStore> {
    buffer: InputBuffer,
    display: Display,
    issued: u64,
    ctx: EvalContext<S>,
}

impl<S: CalculationStore> CalcSession<S> {
    pub fn new(store: Arc<S>, journal: FailureJournal) -> Self {
        Self {
            buffer: InputBuffer::new(),
            display: Display::Idle,
            issued: 0,
            ctx: EvalContext {
                service: CalcService::new(BasicArithmetic),
                store,
                journal,
            },
        }
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Context for running detached jobs on a background task
    pub fn context(&self) -> EvalContext<S> {
        self.ctx.clone()
    }

    /// Apply one event. A valid evaluate returns the detached job to
    /// run; every other event (and every invalid evaluate) returns
    /// `None`. Any visible result or error is cleared by the next
    /// non-evaluate event.
    pub fn apply_event(&mut self, event: InputEvent) -> Option<EvalJob> {
        match event {
            InputEvent::Digit(ch) => {
                self.display = Display::Idle;
                self.buffer.push_digit(ch);
                None
            },
            InputEvent::Operator(op) => {
                self.display = Display::Idle;
                self.buffer.set_operator(op);
                None
            },
            InputEvent::Delete => {
                self.display = Display::Idle;
                self.buffer.delete_last();
                None
            },
            InputEvent::Clear => {
                self.display = Display::Idle;
                self.buffer.clear();
                None
            },
            InputEvent::Evaluate => self.begin_evaluate(),
        }
    }

    /// Accept a completion. Completions superseded by a newer evaluate
    /// are discarded so a stale result can never overwrite a fresh one.
    pub fn complete(&mut self, completion: Completion) {
        if completion.generation != self.issued {
            debug!(
                "discarding superseded completion (generation {}, latest {})",
                completion.generation, self.issued
            );
            return;
        }
        self.display = match completion.outcome {
            Ok(evaluated) => Display::Result(evaluated),
            Err(_) => Display::Error,
        };
    }

    /// Apply an event and, if it produced a job, run it inline.
    /// Synchronous from the caller's perspective; the console front-end
    /// and tests drive the session through this.
    pub async fn step(&mut self, event: InputEvent) {
        if let Some(job) = self.apply_event(event) {
            let completion = self.ctx.run(job).await;
            self.complete(completion);
        }
    }

    fn begin_evaluate(&mut self) -> Option<EvalJob> {
        let prepared = self.parse_buffer();
        // The buffer resets on both paths; only the display outcome differs
        self.buffer.clear();

        match prepared {
            Ok((operand1, operator, operand2)) => {
                self.issued += 1;
                Some(EvalJob {
                    generation: self.issued,
                    operand1,
                    operator,
                    operand2,
                })
            },
            Err(err) => {
                warn!("evaluate rejected: {}", err);
                self.ctx.journal.append(&err.to_string());
                self.display = Display::Error;
                None
            },
        }
    }

    fn parse_buffer(&self) -> Result<(f64, Operator, f64)> {
        let operator = self.buffer.pending().ok_or(SessionError::IncompleteEntry)?;
        let first = self.buffer.first();
        let second = self.buffer.second();
        if first.is_empty() || second.is_empty() {
            return Err(SessionError::IncompleteEntry);
        }

        let operand1 = first
            .parse::<f64>()
            .map_err(|_| SessionError::InvalidInput(format!("not a number: {first}")))?;
        let operand2 = second
            .parse::<f64>()
            .map_err(|_| SessionError::InvalidInput(format!("not a number: {second}")))?;

        Ok((operand1, operator, operand2))
    }
}
