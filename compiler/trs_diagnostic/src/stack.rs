//! The logical call-frame stack.
//!
//! Distinct from `trs_stack`'s native-stack guard: this is a bounded trace
//! of *which rule bodies are currently being evaluated*, used both to
//! enforce the recursion-depth limit and to stamp a frame trace onto an
//! error as it propagates back out.

use trs_ir::{Expr, Frame};

use crate::errors::recursion_error;

/// A depth-limited stack of evaluation frames.
pub struct FrameStack {
    frames: Vec<Frame>,
    limit: usize,
}

impl FrameStack {
    pub fn new(limit: usize) -> Self {
        FrameStack {
            frames: Vec::new(),
            limit,
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Push a new frame, failing with a `RecursionError` if doing so would
    /// exceed the configured limit.
    pub fn push(&mut self, frame: Frame) -> Result<(), Expr> {
        if self.frames.len() >= self.limit {
            return Err(recursion_error(self.limit));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Attach the current frame trace (innermost first) onto `error`.
    #[must_use]
    pub fn stamp(&self, error: Expr) -> Expr {
        self.frames
            .iter()
            .rev()
            .cloned()
            .fold(error, |e, f| e.with_frame(f))
    }
}

impl Default for FrameStack {
    fn default() -> Self {
        FrameStack::new(1000)
    }
}
