//! Call frame tracking for the evaluator.
//!
//! `CallStack` bounds activation depth and captures backtraces at error
//! sites. The backtrace is stored on `LangError` as `LangBacktrace`.

use usertalk_ir::{Name, TextPosition};
use usertalk_values::{recursion_limit_exceeded, BacktraceFrame, LangBacktrace, LangError};

use crate::eval_mode::DEFAULT_MAX_DEPTH;

/// A single frame in the live call stack.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Function name as spelled at the definition.
    pub name: Name,
    /// Position of the call node (where the call was made, not the definition).
    pub call_position: TextPosition,
}

/// Live call stack for the interpreter.
///
/// Each activation pushes a frame and pops it on every exit path. The depth
/// check is integrated into `push()`.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is NOT pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), LangError> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the stack is empty.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Snapshot of the live frames, most recent call first.
    pub fn capture(&self) -> LangBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: f.name.as_str().to_string(),
                position: Some(f.call_position),
            })
            .collect();
        LangBacktrace::new(frames)
    }

    /// Attach a backtrace of the live frames to `err`.
    pub fn attach_backtrace(&self, err: LangError) -> LangError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests;
