//! Evaluator capability interface
//!
//! The debug bridge never interprets script source itself. Each embedded
//! scripting engine exposes the small surface below: evaluate one line
//! against the live global scope, walk the current call stack, capture the
//! breakpoint call's arguments, and get/set a named global. The protocol and
//! session state machine are written once against this trait.

use thiserror::Error;

/// Printable evaluation failure reported back over the debug channel.
///
/// Carries the engine's own error text (syntax error, runtime exception in
/// the submitted line, ...). It never propagates into the host script's
/// error handling; the session reports it to the client and keeps looping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One frame of the script call stack at the breakpoint site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Source identifier (file name or chunk name)
    pub source: String,
    /// Current line within `source`
    pub line: u32,
}

/// Printable descriptor for one captured breakpoint argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgRepr {
    /// String-like value; rendered quoted as `args[<n>]:"<value>"`
    Scalar(String),
    /// Any other value; rendered by type name as `args[<n>]:(<typename>)`
    Typed(String),
}

/// Capability interface implemented by each scripting-engine integration.
///
/// All methods run on the main thread, inside the breakpoint call frame.
pub trait Evaluator {
    /// Opaque handle to a host-language value, used to save and restore
    /// globals across a session (the `args` variable specifically).
    type Global;

    /// Execute one line of source against the live global environment.
    ///
    /// Engines should try the line as an expression first (implicitly
    /// wrapped to capture its value) and fall back to executing it as a
    /// statement when the expression form fails to *parse*. Side effects
    /// (assignments etc.) persist after the call. Any engine-internal
    /// scratch state from the evaluation must be cleared before returning.
    ///
    /// Returns the printable representation of each produced value, in
    /// order; an assignment or other value-less statement returns an empty
    /// vec.
    fn eval(&mut self, line: &str) -> Result<Vec<String>, EvalError>;

    /// Current script call stack, outermost frame first.
    ///
    /// Engines that cannot produce a trace return an empty vec.
    fn stack_trace(&mut self) -> Vec<StackFrame>;

    /// Capture the breakpoint call's arguments, bind them 1-indexed into
    /// the global named `global_name`, and return one descriptor per
    /// argument (in call order).
    fn capture_args(&mut self, global_name: &str) -> Vec<ArgRepr>;

    /// Read a global by name; `None` when unset.
    fn get_global(&mut self, name: &str) -> Option<Self::Global>;

    /// Write a global by name; `None` unsets it.
    fn set_global(&mut self, name: &str, value: Option<Self::Global>);
}
