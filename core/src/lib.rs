//! Tether - remote debug console bridge for script-driven applications
//!
//! Attach a plain TCP text console to a running host and inspect or mutate
//! its live script state without stopping the frame loop. The bridge is a
//! single listener accepting at most one client, a `breakpoint()` callable
//! the engine integration registers into the script environment, and a
//! blocking read-eval-print session that takes over the calling stack frame
//! until the developer releases it.
//!
//! # Architecture
//!
//! - [`Debugger`] - host-facing lifecycle: construct, poll once per frame,
//!   shut down; plus the breakpoint trigger the script callable forwards to
//! - [`DebugListener`] - non-blocking accept and disconnect detection
//! - [`Session`] - the blocking REPL state machine for one breakpoint hit
//! - [`Evaluator`] - the capability seam each scripting engine implements
//! - [`FrameClock`] - host delta-time reference the session-end callback
//!   resets so a debug session never shows up as a giant frame delta
//!
//! The bridge is deliberately single-threaded and synchronous: while a
//! session is open the world is frozen, which is exactly the point. Nothing
//! in here may raise an error into the embedding script; failures are
//! logged, swallowed, or reported over the debug channel.
//!
//! ```text
//! host frame loop ──poll()──> DebugListener ──accept──> client
//! script code ──breakpoint()──> Debugger ──Session──> REPL over client
//!                                   └──Outcome──> session-end callback
//! ```

pub mod bridge;
pub mod clock;
pub mod config;
pub mod evaluator;
pub mod net;
pub mod session;

pub use bridge::{ARGS_GLOBAL, Debugger, SessionEndCallback};
pub use clock::FrameClock;
pub use config::DebugConfig;
pub use evaluator::{ArgRepr, EvalError, Evaluator, StackFrame};
pub use net::{DebugListener, ListenError};
pub use session::{Outcome, Session, SessionEnd};
