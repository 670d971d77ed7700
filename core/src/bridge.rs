//! Debugger lifecycle and breakpoint trigger
//!
//! [`Debugger`] is the host-facing surface of the bridge: construct it at
//! startup, call [`Debugger::poll`] once per frame, and tear it down with
//! [`Debugger::shutdown`]. The scripting-engine integration registers a
//! global callable under [`DebugConfig::breakpoint_name`] whose body calls
//! [`Debugger::breakpoint`]; everything else is handled here.
//!
//! # Host integration
//!
//! ```rust,ignore
//! let mut debugger = Debugger::new(config.debug.clone(), Some(Box::new(move |outcome| {
//!     match outcome {
//!         Outcome::Continue => clock.reset_timestamp(),
//!         Outcome::Quit => window.request_close(),
//!     }
//! })));
//!
//! while window.is_open() {
//!     debugger.poll();
//!     // update / draw ...
//! }
//! debugger.shutdown();
//! ```

use std::io::Write;
use std::net::{SocketAddr, TcpStream};

use crate::config::DebugConfig;
use crate::evaluator::{ArgRepr, Evaluator};
use crate::net::DebugListener;
use crate::session::{Outcome, Session};

/// Well-known global through which captured breakpoint arguments are
/// exposed to REPL-evaluated expressions (`args[1]`, `args[2]`, ...).
pub const ARGS_GLOBAL: &str = "args";

/// Host-supplied callback invoked exactly once per completed session.
///
/// Must not block or re-enter the debugger. `Continue` should reset the
/// host's delta-time reference so the next frame does not observe the
/// wall-clock time spent in the session; `Quit` should begin orderly
/// shutdown of the frame loop.
pub type SessionEndCallback = Box<dyn FnMut(Outcome)>;

/// Process-side debugger state: listener, client slot, configuration, and
/// the session-end callback. One instance per scripting runtime; it must
/// not outlive the runtime its breakpoint callable is registered in.
pub struct Debugger {
    listener: DebugListener,
    config: DebugConfig,
    on_session_end: Option<SessionEndCallback>,
}

impl Debugger {
    /// Open the debug listener per `config`.
    ///
    /// A bind failure is logged and leaves the debugger disabled for the
    /// rest of the process; it is never fatal to the host.
    pub fn new(config: DebugConfig, on_session_end: Option<SessionEndCallback>) -> Self {
        let listener = match DebugListener::open(config.port) {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!("debugger disabled: {e}");
                DebugListener::closed()
            }
        };
        Self {
            listener,
            config,
            on_session_end,
        }
    }

    /// Whether the listener is accepting connections.
    pub fn is_enabled(&self) -> bool {
        self.listener.is_open()
    }

    /// Whether a debugger client is currently attached.
    pub fn has_client(&self) -> bool {
        self.listener.has_client()
    }

    /// Name the engine integration should register its callable under.
    pub fn breakpoint_name(&self) -> &str {
        &self.config.breakpoint_name
    }

    /// Local address of the listener, if enabled.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.local_addr()
    }

    /// Per-frame connection upkeep. Never blocks.
    pub fn poll(&mut self) {
        self.listener.poll();
    }

    /// The breakpoint trigger, called synchronously from the registered
    /// script callable, in the calling thread and stack frame.
    ///
    /// A no-op when no client is attached. Otherwise announces the hit,
    /// exposes the call's arguments through the `args` global, and blocks
    /// in a REPL session until the developer releases it. The previous
    /// value of `args` is restored unconditionally, and the session-end
    /// callback fires exactly once before control returns to the script.
    pub fn breakpoint<E: Evaluator>(&mut self, evaluator: &mut E) {
        if !self.listener.has_client() {
            return;
        }

        let saved_args = evaluator.get_global(ARGS_GLOBAL);

        let end = {
            let Some(stream) = self.listener.client_mut() else {
                return;
            };
            announce(stream, evaluator);
            Session::new(stream, evaluator, &self.config.prompt).run()
        };

        evaluator.set_global(ARGS_GLOBAL, saved_args);

        if end.disconnected {
            self.listener.drop_client();
        }

        if let Some(callback) = &mut self.on_session_end {
            callback(end.outcome);
        }
    }

    /// Close all sockets. Idempotent.
    pub fn shutdown(&mut self) {
        self.listener.close();
    }
}

/// Send the breakpoint banner, stack trace, and argument lines.
///
/// All writes are best-effort diagnostics: a dead client is detected by the
/// session's first read, never raised into the script.
fn announce<E: Evaluator>(stream: &mut TcpStream, evaluator: &mut E) {
    let _ = stream.write_all(b"\n[tether] Breakpoint hit!\n");

    for frame in evaluator.stack_trace() {
        let _ = writeln!(stream, "  at {}:{}", frame.source, frame.line);
    }

    for (i, arg) in evaluator.capture_args(ARGS_GLOBAL).iter().enumerate() {
        let n = i + 1;
        match arg {
            ArgRepr::Scalar(value) => {
                let _ = writeln!(stream, "  args[{n}]:\"{value}\"");
            }
            ArgRepr::Typed(typename) => {
                let _ = writeln!(stream, "  args[{n}]:({typename})");
            }
        }
    }
}
