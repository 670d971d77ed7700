//! Breakpoint REPL session
//!
//! One session spans one breakpoint invocation: prompt, blocking line read,
//! dispatch, evaluate, reply, loop, until the developer resumes, quits, or
//! the client vanishes. The session deliberately blocks the calling thread
//! (and with it the host frame loop): the world is frozen while the
//! developer inspects it.

use std::io::{Read, Write};
use std::net::TcpStream;

use crate::evaluator::Evaluator;

/// Result of a completed session, consumed exactly once by the host's
/// session-end callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Resume the host normally (and suppress the elapsed-time spike)
    Continue,
    /// The developer asked the host to shut down
    Quit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnd {
    pub outcome: Outcome,
    /// The client went away mid-session; its slot should be cleared.
    pub disconnected: bool,
}

impl SessionEnd {
    fn resumed(outcome: Outcome) -> Self {
        Self {
            outcome,
            disconnected: false,
        }
    }

    fn disconnected() -> Self {
        Self {
            outcome: Outcome::Continue,
            disconnected: true,
        }
    }
}

/// Line buffer size; a line that fills it without a terminator is rejected.
const LINE_BUFFER_SIZE: usize = 1024;

/// Token ending the session with [`Outcome::Continue`] (as does an empty line)
const CONTINUE_TOKEN: &str = ".cont";
/// Token ending the session with [`Outcome::Quit`]
const QUIT_TOKEN: &str = ".quit";

/// Parsed dispatch of one input line.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Resume,
    Quit,
    Eval(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        if line.is_empty() || line == CONTINUE_TOKEN {
            Command::Resume
        } else if line == QUIT_TOKEN {
            Command::Quit
        } else {
            Command::Eval(line)
        }
    }
}

/// The blocking REPL state machine for one breakpoint invocation.
///
/// Borrows the client stream from the connection manager and the evaluator
/// from the engine integration for exactly the duration of the session.
pub struct Session<'a, E: Evaluator> {
    stream: &'a mut TcpStream,
    evaluator: &'a mut E,
    prompt: &'a str,
}

impl<'a, E: Evaluator> Session<'a, E> {
    pub fn new(stream: &'a mut TcpStream, evaluator: &'a mut E, prompt: &'a str) -> Self {
        Self {
            stream,
            evaluator,
            prompt,
        }
    }

    /// Drive the REPL until an exit condition.
    ///
    /// The client socket is switched to blocking reads for the duration and
    /// restored to non-blocking on exit (the polled peek in
    /// [`crate::net::DebugListener::poll`] relies on it).
    pub fn run(mut self) -> SessionEnd {
        if let Err(e) = self.stream.set_nonblocking(false) {
            tracing::warn!("debug session could not block on client: {e}");
            return SessionEnd::disconnected();
        }

        let end = self.repl();

        if !end.disconnected {
            if let Err(e) = self.stream.set_nonblocking(true) {
                tracing::warn!("debug client socket unusable after session: {e}");
                return SessionEnd {
                    outcome: end.outcome,
                    disconnected: true,
                };
            }
        }
        end
    }

    fn repl(&mut self) -> SessionEnd {
        let mut buf = [0u8; LINE_BUFFER_SIZE];
        loop {
            // Prompt writes are best-effort; a dead client surfaces as a
            // failed read right after.
            let _ = self.stream.write_all(self.prompt.as_bytes());

            let n = match self.stream.read(&mut buf) {
                Ok(0) => {
                    tracing::info!("debug client closed mid-session, resuming");
                    return SessionEnd::disconnected();
                }
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!("debug session read failed: {e}");
                    return SessionEnd::disconnected();
                }
            };

            if n == buf.len() {
                let _ = self.stream.write_all(b"Input too long\n");
                continue;
            }

            let line = String::from_utf8_lossy(&buf[..n]);
            let line = line.trim_end_matches(['\n', '\r']);

            match Command::parse(line) {
                Command::Resume => return SessionEnd::resumed(Outcome::Continue),
                Command::Quit => return SessionEnd::resumed(Outcome::Quit),
                Command::Eval(src) => self.eval_and_reply(src),
            }
        }
    }

    /// Evaluate one line and report results (or the error) to the client.
    ///
    /// Evaluation failures are client-visible text only; they never
    /// propagate into the host script.
    fn eval_and_reply(&mut self, src: &str) {
        match self.evaluator.eval(src) {
            Ok(results) => {
                for (n, value) in results.iter().enumerate() {
                    let _ = writeln!(self.stream, "  ret[{n}]:\"{value}\"");
                }
            }
            Err(e) => {
                let _ = writeln!(self.stream, "Error: {e}");
            }
        }
    }
}
