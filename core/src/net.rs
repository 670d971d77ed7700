//! Debug connection management
//!
//! Owns the listening socket and the single accepted client. Accept and
//! disconnect detection are strictly non-blocking and polled once per host
//! frame, so an attached (but idle) debugger never disturbs the frame
//! cadence. Blocking I/O on the client happens only inside a breakpoint
//! session, which borrows the stream from here.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};

/// Connection setup error types
#[derive(Debug, thiserror::Error)]
pub enum ListenError {
    /// Failed to bind the debug port
    #[error("failed to bind debug port {port}: {source}")]
    Bind { port: u16, source: io::Error },
    /// Failed to set socket options
    #[error("failed to configure debug socket: {0}")]
    SocketOption(#[source] io::Error),
}

/// Listener plus at-most-one client slot.
///
/// Invariant: a new accept is only attempted while no client is connected.
/// Connection attempts made while a client is attached stay in the OS
/// backlog until the current client disconnects.
#[derive(Debug)]
pub struct DebugListener {
    listener: Option<TcpListener>,
    client: Option<TcpStream>,
}

impl DebugListener {
    /// An inert listener: every operation is a no-op.
    pub fn closed() -> Self {
        Self {
            listener: None,
            client: None,
        }
    }

    /// Bind `0.0.0.0:<port>` and start listening, non-blocking.
    ///
    /// Port 0 disables networking entirely and returns an inert listener.
    pub fn open(port: u16) -> Result<Self, ListenError> {
        if port == 0 {
            return Ok(Self::closed());
        }

        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
            .map_err(|source| ListenError::Bind { port, source })?;
        listener
            .set_nonblocking(true)
            .map_err(ListenError::SocketOption)?;

        tracing::info!(port, "debug listener bound");

        Ok(Self {
            listener: Some(listener),
            client: None,
        })
    }

    /// Whether the listening socket exists.
    pub fn is_open(&self) -> bool {
        self.listener.is_some()
    }

    /// Whether a client is currently attached.
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Local address of the listening socket, if open.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Mutable access to the attached client stream, for session use.
    pub fn client_mut(&mut self) -> Option<&mut TcpStream> {
        self.client.as_mut()
    }

    /// Drop the attached client, freeing the slot for a new accept.
    pub fn drop_client(&mut self) {
        if self.client.take().is_some() {
            tracing::info!("debug client disconnected");
        }
    }

    /// Per-frame poll: accept a client if the slot is free, detect a
    /// disconnect if it is not. Never blocks; safe when never opened.
    pub fn poll(&mut self) {
        if let Some(listener) = &self.listener {
            if self.client.is_none() {
                match listener.accept() {
                    Ok((stream, addr)) => match stream.set_nonblocking(true) {
                        Ok(()) => {
                            tracing::info!(%addr, "debug client connected");
                            self.client = Some(stream);
                        }
                        Err(e) => {
                            tracing::warn!("failed to configure debug client socket: {e}");
                        }
                    },
                    Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
                    // Transient accept failure; retry next frame.
                    Err(e) => tracing::debug!("debug accept failed: {e}"),
                }
            }
        }

        if let Some(client) = &self.client {
            // Zero-consuming peek: 0 bytes means orderly close.
            let mut buf = [0u8; 1];
            let lost = match client.peek(&mut buf) {
                Ok(0) => true,
                Ok(_) => false,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => false,
                Err(e) => {
                    tracing::debug!("debug client peek failed: {e}");
                    true
                }
            };
            if lost {
                self.drop_client();
            }
        }
    }

    /// Close client and listener sockets. Idempotent.
    pub fn close(&mut self) {
        self.drop_client();
        if self.listener.take().is_some() {
            tracing::info!("debug listener closed");
        }
    }
}
