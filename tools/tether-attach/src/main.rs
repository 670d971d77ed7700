//! tether-attach - attach a terminal to a running tether debug console
//!
//! Connects to the host's debug port and shuttles lines between the
//! terminal and the wire: stdin lines go to the host, everything the host
//! sends comes back on stdout. A netcat stand-in with sane line handling.
//!
//! # Usage
//!
//! ```bash
//! # Host started with debug port 9000
//! tether-attach 9000
//!
//! # Remote host
//! tether-attach --host 192.168.1.50 9000
//! ```
//!
//! Inside a breakpoint session: an empty line or `.cont` resumes the host,
//! `.quit` asks it to shut down. Ctrl-D detaches.

use std::io::{self, BufRead, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "tether-attach", about = "Attach to a running tether debug console")]
struct Args {
    /// Host to connect to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Debug port the application was started with
    port: u16,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    let stream = TcpStream::connect(&addr).with_context(|| format!("connecting to {addr}"))?;
    eprintln!("attached to {addr} (empty line or .cont resumes, .quit stops the host, Ctrl-D detaches)");

    // Socket-to-stdout pump; exits when the host closes the connection.
    let mut reader = stream.try_clone().context("cloning debug stream")?;
    let pump = thread::spawn(move || -> io::Result<()> {
        let mut stdout = io::stdout();
        let mut buf = [0u8; 1024];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            stdout.write_all(&buf[..n])?;
            stdout.flush()?;
        }
        Ok(())
    });

    let mut writer = &stream;
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        writer.write_all(line.as_bytes()).context("sending line")?;
        writer.write_all(b"\n").context("sending line")?;
    }

    // Stdin closed; tear the connection down so the pump unblocks.
    stream.shutdown(Shutdown::Both).ok();
    match pump.join() {
        Ok(result) => {
            // A reset from the host going away mid-read is normal detach.
            if let Err(e) = result {
                if e.kind() != io::ErrorKind::ConnectionReset {
                    return Err(e).context("reading from host");
                }
            }
        }
        Err(_) => anyhow::bail!("output thread panicked"),
    }
    eprintln!("detached");
    Ok(())
}
