//! Server module
//!
//! The outer polling loop driving the dispatcher: one cooperative thread,
//! strictly sequential. Each request is fully resolved, including any file
//! streaming, before the next connection is accepted. A failed connection is
//! logged and dropped; the dispatcher's route table, manifest, and cache
//! survive untouched.

pub mod conn;
pub mod listener;

pub use listener::create_listener;

use crate::app::App;
use crate::config::Config;
use chrono::Local;
use log::{error, info};

/// Accept and serve connections forever
///
/// Only startup failures (bad address, bind error) return; transport-level
/// errors after that reset the individual connection and the loop continues.
pub fn run(app: &mut App, cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let tcp = create_listener(addr)?;
    info!("listening on http://{}", tcp.local_addr()?);

    loop {
        let (mut stream, peer) = match tcp.accept() {
            Ok(accepted) => accepted,
            Err(err) => {
                error!("failed to accept connection: {err}");
                continue;
            }
        };

        match conn::serve_connection(&mut stream, app) {
            Ok(served) => {
                if cfg.logging.access_log {
                    log_access(&peer.to_string(), &served);
                }
            }
            Err(err) => {
                error!("connection from {peer} reset: {err}");
            }
        }
    }
}

/// Common-log style access line
fn log_access(peer: &str, served: &conn::ServedRequest) {
    let time = Local::now().format("%d/%b/%Y:%H:%M:%S %z");
    let status = served
        .status
        .split_whitespace()
        .next()
        .unwrap_or("-");
    info!(
        "{peer} [{time}] \"{} {}\" {status} {}",
        served.method, served.path, served.body_bytes
    );
}
