use tokio::sync::mpsc;
use tracing::{info, warn};

/// Close requests from the host (SIGTERM, SIGHUP, SIGINT sent from outside
/// the terminal). Each one becomes an exit-password prompt, never a
/// direct exit.
pub struct QuitSignals {
    rx: mpsc::UnboundedReceiver<&'static str>,
}

impl QuitSignals {
    /// Register the handlers. Must run inside the tokio runtime.
    pub fn install() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            for (kind, name) in [
                (SignalKind::terminate(), "SIGTERM"),
                (SignalKind::hangup(), "SIGHUP"),
                (SignalKind::interrupt(), "SIGINT"),
            ] {
                let mut stream = match signal(kind) {
                    Ok(stream) => stream,
                    Err(err) => {
                        warn!("Failed to register {} handler: {}", name, err);
                        continue;
                    }
                };
                let tx = tx.clone();
                tokio::spawn(async move {
                    while stream.recv().await.is_some() {
                        info!(signal = name, "quit signal received");
                        if tx.send(name).is_err() {
                            break;
                        }
                    }
                });
            }
        }

        #[cfg(not(unix))]
        {
            let tx = tx.clone();
            tokio::spawn(async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    info!("console close request received");
                    if tx.send("ctrl-c").is_err() {
                        break;
                    }
                }
            });
        }

        Self { rx }
    }

    #[cfg(test)]
    fn from_receiver(rx: mpsc::UnboundedReceiver<&'static str>) -> Self {
        Self { rx }
    }

    /// Drain everything that arrived since the last tick. Several signals in
    /// one tick count once.
    pub fn poll(&mut self) -> bool {
        let mut fired = false;
        while self.rx.try_recv().is_ok() {
            fired = true;
        }
        fired
    }
}
