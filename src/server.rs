//! The server façade: constructs the processor, binds it to the TCP
//! transport on the tokio runtime, optionally registers with a
//! portmapper, and coordinates shutdown through a one-shot stop channel.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::dispatch::NfsDispatcher;
use crate::nfs3::{ProcessorContext, PROGRAM, VERSION};
use crate::transport::{handle_connection, TransactionLog};

/// Client used to announce the service to a portmapper after the
/// transport is bound. The wire protocol behind it is not this crate's
/// concern; embedders bring their own rpcbind client.
#[async_trait]
pub trait PortmapRegistrar: Send + Sync {
    /// Registers `(program, version)` at the server's bound port.
    async fn register(&self, program: u32, version: u32, port: u16) -> anyhow::Result<()>;
}

/// Construction parameters for [`Nfsd3`].
pub struct Nfsd3Config {
    /// Address to bind, in `ip:port` form. Port 0 asks the OS for one.
    pub listen: String,
    /// Whether to announce `(100003, 3)` to the portmapper after binding.
    pub register_with_portmap: bool,
    /// Whether the exported filesystem distinguishes name case.
    pub case_sensitive: bool,
}

/// Payload delivered through the stop channel when the server goes down.
#[derive(Debug, Default)]
pub struct StopData {}

/// A running NFSv3 server.
///
/// Binding starts the accept loop immediately. The stop channel is armed
/// at construction and fires exactly once: either from [`Nfsd3::stop`]
/// after in-flight connections drain, or from `Drop` if the server is
/// discarded while still running.
pub struct Nfsd3 {
    local_addr: SocketAddr,
    accept_task: Option<JoinHandle<()>>,
    shutdown_tx: watch::Sender<bool>,
    stop_tx: Option<oneshot::Sender<StopData>>,
    stop_rx: Option<oneshot::Receiver<StopData>>,
}

impl Nfsd3 {
    /// Builds the processor, binds the transport, and starts serving.
    ///
    /// When `config.register_with_portmap` is set, a registrar must be
    /// supplied and is called once after the listener is bound.
    pub async fn bind(
        config: Nfsd3Config,
        dispatcher: Arc<dyn NfsDispatcher>,
        portmap: Option<Arc<dyn PortmapRegistrar>>,
    ) -> anyhow::Result<Nfsd3> {
        let listener = TcpListener::bind(&config.listen)
            .await
            .with_context(|| format!("binding {}", config.listen))?;
        let local_addr = listener.local_addr()?;
        info!("listening on {local_addr}");

        if config.register_with_portmap {
            match &portmap {
                Some(registrar) => {
                    registrar
                        .register(PROGRAM, VERSION, local_addr.port())
                        .await
                        .context("portmap registration")?;
                    debug!("registered ({PROGRAM}, {VERSION}) with portmapper");
                }
                None => warn!("portmap registration requested but no registrar supplied"),
            }
        }

        let ctx = Arc::new(ProcessorContext {
            dispatcher,
            case_sensitive: config.case_sensitive,
        });
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (stop_tx, stop_rx) = oneshot::channel();

        let accept_task = tokio::spawn(accept_loop(listener, ctx, shutdown_rx));

        Ok(Nfsd3 {
            local_addr,
            accept_task: Some(accept_task),
            shutdown_tx,
            stop_tx: Some(stop_tx),
            stop_rx: Some(stop_rx),
        })
    }

    /// The address the transport is bound to; useful with port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Takes the consumer end of the stop channel so callers can await
    /// teardown. Yields `None` after the first call.
    pub fn stop_future(&mut self) -> Option<oneshot::Receiver<StopData>> {
        self.stop_rx.take()
    }

    /// Stops the server: closes the accept loop, waits for in-flight
    /// connections to drain, then fires the stop channel.
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.accept_task.take() {
            if let Err(e) = task.await {
                debug!("accept loop ended abnormally: {e:?}");
            }
        }
        self.fire_stop();
        info!("server stopped");
    }

    fn fire_stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(StopData::default());
        }
    }
}

impl Drop for Nfsd3 {
    fn drop(&mut self) {
        // A dropped server stops accepting but cannot await its tasks;
        // they unwind on their own once the shutdown flag flips.
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.accept_task.take() {
            task.abort();
        }
        self.fire_stop();
    }
}

/// Accepts connections until shutdown, then drains the per-connection
/// tasks before returning.
async fn accept_loop(
    listener: TcpListener,
    ctx: Arc<ProcessorContext>,
    mut shutdown: watch::Receiver<bool>,
) {
    let transactions = Arc::new(TransactionLog::default());
    let mut connections = JoinSet::new();
    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            accepted = listener.accept() => {
                match accepted {
                    Ok((socket, peer)) => {
                        info!("accepting connection from {peer}");
                        let ctx = ctx.clone();
                        let transactions = transactions.clone();
                        let shutdown = shutdown.clone();
                        connections.spawn(async move {
                            if let Err(e) =
                                handle_connection(socket, ctx, transactions, shutdown).await
                            {
                                debug!("connection to {peer} ended: {e:?}");
                            }
                        });
                    }
                    Err(e) => {
                        warn!("accept failed: {e:?}");
                        break;
                    }
                }
            }
        }
    }
    drop(listener);
    while connections.join_next().await.is_some() {}
}
