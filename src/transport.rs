//! TCP transport for the RPC layer.
//!
//! Implements the RFC 5531 Record Marking Standard: every RPC message is
//! carried as one or more fragments, each prefixed by a 4-byte header
//! whose low 31 bits are the fragment length and whose high bit marks the
//! final fragment of the record.
//!
//! Each connection runs a read loop that reassembles records and spawns
//! one task per record, so requests bearing different transaction ids may
//! complete out of receipt order; a writer task serializes the finished
//! replies onto the wire as they complete. The reply buffer for a request
//! lives inside its task for the whole request lifetime, so attribute
//! probes joined late in a handler never outlive it.
//!
//! Retransmitted calls (same xid from the same client within the
//! retention window) are dropped without a reply, preserving at-most-once
//! execution for non-idempotent procedures.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::bail;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use crate::nfs3::{dispatch_call, ProcessorContext};
use crate::xdr::rpc::{self, auth_flavor, auth_unix};
use crate::xdr::{deserialize, Serialize};

/// Upper bound on a reassembled RPC record; larger records are rejected to
/// bound memory per connection. Covers a maximal 1 MiB WRITE with
/// generous headroom.
pub const MAX_RPC_RECORD_LENGTH: usize = 8 * 1024 * 1024;

/// Initial capacity of a reply buffer.
const REPLY_BUFFER_CAPACITY: usize = 512;

/// How long a completed transaction is remembered for retransmission
/// detection.
const TRANSACTION_RETENTION: Duration = Duration::from_secs(60);

/// Remembers recently seen transactions so retransmitted calls are not
/// executed twice. Keyed by `(xid, client address)`; completed entries
/// expire after the retention window, in-progress entries never do.
pub struct TransactionLog {
    retention: Duration,
    transactions: Mutex<HashMap<(u32, String), TransactionState>>,
}

enum TransactionState {
    InProgress,
    Completed(Instant),
}

impl TransactionLog {
    pub fn new(retention: Duration) -> Self {
        Self { retention, transactions: Mutex::new(HashMap::new()) }
    }

    /// Records the transaction as in progress unless it was already seen.
    /// Returns true when the call is a retransmission.
    pub fn is_retransmission(&self, xid: u32, client_addr: &str) -> bool {
        let mut transactions = self.transactions.lock().unwrap_or_else(|e| e.into_inner());
        let cutoff = Instant::now().checked_sub(self.retention);
        transactions.retain(|_, state| match state {
            TransactionState::InProgress => true,
            TransactionState::Completed(at) => cutoff.map_or(true, |cutoff| *at >= cutoff),
        });
        match transactions.entry((xid, client_addr.to_string())) {
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(TransactionState::InProgress);
                false
            }
            std::collections::hash_map::Entry::Occupied(_) => true,
        }
    }

    /// Marks the transaction completed, starting its retention clock.
    pub fn mark_processed(&self, xid: u32, client_addr: &str) {
        let mut transactions = self.transactions.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(state) = transactions.get_mut(&(xid, client_addr.to_string())) {
            *state = TransactionState::Completed(Instant::now());
        }
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new(TRANSACTION_RETENTION)
    }
}

/// Reads one record-marked RPC message. Returns `None` on a clean EOF at
/// a record boundary.
async fn read_record(socket: &mut OwnedReadHalf) -> anyhow::Result<Option<Vec<u8>>> {
    let mut record = Vec::new();
    loop {
        let mut header = [0_u8; 4];
        match socket.read_exact(&mut header).await {
            Ok(_) => {}
            Err(e) if record.is_empty() && e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }
        let fragment_header = u32::from_be_bytes(header);
        let is_last = fragment_header & (1 << 31) != 0;
        let length = (fragment_header & ((1 << 31) - 1)) as usize;
        trace!("reading fragment length={length} last={is_last}");
        if record.len().saturating_add(length) > MAX_RPC_RECORD_LENGTH {
            bail!("RPC record length {} exceeds max {}", record.len() + length, MAX_RPC_RECORD_LENGTH);
        }
        let start = record.len();
        record.resize(start + length, 0);
        socket.read_exact(&mut record[start..]).await?;
        if is_last {
            return Ok(Some(record));
        }
    }
}

/// Writes one reply as record-marked fragments.
pub async fn write_record(socket: &mut OwnedWriteHalf, buf: &[u8]) -> anyhow::Result<()> {
    const MAX_FRAGMENT_SIZE: usize = (1 << 31) - 1;

    let mut offset = 0;
    loop {
        let fragment_size = std::cmp::min(buf.len() - offset, MAX_FRAGMENT_SIZE);
        let is_last = offset + fragment_size >= buf.len();
        let fragment_header =
            fragment_size as u32 | if is_last { 1 << 31 } else { 0 };
        trace!("writing fragment length={fragment_size} last={is_last}");
        socket.write_all(&fragment_header.to_be_bytes()).await?;
        socket.write_all(&buf[offset..offset + fragment_size]).await?;
        offset += fragment_size;
        if is_last {
            return Ok(());
        }
    }
}

/// Processes one RPC record: decodes the call, screens the RPC version and
/// retransmissions, extracts AUTH_UNIX credentials, and routes the call to
/// the processor. Returns the finished reply buffer, or `None` when the
/// record was a retransmission and must not be answered.
pub async fn process_record(
    data: Vec<u8>,
    ctx: &ProcessorContext,
    client_addr: &str,
    transactions: &TransactionLog,
) -> anyhow::Result<Option<Vec<u8>>> {
    let mut input = Cursor::new(data);
    let msg = deserialize::<rpc::rpc_msg>(&mut input)?;
    let rpc::rpc_body::CALL(call) = msg.body else {
        bail!("received an RPC reply where a call was expected");
    };

    let mut output = Vec::with_capacity(REPLY_BUFFER_CAPACITY);
    if call.rpcvers != rpc::RPC_VERSION {
        warn!("invalid RPC version {} != {}", call.rpcvers, rpc::RPC_VERSION);
        rpc::rpc_vers_mismatch_reply(msg.xid).serialize(&mut output)?;
        return Ok(Some(output));
    }

    if transactions.is_retransmission(msg.xid, client_addr) {
        debug!("dropping retransmission xid={} client={client_addr}", msg.xid);
        return Ok(None);
    }

    let credentials: Option<auth_unix> = if call.cred.flavor == auth_flavor::AUTH_UNIX {
        Some(deserialize(&mut Cursor::new(&call.cred.body))?)
    } else {
        None
    };

    let result = dispatch_call(
        msg.xid,
        call.prog,
        call.vers,
        call.proc,
        &mut input,
        &mut output,
        ctx,
        credentials,
    )
    .await;
    transactions.mark_processed(msg.xid, client_addr);
    result.map(|()| Some(output))
}

/// Serves one client connection until EOF, a fatal I/O error, or server
/// shutdown. In-flight request tasks are always drained before returning
/// so no reply buffer is dropped mid-serialization.
pub(crate) async fn handle_connection(
    socket: TcpStream,
    ctx: Arc<ProcessorContext>,
    transactions: Arc<TransactionLog>,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let client_addr = socket.peer_addr()?.to_string();
    let _ = socket.set_nodelay(true);
    let (mut rd, mut wr) = socket.into_split();

    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let writer = tokio::spawn(async move {
        while let Some(reply) = reply_rx.recv().await {
            if let Err(e) = write_record(&mut wr, &reply).await {
                debug!("reply write failed: {e:?}");
                break;
            }
        }
    });

    let mut requests = JoinSet::new();
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                debug!("connection to {client_addr} closing for shutdown");
                break;
            }
            record = read_record(&mut rd) => {
                match record {
                    Ok(None) => break,
                    Ok(Some(data)) => {
                        let ctx = ctx.clone();
                        let transactions = transactions.clone();
                        let client_addr = client_addr.clone();
                        let reply_tx = reply_tx.clone();
                        requests.spawn(async move {
                            match process_record(data, &ctx, &client_addr, &transactions).await {
                                Ok(Some(reply)) => {
                                    let _ = reply_tx.send(reply);
                                }
                                Ok(None) => {}
                                Err(e) => {
                                    // The reply may be partially built;
                                    // drop it rather than send garbage.
                                    debug!("request dropped: {e:?}");
                                }
                            }
                        });
                    }
                    Err(e) => {
                        debug!("read loop for {client_addr} ended: {e:?}");
                        break;
                    }
                }
            }
        }
    }

    while requests.join_next().await.is_some() {}
    drop(reply_tx);
    let _ = writer.await;
    Ok(())
}
