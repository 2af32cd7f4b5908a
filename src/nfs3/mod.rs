//! The NFSv3 request processor: procedure routing and handler dispatch.
//!
//! A constant 22-entry table maps procedure numbers to handlers. The
//! router validates the program number, program version and procedure
//! number, writing the corresponding RPC accept-status prelude when any of
//! them is off, and otherwise hands the call to the handler. Handlers own
//! the rest of the reply: each writes exactly one reply, starting with the
//! accept-status prelude, before touching the back-end.
//!
//! Structural problems (wrong program, version, procedure) are reported in
//! the RPC accept status and never combined with an NFS payload; back-end
//! failures are mapped to `nfsstat3` values inside the procedure reply
//! body. No error crosses a handler boundary except I/O and decode
//! failures, which abort the reply entirely so a partial one is never
//! sent.

use std::io::Cursor;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::trace;

use crate::dispatch::NfsDispatcher;
use crate::xdr::rpc::{self, auth_unix};
use crate::xdr::Serialize;

mod access;
mod create;
mod fsinfo;
mod fsstat;
mod getattr;
mod link;
mod lookup;
mod mkdir;
mod null;
mod pathconf;
mod readlink;
mod write;

pub use crate::xdr::nfs3::{NAME_MAX, PROGRAM, VERSION};

/// Long-lived processor state, shared by every request.
///
/// Immutable after construction. The back-end dispatcher is owned here and
/// borrowed by in-flight requests; the tracing subscriber installed by the
/// embedding process serves as the strace sink (see [`STRACE_TARGET`]).
pub struct ProcessorContext {
    /// The filesystem back-end requests are dispatched to.
    pub dispatcher: Arc<dyn NfsDispatcher>,
    /// Whether the exported filesystem distinguishes name case; reported
    /// through PATHCONF.
    pub case_sensitive: bool,
}

/// Tracing target used for the one-line-per-call dispatch log.
pub const STRACE_TARGET: &str = "strace";

/// Per-request state, synthesized by the router for each invocation.
///
/// Carries the procedure tag for tracing and attribution, and the caller's
/// AUTH_UNIX credentials when the call presented any.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    /// Printable name of the procedure being served, e.g. `"LOOKUP"`.
    pub proc_name: &'static str,
    /// Credentials from the RPC call, absent under AUTH_NONE.
    pub credentials: Option<auth_unix>,
}

impl RequestContext {
    fn new(proc_name: &'static str, credentials: Option<auth_unix>) -> RequestContext {
        RequestContext { proc_name, credentials }
    }
}

pub(crate) type HandlerFuture<'a> = BoxFuture<'a, anyhow::Result<()>>;

/// Handler signature: a read cursor positioned after the RPC header, a
/// write buffer positioned where the reply starts, the transaction id, and
/// the two context layers.
pub(crate) type HandlerFn = for<'a> fn(
    u32,
    &'a mut Cursor<Vec<u8>>,
    &'a mut Vec<u8>,
    &'a ProcessorContext,
    RequestContext,
) -> HandlerFuture<'a>;

/// One slot of the dispatch table.
pub struct DispatchEntry {
    /// Printable procedure name, used for tracing.
    pub name: &'static str,
    handler: HandlerFn,
}

macro_rules! handler_fn {
    ($f:path) => {{
        fn wrap<'a>(
            xid: u32,
            input: &'a mut Cursor<Vec<u8>>,
            output: &'a mut Vec<u8>,
            ctx: &'a ProcessorContext,
            req: RequestContext,
        ) -> HandlerFuture<'a> {
            Box::pin($f(xid, input, output, ctx, req))
        }
        wrap
    }};
}

macro_rules! proc_entry {
    ($name:literal, $f:path) => {
        DispatchEntry { name: $name, handler: handler_fn!($f) }
    };
}

/// The procedure table, indexed by NFSv3 procedure number 0..=21.
///
/// Procedures this server does not implement keep their slot (and their
/// printable name) but route to the shared procedure-unavailable handler.
static NFS3_PROCEDURES: [DispatchEntry; 22] = [
    proc_entry!("NULL", null::nfsproc3_null),
    proc_entry!("GETATTR", getattr::nfsproc3_getattr),
    proc_entry!("SETATTR", nfsproc3_unavailable),
    proc_entry!("LOOKUP", lookup::nfsproc3_lookup),
    proc_entry!("ACCESS", access::nfsproc3_access),
    proc_entry!("READLINK", readlink::nfsproc3_readlink),
    proc_entry!("READ", nfsproc3_unavailable),
    proc_entry!("WRITE", write::nfsproc3_write),
    proc_entry!("CREATE", create::nfsproc3_create),
    proc_entry!("MKDIR", mkdir::nfsproc3_mkdir),
    proc_entry!("SYMLINK", nfsproc3_unavailable),
    proc_entry!("MKNOD", nfsproc3_unavailable),
    proc_entry!("REMOVE", nfsproc3_unavailable),
    proc_entry!("RMDIR", nfsproc3_unavailable),
    proc_entry!("RENAME", nfsproc3_unavailable),
    proc_entry!("LINK", link::nfsproc3_link),
    proc_entry!("READDIR", nfsproc3_unavailable),
    proc_entry!("READDIRPLUS", nfsproc3_unavailable),
    proc_entry!("FSSTAT", fsstat::nfsproc3_fsstat),
    proc_entry!("FSINFO", fsinfo::nfsproc3_fsinfo),
    proc_entry!("PATHCONF", pathconf::nfsproc3_pathconf),
    proc_entry!("COMMIT", nfsproc3_unavailable),
];

/// Shared handler for procedures outside this server's profile: the reply
/// is the `PROC_UNAVAIL` prelude itself, with no NFS payload.
async fn nfsproc3_unavailable(
    xid: u32,
    _input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    _ctx: &ProcessorContext,
    _req: RequestContext,
) -> anyhow::Result<()> {
    rpc::proc_unavail_reply(xid).serialize(output)?;
    Ok(())
}

/// Routes one RPC call to its procedure handler.
///
/// The router writes the reply prelude itself only for structural
/// failures:
///
/// 1. wrong program number: `PROG_UNAVAIL`, done;
/// 2. wrong program version: `PROG_MISMATCH` followed by the `{3, 3}`
///    supported range, done;
/// 3. procedure number out of table range: `PROC_UNAVAIL`, done;
/// 4. otherwise the call is logged under [`STRACE_TARGET`] and the handler
///    invoked with a freshly built [`RequestContext`].
pub async fn dispatch_call(
    xid: u32,
    prog: u32,
    vers: u32,
    proc: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    credentials: Option<auth_unix>,
) -> anyhow::Result<()> {
    if prog != PROGRAM {
        rpc::prog_unavail_reply(xid).serialize(output)?;
        return Ok(());
    }
    if vers != VERSION {
        rpc::prog_mismatch_reply(xid, VERSION).serialize(output)?;
        return Ok(());
    }
    let Some(entry) = NFS3_PROCEDURES.get(proc as usize) else {
        rpc::proc_unavail_reply(xid).serialize(output)?;
        return Ok(());
    };
    trace!(target: "strace", "{}()", entry.name);
    let req = RequestContext::new(entry.name, credentials);
    (entry.handler)(xid, input, output, ctx, req).await
}
