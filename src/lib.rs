//! NFS version 3 protocol front-end.
//!
//! This library lets a virtual filesystem be mounted by an unmodified
//! NFSv3 client kernel. It decodes ONC RPC requests encoded in XDR,
//! dispatches them to a pluggable back-end, and encodes XDR replies; the
//! back-end only ever sees inode numbers, POSIX-style metadata snapshots
//! and errno values, never the wire protocol.
//!
//! ## Main components
//!
//! - `dispatch`: the [`dispatch::NfsDispatcher`] trait a back-end
//!   implements to expose its filesystem, speaking in `stat`/`statfs`
//!   snapshots and errno-carrying failures.
//!
//! - `nfs3`: the request processor. A constant procedure table routes each
//!   call to its handler; handlers compose back-end calls with attribute
//!   probes and serialize one reply per request.
//!
//! - `posix`: pure conversions between POSIX metadata and the RFC 1813
//!   attribute shapes.
//!
//! - `error`: the back-end failure carrier and its total translation to
//!   `nfsstat3` status codes.
//!
//! - `xdr`: the XDR codec (RFC 4506) plus the ONC RPC (RFC 5531) and
//!   NFSv3 (RFC 1813) wire structures.
//!
//! - `transport`: TCP record-marking framing, per-connection processing,
//!   and retransmission suppression.
//!
//! - `server`: the [`server::Nfsd3`] façade tying the processor to the
//!   transport, with optional portmapper registration and a one-shot stop
//!   notification channel.
//!
//! ## Standards
//!
//! - RFC 1813: NFS Version 3 Protocol Specification
//! - RFC 5531: RPC: Remote Procedure Call Protocol Specification Version 2
//! - RFC 4506: XDR: External Data Representation Standard
//!
//! ## Profile
//!
//! The server implements the metadata and write paths of RFC 1813: NULL,
//! GETATTR, LOOKUP, ACCESS, READLINK, WRITE, CREATE, MKDIR, LINK, FSSTAT,
//! FSINFO and PATHCONF. The remaining procedures answer with the RPC-level
//! `PROC_UNAVAIL` status. Hard links and exclusive creation are rejected
//! with `NFS3ERR_NOTSUPP`.

pub mod dispatch;
pub mod error;
pub mod nfs3;
pub mod posix;
pub mod server;
pub mod transport;
pub mod xdr;
