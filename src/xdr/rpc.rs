//! ONC RPC message structures as defined in RFC 5531.
//!
//! Only the pieces a server needs are modeled: decoding CALL messages and
//! building REPLY messages. The reply constructors at the bottom of this
//! module produce the accept-status prelude that every NFS reply starts
//! with; the procedure-specific payload is appended after it.

// Keep the RFC naming conventions for consistency with the specification.
#![allow(non_camel_case_types)]
#![allow(clippy::upper_case_acronyms)]

use std::io::{Read, Write};

use num_derive::{FromPrimitive, ToPrimitive};

use super::{deserialize, invalid_data, Deserialize, Serialize, XdrEnum, XdrStruct};

/// The RPC protocol version spoken by this implementation.
pub const RPC_VERSION: u32 = 2;

/// Authentication flavor identifiers (RFC 5531 section 8.2).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, FromPrimitive, ToPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum auth_flavor {
    /// No authentication.
    #[default]
    AUTH_NONE = 0,
    /// UNIX-style uid/gid authentication (also called AUTH_SYS).
    AUTH_UNIX = 1,
    /// Short-form authentication.
    AUTH_SHORT = 2,
    /// DES authentication.
    AUTH_DES = 3,
}
XdrEnum!(auth_flavor);

/// Why an authentication attempt was rejected (RFC 5531 section 9).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum auth_stat {
    #[default]
    AUTH_BADCRED = 1,
    AUTH_REJECTEDCRED = 2,
    AUTH_BADVERF = 3,
    AUTH_REJECTEDVERF = 4,
    AUTH_TOOWEAK = 5,
}
XdrEnum!(auth_stat);

/// An authentication field: the flavor plus flavor-specific opaque bytes.
///
/// CALL messages carry two of these (credentials and verifier), REPLY
/// messages carry one (the server's verifier).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct opaque_auth {
    pub flavor: auth_flavor,
    pub body: Vec<u8>,
}
XdrStruct!(opaque_auth, flavor, body);

/// AUTH_UNIX (AUTH_SYS) credential body, decoded from
/// [`opaque_auth::body`] when the flavor is [`auth_flavor::AUTH_UNIX`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct auth_unix {
    /// Arbitrary client-chosen stamp.
    pub stamp: u32,
    /// Name of the caller's machine.
    pub machinename: Vec<u8>,
    /// Effective user id of the caller.
    pub uid: u32,
    /// Effective group id of the caller.
    pub gid: u32,
    /// Supplementary group ids.
    pub gids: Vec<u32>,
}
XdrStruct!(auth_unix, stamp, machinename, uid, gid, gids);

/// Supported program version range, returned with `PROG_MISMATCH`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct mismatch_info {
    pub low: u32,
    pub high: u32,
}
XdrStruct!(mismatch_info, low, high);

/// A complete RPC message: the transaction id followed by a call or reply
/// body. The xid is echoed verbatim in the reply so the client can match
/// responses to outstanding requests; it is not a sequence number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct rpc_msg {
    pub xid: u32,
    pub body: rpc_body,
}
XdrStruct!(rpc_msg, xid, body);

/// Discriminated body of an RPC message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum rpc_body {
    CALL(call_body),
    REPLY(reply_body),
}

impl Default for rpc_body {
    fn default() -> rpc_body {
        rpc_body::CALL(call_body::default())
    }
}

impl Serialize for rpc_body {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            rpc_body::CALL(v) => {
                0_u32.serialize(dest)?;
                v.serialize(dest)
            }
            rpc_body::REPLY(v) => {
                1_u32.serialize(dest)?;
                v.serialize(dest)
            }
        }
    }
}

impl Deserialize for rpc_body {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = rpc_body::CALL(deserialize(src)?),
            1 => *self = rpc_body::REPLY(deserialize(src)?),
            other => return Err(invalid_data(format!("invalid rpc message type: {other}"))),
        }
        Ok(())
    }
}

/// Body of an RPC call: protocol version, target program, program version,
/// procedure number and the two authentication fields. The procedure
/// arguments follow on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct call_body {
    pub rpcvers: u32,
    pub prog: u32,
    pub vers: u32,
    pub proc: u32,
    pub cred: opaque_auth,
    pub verf: opaque_auth,
}
XdrStruct!(call_body, rpcvers, prog, vers, proc, cred, verf);

/// Body of an RPC reply: the call was either accepted or denied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum reply_body {
    MSG_ACCEPTED(accepted_reply),
    MSG_DENIED(rejected_reply),
}

impl Default for reply_body {
    fn default() -> reply_body {
        reply_body::MSG_ACCEPTED(accepted_reply::default())
    }
}

impl Serialize for reply_body {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            reply_body::MSG_ACCEPTED(v) => {
                0_u32.serialize(dest)?;
                v.serialize(dest)
            }
            reply_body::MSG_DENIED(v) => {
                1_u32.serialize(dest)?;
                v.serialize(dest)
            }
        }
    }
}

impl Deserialize for reply_body {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = reply_body::MSG_ACCEPTED(deserialize(src)?),
            1 => *self = reply_body::MSG_DENIED(deserialize(src)?),
            other => return Err(invalid_data(format!("invalid reply status: {other}"))),
        }
        Ok(())
    }
}

/// An accepted reply. Acceptance does not imply success: the accept-status
/// union distinguishes a successful call from structural failures such as
/// an unknown program or procedure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct accepted_reply {
    /// Verifier the server sends to validate itself to the client.
    pub verf: opaque_auth,
    pub reply_data: accept_body,
}
XdrStruct!(accepted_reply, verf, reply_data);

/// Accept-status union of an accepted reply.
///
/// `SUCCESS` is followed on the wire by the procedure-specific results;
/// the error arms carry no payload except `PROG_MISMATCH`, which reports
/// the supported version range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(u32)]
pub enum accept_body {
    /// The procedure was executed; its results follow.
    #[default]
    SUCCESS,
    /// The program is not exported by this server.
    PROG_UNAVAIL,
    /// The program version is not supported.
    PROG_MISMATCH(mismatch_info),
    /// The procedure number is not implemented.
    PROC_UNAVAIL,
    /// The procedure arguments could not be decoded.
    GARBAGE_ARGS,
}

impl Serialize for accept_body {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            accept_body::SUCCESS => 0_u32.serialize(dest),
            accept_body::PROG_UNAVAIL => 1_u32.serialize(dest),
            accept_body::PROG_MISMATCH(v) => {
                2_u32.serialize(dest)?;
                v.serialize(dest)
            }
            accept_body::PROC_UNAVAIL => 3_u32.serialize(dest),
            accept_body::GARBAGE_ARGS => 4_u32.serialize(dest),
        }
    }
}

impl Deserialize for accept_body {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = accept_body::SUCCESS,
            1 => *self = accept_body::PROG_UNAVAIL,
            2 => *self = accept_body::PROG_MISMATCH(deserialize(src)?),
            3 => *self = accept_body::PROC_UNAVAIL,
            4 => *self = accept_body::GARBAGE_ARGS,
            other => return Err(invalid_data(format!("invalid accept stat: {other}"))),
        }
        Ok(())
    }
}

/// A denied reply: either the RPC version itself was unacceptable or the
/// caller failed authentication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum rejected_reply {
    RPC_MISMATCH(mismatch_info),
    AUTH_ERROR(auth_stat),
}

impl Default for rejected_reply {
    fn default() -> rejected_reply {
        rejected_reply::AUTH_ERROR(auth_stat::default())
    }
}

impl Serialize for rejected_reply {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            rejected_reply::RPC_MISMATCH(v) => {
                0_u32.serialize(dest)?;
                v.serialize(dest)
            }
            rejected_reply::AUTH_ERROR(v) => {
                1_u32.serialize(dest)?;
                v.serialize(dest)
            }
        }
    }
}

impl Deserialize for rejected_reply {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = rejected_reply::RPC_MISMATCH(deserialize(src)?),
            1 => *self = rejected_reply::AUTH_ERROR(deserialize(src)?),
            other => return Err(invalid_data(format!("invalid reject stat: {other}"))),
        }
        Ok(())
    }
}

fn accepted(xid: u32, reply_data: accept_body) -> rpc_msg {
    rpc_msg {
        xid,
        body: rpc_body::REPLY(reply_body::MSG_ACCEPTED(accepted_reply {
            verf: opaque_auth::default(),
            reply_data,
        })),
    }
}

/// Builds the `SUCCESS` reply prelude; the procedure payload follows it.
pub fn make_success_reply(xid: u32) -> rpc_msg {
    accepted(xid, accept_body::SUCCESS)
}

/// Builds a `PROC_UNAVAIL` reply for an unimplemented procedure.
pub fn proc_unavail_reply(xid: u32) -> rpc_msg {
    accepted(xid, accept_body::PROC_UNAVAIL)
}

/// Builds a `PROG_UNAVAIL` reply for an unknown program number.
pub fn prog_unavail_reply(xid: u32) -> rpc_msg {
    accepted(xid, accept_body::PROG_UNAVAIL)
}

/// Builds a `PROG_MISMATCH` reply advertising `accepted_vers` as both the
/// lowest and highest supported program version.
pub fn prog_mismatch_reply(xid: u32, accepted_vers: u32) -> rpc_msg {
    accepted(
        xid,
        accept_body::PROG_MISMATCH(mismatch_info { low: accepted_vers, high: accepted_vers }),
    )
}

/// Builds a denied reply for a caller speaking the wrong RPC version.
pub fn rpc_vers_mismatch_reply(xid: u32) -> rpc_msg {
    rpc_msg {
        xid,
        body: rpc_body::REPLY(reply_body::MSG_DENIED(rejected_reply::RPC_MISMATCH(
            mismatch_info { low: RPC_VERSION, high: RPC_VERSION },
        ))),
    }
}
