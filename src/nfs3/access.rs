//! ACCESS procedure (procedure 4, RFC 1813 §3.3.4).
//!
//! Reports which of the requested access rights the caller actually holds
//! on an object, so clients can cache permissions instead of probing with
//! failing operations. Rights are derived from the AUTH_UNIX credentials
//! and the object's ownership; a call presenting no credentials gets the
//! requested mask back unchanged.

use std::io::Cursor;

use tracing::debug;

use crate::error::nfs_error_of;
use crate::posix::{fattr3_of_stat, PosixStat};
use crate::xdr::nfs3::{
    nfs_fh3, ACCESS3res, ACCESS3resfail, ACCESS3resok, ACCESS3_DELETE, ACCESS3_EXECUTE,
    ACCESS3_EXTEND, ACCESS3_LOOKUP, ACCESS3_MODIFY, ACCESS3_READ,
};
use crate::xdr::rpc::auth_unix;
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

/// Computes the rights the caller effectively holds, as the intersection
/// of the desired mask with what the object's permission triple grants.
///
/// The caller is matched against the owner, then the group (primary or
/// supplementary), then everyone else. Root sees every right. The POSIX
/// read bit grants READ; the write bit grants MODIFY, EXTEND and DELETE;
/// the execute bit grants EXECUTE and, on directories, LOOKUP.
fn effective_access_rights(stat: &PosixStat, desired: u32, creds: Option<&auth_unix>) -> u32 {
    let Some(creds) = creds else {
        // AUTH_NONE: nothing to derive rights from.
        return desired;
    };
    if creds.uid == 0 {
        return desired;
    }

    let triple = if creds.uid == stat.uid {
        (stat.mode >> 6) & 0o7
    } else if creds.gid == stat.gid || creds.gids.contains(&stat.gid) {
        (stat.mode >> 3) & 0o7
    } else {
        stat.mode & 0o7
    };

    let mut granted = 0;
    if triple & 0o4 != 0 {
        granted |= ACCESS3_READ;
    }
    if triple & 0o2 != 0 {
        granted |= ACCESS3_MODIFY | ACCESS3_EXTEND | ACCESS3_DELETE;
    }
    if triple & 0o1 != 0 {
        granted |= ACCESS3_EXECUTE | ACCESS3_LOOKUP;
    }
    desired & granted
}

pub async fn nfsproc3_access(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let object = deserialize::<nfs_fh3>(input)?;
    let desired = deserialize::<u32>(input)?;
    debug!("nfsproc3_access({xid}, {object:?}, {desired:#x})");

    let res = match ctx.dispatcher.getattr(object.ino, &req).await {
        Ok(stat) => {
            let access = effective_access_rights(&stat, desired, req.credentials.as_ref());
            ACCESS3res::Ok(ACCESS3resok {
                obj_attributes: fattr3_of_stat(&stat).ok(),
                access,
            })
        }
        Err(e) => {
            ACCESS3res::Fail(nfs_error_of(&e), ACCESS3resfail { obj_attributes: None })
        }
    };
    res.serialize(output)?;
    Ok(())
}
