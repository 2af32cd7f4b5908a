//! GETATTR procedure (procedure 1, RFC 1813 §3.3.1).
//!
//! Retrieves the attributes of one filesystem object. Clients call this
//! constantly to validate their attribute caches, so the back-end path it
//! exercises should be the cheapest one available.

use std::io::Cursor;

use tracing::debug;

use crate::error::nfs_error_of;
use crate::posix::fattr3_of_stat;
use crate::xdr::nfs3::{nfs_fh3, GETATTR3res, GETATTR3resok};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_getattr(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let object = deserialize::<nfs_fh3>(input)?;
    debug!("nfsproc3_getattr({xid}, {object:?})");

    let res = match ctx.dispatcher.getattr(object.ino, &req).await {
        Ok(stat) => match fattr3_of_stat(&stat) {
            Ok(obj_attributes) => GETATTR3res::Ok(GETATTR3resok { obj_attributes }),
            Err(e) => GETATTR3res::Fail(nfs_error_of(&e)),
        },
        Err(e) => GETATTR3res::Fail(nfs_error_of(&e)),
    };
    res.serialize(output)?;
    Ok(())
}
