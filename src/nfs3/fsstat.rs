//! FSSTAT procedure (procedure 18, RFC 1813 §3.3.18).
//!
//! Reports volatile filesystem statistics derived from the back-end's
//! statfs snapshot. The attribute probe for the filesystem root runs
//! after the statfs call and must complete before the reply is built, so
//! both arms of the reply carry whatever attributes were observable.

use std::io::Cursor;

use tracing::debug;

use crate::error::nfs_error_of;
use crate::posix::post_op_attr_of;
use crate::xdr::nfs3::{nfs_fh3, FSSTAT3res, FSSTAT3resfail, FSSTAT3resok};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_fsstat(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let fsroot = deserialize::<nfs_fh3>(input)?;
    debug!("nfsproc3_fsstat({xid}, {fsroot:?})");

    let statfs = ctx.dispatcher.statfs(fsroot.ino, &req).await;
    let obj_attributes = post_op_attr_of(ctx.dispatcher.getattr(fsroot.ino, &req).await);

    let res = match statfs {
        Ok(statfs) => FSSTAT3res::Ok(FSSTAT3resok {
            obj_attributes,
            tbytes: statfs.blocks.saturating_mul(statfs.bsize),
            fbytes: statfs.bfree.saturating_mul(statfs.bsize),
            abytes: statfs.bavail.saturating_mul(statfs.bsize),
            tfiles: statfs.files,
            ffiles: statfs.ffree,
            afiles: statfs.ffree,
            invarsec: 0,
        }),
        Err(e) => FSSTAT3res::Fail(nfs_error_of(&e), FSSTAT3resfail { obj_attributes }),
    };
    res.serialize(output)?;
    Ok(())
}
