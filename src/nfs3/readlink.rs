//! READLINK procedure (procedure 5, RFC 1813 §3.3.5).
//!
//! Reads the target path stored in a symbolic link. The attribute probe
//! runs concurrently with the link read; both completions are consumed
//! before the reply goes out, and a failed probe only costs the reply its
//! attribute field.

use std::io::Cursor;

use tracing::debug;

use crate::error::nfs_error_of;
use crate::posix::post_op_attr_of;
use crate::xdr::nfs3::{nfs_fh3, READLINK3res, READLINK3resfail, READLINK3resok};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_readlink(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let symlink = deserialize::<nfs_fh3>(input)?;
    debug!("nfsproc3_readlink({xid}, {symlink:?})");

    let attr_probe = ctx.dispatcher.getattr(symlink.ino, &req);
    let read_link = ctx.dispatcher.readlink(symlink.ino, &req);
    let (target, attr_stat) = tokio::join!(read_link, attr_probe);
    let symlink_attributes = post_op_attr_of(attr_stat);

    let res = match target {
        Ok(data) => READLINK3res::Ok(READLINK3resok {
            symlink_attributes,
            data: data.into(),
        }),
        Err(e) => {
            READLINK3res::Fail(nfs_error_of(&e), READLINK3resfail { symlink_attributes })
        }
    };
    res.serialize(output)?;
    Ok(())
}
