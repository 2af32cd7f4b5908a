//! LINK procedure (procedure 15, RFC 1813 §3.3.15).
//!
//! Hard links are not supported by the exported filesystem model, so the
//! reply is always `NFS3ERR_NOTSUPP`. The file's attributes are still
//! probed and returned so the client's cache stays warm.

use std::io::Cursor;

use tracing::debug;

use crate::posix::post_op_attr_of;
use crate::xdr::nfs3::{nfsstat3, wcc_data, LINK3args, LINK3res, LINK3resfail};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_link(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let args = deserialize::<LINK3args>(input)?;
    debug!("nfsproc3_link({xid}, {args:?})");

    let file_attributes = post_op_attr_of(ctx.dispatcher.getattr(args.file.ino, &req).await);
    let res = LINK3res::Fail(
        nfsstat3::NFS3ERR_NOTSUPP,
        LINK3resfail { file_attributes, linkdir_wcc: wcc_data::default() },
    );
    res.serialize(output)?;
    Ok(())
}
