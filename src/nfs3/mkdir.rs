//! MKDIR procedure (procedure 9, RFC 1813 §3.3.9).
//!
//! Creates a directory. Only the requested mode is honored from the
//! attribute set; ownership and timestamps in the request are ignored.
//! Creating `.` or `..` is refused up front with `NFS3ERR_EXIST`.

use std::io::Cursor;

use tracing::debug;

use crate::error::nfs_error_of;
use crate::posix::{fattr3_of_stat, wcc_data_of};
use crate::xdr::nfs3::{
    diropargs3, nfs_fh3, nfsstat3, sattr3, MKDIR3res, MKDIR3resfail, MKDIR3resok,
};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_mkdir(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let where_ = deserialize::<diropargs3>(input)?;
    let attributes = deserialize::<sattr3>(input)?;
    debug!("nfsproc3_mkdir({xid}, {where_:?}, {attributes:?})");

    if where_.name.as_ref() == b"." || where_.name.as_ref() == b".." {
        let res = MKDIR3res::Fail(nfsstat3::NFS3ERR_EXIST, MKDIR3resfail::default());
        res.serialize(output)?;
        return Ok(());
    }

    // Without an explicit mode, make the directory writable by the owner,
    // readable by the group and traversable by others.
    let mode = attributes.mode.unwrap_or(libc::S_IFDIR as u32 | 0o751);

    let res = match ctx.dispatcher.mkdir(where_.dir.ino, &where_.name, mode, &req).await {
        Ok(mkdir_res) => MKDIR3res::Ok(MKDIR3resok {
            obj: Some(nfs_fh3 { ino: mkdir_res.ino }),
            obj_attributes: fattr3_of_stat(&mkdir_res.stat).ok(),
            dir_wcc: wcc_data_of(
                mkdir_res.pre_dir_stat.as_ref(),
                mkdir_res.post_dir_stat.as_ref(),
            ),
        }),
        Err(e) => MKDIR3res::Fail(nfs_error_of(&e), MKDIR3resfail::default()),
    };
    res.serialize(output)?;
    Ok(())
}
