//! CREATE procedure (procedure 8, RFC 1813 §3.3.8).
//!
//! Creates a regular file. GUARDED creation is delegated to the back-end,
//! whose EEXIST surfaces as `NFS3ERR_EXIST`; EXCLUSIVE creation is not
//! supported and is refused with `NFS3ERR_NOTSUPP`.
//!
//! An UNCHECKED create that races an existing file succeeds with every
//! optional reply field absent, which forces the client to issue a LOOKUP
//! for the handle and attributes. Creating an existing file is rare enough
//! that the extra round trip does not matter.

use std::io::Cursor;

use tracing::{debug, warn};

use crate::error::nfs_error_of;
use crate::posix::{fattr3_of_stat, wcc_data_of};
use crate::xdr::nfs3::{
    createhow3, diropargs3, nfs_fh3, nfsstat3, CREATE3res, CREATE3resfail, CREATE3resok,
};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_create(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let where_ = deserialize::<diropargs3>(input)?;
    let how = deserialize::<createhow3>(input)?;
    debug!("nfsproc3_create({xid}, {where_:?}, {how:?})");

    let Some(attributes) = how.attributes() else {
        // Exclusive creation needs verifier bookkeeping this server does
        // not keep.
        let res =
            CREATE3res::Fail(nfsstat3::NFS3ERR_NOTSUPP, CREATE3resfail::default());
        res.serialize(output)?;
        return Ok(());
    };

    // Without an explicit mode, create the file the way a default umask of
    // 022 would.
    let mode = attributes.mode.unwrap_or(libc::S_IFREG as u32 | 0o644);
    let unchecked = matches!(how, createhow3::UNCHECKED(_));

    let res = match ctx.dispatcher.create(where_.dir.ino, &where_.name, mode, &req).await {
        Ok(create_res) => CREATE3res::Ok(CREATE3resok {
            obj: Some(nfs_fh3 { ino: create_res.ino }),
            obj_attributes: fattr3_of_stat(&create_res.stat).ok(),
            dir_wcc: wcc_data_of(
                create_res.pre_dir_stat.as_ref(),
                create_res.post_dir_stat.as_ref(),
            ),
        }),
        Err(e) if unchecked && e.is_eexist() => {
            warn!("unchecked file creation returned EEXIST");
            CREATE3res::Ok(CREATE3resok::default())
        }
        Err(e) => CREATE3res::Fail(nfs_error_of(&e), CREATE3resfail::default()),
    };
    res.serialize(output)?;
    Ok(())
}
