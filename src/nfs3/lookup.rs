//! LOOKUP procedure (procedure 3, RFC 1813 §3.3.3).
//!
//! Translates a name within a directory into a file handle plus
//! attributes. The directory attribute probe is issued concurrently with
//! the name resolution, and both completions are consumed before the reply
//! is serialized. A failed directory probe degrades the directory
//! attributes to absent; it never fails the lookup itself.

use std::io::Cursor;

use tracing::debug;

use crate::error::{nfs_error_of, BackendResult};
use crate::posix::{fattr3_of_stat, post_op_attr_of, PosixStat};
use crate::xdr::nfs3::{
    diropargs3, fileid3, nfs_fh3, nfsstat3, LOOKUP3res, LOOKUP3resfail, LOOKUP3resok, NAME_MAX,
};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_lookup(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let what = deserialize::<diropargs3>(input)?;
    debug!("nfsproc3_lookup({xid}, {what:?})");

    let dirid = what.dir.ino;
    let dir_probe = ctx.dispatcher.getattr(dirid, &req);

    if what.name.len() > NAME_MAX {
        // Too long to resolve; still report the directory attributes the
        // probe managed to collect.
        let dir_attributes = post_op_attr_of(dir_probe.await);
        let res = LOOKUP3res::Fail(
            nfsstat3::NFS3ERR_NAMETOOLONG,
            LOOKUP3resfail { dir_attributes },
        );
        res.serialize(output)?;
        return Ok(());
    }

    let resolve = async {
        match what.name.as_ref() {
            b"." => {
                let stat = ctx.dispatcher.getattr(dirid, &req).await?;
                BackendResult::Ok((dirid, stat))
            }
            b".." => {
                let parent = ctx.dispatcher.get_parent(dirid, &req).await?;
                let stat = ctx.dispatcher.getattr(parent, &req).await?;
                Ok((parent, stat))
            }
            _ => ctx.dispatcher.lookup(dirid, &what.name, &req).await,
        }
    };

    let (resolved, dir_stat): (BackendResult<(fileid3, PosixStat)>, _) =
        tokio::join!(resolve, dir_probe);
    let dir_attributes = post_op_attr_of(dir_stat);

    let res = match resolved {
        Ok((ino, stat)) => match fattr3_of_stat(&stat) {
            Ok(attr) => LOOKUP3res::Ok(LOOKUP3resok {
                object: nfs_fh3 { ino },
                obj_attributes: Some(attr),
                dir_attributes,
            }),
            Err(e) => LOOKUP3res::Fail(nfs_error_of(&e), LOOKUP3resfail { dir_attributes }),
        },
        Err(e) => LOOKUP3res::Fail(nfs_error_of(&e), LOOKUP3resfail { dir_attributes }),
    };
    res.serialize(output)?;
    Ok(())
}
