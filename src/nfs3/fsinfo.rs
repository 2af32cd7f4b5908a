//! FSINFO procedure (procedure 19, RFC 1813 §3.3.19).
//!
//! Advertises the server's static transfer parameters. The values are
//! fixed: one-mebibyte reads and writes with no alignment preference,
//! unbounded file sizes, nanosecond timestamp granularity, and symlink
//! support without hard links.

use std::io::Cursor;

use tracing::debug;

use crate::xdr::nfs3::{
    nfs_fh3, nfstime3, FSF_CANSETTIME, FSF_HOMOGENEOUS, FSF_SYMLINK, FSINFO3res, FSINFO3resok,
};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_fsinfo(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    _ctx: &ProcessorContext,
    _req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let fsroot = deserialize::<nfs_fh3>(input)?;
    debug!("nfsproc3_fsinfo({xid}, {fsroot:?})");

    const MEBIBYTE: u32 = 1024 * 1024;
    let res = FSINFO3res::Ok(FSINFO3resok {
        obj_attributes: None,
        rtmax: MEBIBYTE,
        rtpref: MEBIBYTE,
        rtmult: 1,
        wtmax: MEBIBYTE,
        wtpref: MEBIBYTE,
        wtmult: 1,
        dtpref: MEBIBYTE,
        maxfilesize: u64::MAX,
        time_delta: nfstime3 { seconds: 0, nseconds: 1 },
        properties: FSF_SYMLINK | FSF_HOMOGENEOUS | FSF_CANSETTIME,
    });
    res.serialize(output)?;
    Ok(())
}
