//! WRITE procedure (procedure 7, RFC 1813 §3.3.7).
//!
//! Writes a byte range into a regular file. Clients occasionally send more
//! data than `count` covers; the excess is discarded before the back-end
//! sees it. The reply always claims `FILE_SYNC` stability with a zero
//! verifier: data is not synced to stable storage before the reply, so a
//! server restart during a burst of writes can lose acknowledged data.

use std::io::Cursor;

use tracing::debug;

use crate::error::nfs_error_of;
use crate::posix::wcc_data_of;
use crate::xdr::nfs3::{stable_how, WRITE3args, WRITE3res, WRITE3resfail, WRITE3resok};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

/// Write verifier reported to clients. Constant for now: restarts are not
/// detected through COMMIT on this server.
fn make_write_verf() -> u64 {
    0
}

pub async fn nfsproc3_write(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let mut args = deserialize::<WRITE3args>(input)?;
    debug!(
        "nfsproc3_write({xid}, {:?}, offset={}, count={})",
        args.file, args.offset, args.count
    );

    args.data.truncate(args.count as usize);

    let res = match ctx.dispatcher.write(args.file.ino, args.data, args.offset, &req).await {
        Ok(write_res) => {
            // A single WRITE transfers at most u32::MAX bytes, so the
            // byte count reported by the back-end must fit.
            debug_assert!(write_res.written <= u64::from(u32::MAX));
            WRITE3res::Ok(WRITE3resok {
                file_wcc: wcc_data_of(
                    write_res.pre_stat.as_ref(),
                    write_res.post_stat.as_ref(),
                ),
                count: write_res.written as u32,
                committed: stable_how::FILE_SYNC,
                verf: make_write_verf(),
            })
        }
        Err(e) => WRITE3res::Fail(nfs_error_of(&e), WRITE3resfail::default()),
    };
    res.serialize(output)?;
    Ok(())
}
