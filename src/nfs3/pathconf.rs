//! PATHCONF procedure (procedure 20, RFC 1813 §3.3.20).
//!
//! Reports the POSIX pathconf values of the export. Everything is static
//! except case sensitivity, which reflects the flag the processor was
//! constructed with.

use std::io::Cursor;

use tracing::debug;

use crate::xdr::nfs3::{nfs_fh3, PATHCONF3res, PATHCONF3resok, NAME_MAX};
use crate::xdr::{deserialize, rpc, Serialize};

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_pathconf(
    xid: u32,
    input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    ctx: &ProcessorContext,
    _req: RequestContext,
) -> anyhow::Result<()> {
    rpc::make_success_reply(xid).serialize(output)?;

    let object = deserialize::<nfs_fh3>(input)?;
    debug!("nfsproc3_pathconf({xid}, {object:?})");

    let res = PATHCONF3res::Ok(PATHCONF3resok {
        obj_attributes: None,
        linkmax: 0,
        name_max: NAME_MAX as u32,
        no_trunc: true,
        chown_restricted: true,
        case_insensitive: !ctx.case_sensitive,
        case_preserving: true,
    });
    res.serialize(output)?;
    Ok(())
}
