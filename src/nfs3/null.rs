//! NULL procedure (procedure 0, RFC 1813 §3.3.0).
//!
//! Does no work; clients use it to ping the server and to validate
//! credentials. The reply is the SUCCESS prelude with no payload.

use std::io::Cursor;

use tracing::debug;

use crate::xdr::rpc;
use crate::xdr::Serialize;

use super::{ProcessorContext, RequestContext};

pub async fn nfsproc3_null(
    xid: u32,
    _input: &mut Cursor<Vec<u8>>,
    output: &mut Vec<u8>,
    _ctx: &ProcessorContext,
    _req: RequestContext,
) -> anyhow::Result<()> {
    debug!("nfsproc3_null({xid})");
    rpc::make_success_reply(xid).serialize(output)?;
    Ok(())
}
