//! End-to-end processor tests: a serialized call goes through the router
//! and the reply bytes are decoded with the partner codec.

mod support;

use std::io::Cursor;
use std::sync::Arc;

use nfs_bridge::dispatch::{CreateRes, WriteRes};
use nfs_bridge::error::BackendError;
use nfs_bridge::nfs3::{dispatch_call, ProcessorContext, PROGRAM, VERSION};
use nfs_bridge::xdr::nfs3::{
    self, createhow3, diropargs3, nfs_fh3, nfsstat3, sattr3, stable_how, ACCESS3res,
    CREATE3res, FSINFO3res, FSSTAT3res, GETATTR3res, LINK3args, LINK3res, LOOKUP3res,
    MKDIR3res, PATHCONF3res, READLINK3res, WRITE3args, WRITE3res,
};
use nfs_bridge::xdr::rpc::{self, accept_body, auth_unix, reply_body, rpc_body};
use nfs_bridge::xdr::{deserialize, Serialize};

use support::{dir_stat, file_stat, StubDispatcher};

const XID: u32 = 0x5eed;

fn context(dispatcher: StubDispatcher) -> ProcessorContext {
    ProcessorContext { dispatcher: Arc::new(dispatcher), case_sensitive: true }
}

fn serialize_args(parts: &[&dyn DynSerialize]) -> Vec<u8> {
    let mut buf = Vec::new();
    for part in parts {
        part.serialize_into(&mut buf);
    }
    buf
}

/// Object-safe serialization shim so argument lists mix types.
trait DynSerialize {
    fn serialize_into(&self, buf: &mut Vec<u8>);
}

impl<T: Serialize> DynSerialize for T {
    fn serialize_into(&self, buf: &mut Vec<u8>) {
        self.serialize(buf).expect("serialize args");
    }
}

async fn call_raw(
    ctx: &ProcessorContext,
    prog: u32,
    vers: u32,
    proc: u32,
    args: Vec<u8>,
    credentials: Option<auth_unix>,
) -> Vec<u8> {
    let mut input = Cursor::new(args);
    let mut output = Vec::new();
    dispatch_call(XID, prog, vers, proc, &mut input, &mut output, ctx, credentials)
        .await
        .expect("dispatch");
    output
}

async fn call(ctx: &ProcessorContext, proc: u32, args: Vec<u8>) -> Vec<u8> {
    call_raw(ctx, PROGRAM, VERSION, proc, args, None).await
}

/// Splits a reply buffer into its RPC prelude and the payload cursor.
fn parse_reply(buf: &[u8]) -> (rpc::rpc_msg, Cursor<&[u8]>) {
    let mut cursor = Cursor::new(buf);
    let msg = deserialize::<rpc::rpc_msg>(&mut cursor).expect("parse rpc reply");
    (msg, cursor)
}

fn accept_stat(msg: &rpc::rpc_msg) -> accept_body {
    assert_eq!(msg.xid, XID);
    match &msg.body {
        rpc_body::REPLY(reply_body::MSG_ACCEPTED(accepted)) => accepted.reply_data.clone(),
        other => panic!("expected accepted reply, got {other:?}"),
    }
}

fn serialized(msg: rpc::rpc_msg) -> Vec<u8> {
    let mut buf = Vec::new();
    msg.serialize(&mut buf).expect("serialize");
    buf
}

#[tokio::test]
async fn null_reply_is_bare_success_prelude() {
    let ctx = context(StubDispatcher::default());
    let reply = call(&ctx, 0, Vec::new()).await;
    assert_eq!(reply, serialized(rpc::make_success_reply(XID)));
}

#[tokio::test]
async fn wrong_program_replies_prog_unavail() {
    let ctx = context(StubDispatcher::default());
    let reply = call_raw(&ctx, 100005, VERSION, 0, Vec::new(), None).await;
    assert_eq!(reply, serialized(rpc::prog_unavail_reply(XID)));
}

#[tokio::test]
async fn wrong_version_replies_prog_mismatch() {
    let ctx = context(StubDispatcher::default());
    let reply = call_raw(&ctx, PROGRAM, 2, 0, Vec::new(), None).await;
    // The mismatch info is exactly eight bytes encoding {low: 3, high: 3}.
    assert_eq!(reply, serialized(rpc::prog_mismatch_reply(XID, VERSION)));
    assert_eq!(&reply[reply.len() - 8..], [0, 0, 0, 3, 0, 0, 0, 3]);
    let (msg, _) = parse_reply(&reply);
    match accept_stat(&msg) {
        accept_body::PROG_MISMATCH(info) => {
            assert_eq!(info.low, VERSION);
            assert_eq!(info.high, VERSION);
        }
        other => panic!("expected PROG_MISMATCH, got {other:?}"),
    }
}

#[tokio::test]
async fn out_of_range_procedures_reply_proc_unavail() {
    let ctx = context(StubDispatcher::default());
    for proc in [22, 23, 100, u32::MAX] {
        let reply = call(&ctx, proc, Vec::new()).await;
        assert_eq!(reply, serialized(rpc::proc_unavail_reply(XID)));
    }
}

#[tokio::test]
async fn every_table_slot_dispatches() {
    let unavailable = [2, 6, 10, 11, 12, 13, 14, 16, 17, 21];
    for proc in 0..22 {
        let ctx = context(StubDispatcher::default());
        let fh = nfs_fh3 { ino: 1 };
        let dirops = diropargs3 { dir: fh, name: b"x".as_slice().into() };
        let args = match proc {
            0 => Vec::new(),
            3 => serialize_args(&[&dirops]),
            4 => serialize_args(&[&fh, &0x3f_u32]),
            7 => serialize_args(&[&WRITE3args::default()]),
            8 => serialize_args(&[&dirops, &createhow3::default()]),
            9 => serialize_args(&[&dirops, &sattr3::default()]),
            15 => serialize_args(&[&LINK3args::default()]),
            _ => serialize_args(&[&fh]),
        };
        let reply = call(&ctx, proc, args).await;
        let (msg, _) = parse_reply(&reply);
        let stat = accept_stat(&msg);
        if unavailable.contains(&proc) {
            assert_eq!(reply, serialized(rpc::proc_unavail_reply(XID)), "proc {proc}");
        } else {
            assert_eq!(stat, accept_body::SUCCESS, "proc {proc}");
        }
    }
}

#[tokio::test]
async fn getattr_maps_stat_snapshot() {
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_stat(9, file_stat(9, 4096));
    let ctx = context(dispatcher);

    let reply = call(&ctx, 1, serialize_args(&[&nfs_fh3 { ino: 9 }])).await;
    let (msg, mut payload) = parse_reply(&reply);
    assert_eq!(accept_stat(&msg), accept_body::SUCCESS);
    let res = deserialize::<GETATTR3res>(&mut payload).expect("getattr res");
    let GETATTR3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    let attr = resok.obj_attributes;
    assert_eq!(attr.ftype, nfs3::ftype3::NF3REG);
    assert_eq!(attr.fileid, 9);
    assert_eq!(attr.fsid, 11);
    assert_eq!(attr.size, 4096);
    assert_eq!(attr.used, 8 * 512);
    assert_eq!(attr.mode, 0o644);
    assert_eq!(attr.mtime.seconds, 1_700_000_100);
    assert_eq!(attr.mtime.nseconds, 500);
}

#[tokio::test]
async fn getattr_timeout_maps_to_jukebox() {
    let dispatcher = StubDispatcher::default();
    dispatcher.fail_stat(9, BackendError::Timeout);
    let ctx = context(dispatcher);

    let reply = call(&ctx, 1, serialize_args(&[&nfs_fh3 { ino: 9 }])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<GETATTR3res>(&mut payload).expect("getattr res");
    assert_eq!(res, GETATTR3res::Fail(nfsstat3::NFS3ERR_JUKEBOX));
}

#[tokio::test]
async fn lookup_dot_resolves_to_directory_itself() {
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_stat(42, dir_stat(42, 4096));
    let ctx = context(dispatcher);

    let args = diropargs3 { dir: nfs_fh3 { ino: 42 }, name: b".".as_slice().into() };
    let reply = call(&ctx, 3, serialize_args(&[&args])).await;
    let (msg, mut payload) = parse_reply(&reply);
    assert_eq!(accept_stat(&msg), accept_body::SUCCESS);
    let res = deserialize::<LOOKUP3res>(&mut payload).expect("lookup res");
    let LOOKUP3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.object.ino, 42);
    assert_eq!(resok.obj_attributes.expect("obj attrs").fileid, 42);
    assert_eq!(resok.obj_attributes.expect("obj attrs").size, 4096);
    assert_eq!(resok.dir_attributes.expect("dir attrs").fileid, 42);
}

#[tokio::test]
async fn lookup_dotdot_resolves_through_parent() {
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_stat(42, dir_stat(42, 4096));
    dispatcher.insert_stat(41, dir_stat(41, 2048));
    dispatcher.insert_parent(42, 41);
    let ctx = context(dispatcher);

    let args = diropargs3 { dir: nfs_fh3 { ino: 42 }, name: b"..".as_slice().into() };
    let reply = call(&ctx, 3, serialize_args(&[&args])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<LOOKUP3res>(&mut payload).expect("lookup res");
    let LOOKUP3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.object.ino, 41);
    assert_eq!(resok.obj_attributes.expect("obj attrs").fileid, 41);
    assert_eq!(resok.dir_attributes.expect("dir attrs").fileid, 42);
}

#[tokio::test]
async fn lookup_oversized_name_is_too_long() {
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_stat(42, dir_stat(42, 4096));
    let ctx = context(dispatcher);

    let name = vec![b'a'; 300];
    let args = diropargs3 { dir: nfs_fh3 { ino: 42 }, name: name.into() };
    let reply = call(&ctx, 3, serialize_args(&[&args])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<LOOKUP3res>(&mut payload).expect("lookup res");
    let LOOKUP3res::Fail(stat, resfail) = res else {
        panic!("expected failure, got {res:?}");
    };
    assert_eq!(stat, nfsstat3::NFS3ERR_NAMETOOLONG);
    assert_eq!(resfail.dir_attributes.expect("dir attrs").fileid, 42);
}

#[tokio::test]
async fn lookup_survives_failed_directory_probe() {
    // The primary resolution succeeds while the directory attribute probe
    // fails: the reply is OK with absent directory attributes.
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_lookup(42, b"file", 43, file_stat(43, 10));
    let ctx = context(dispatcher);

    let args = diropargs3 { dir: nfs_fh3 { ino: 42 }, name: b"file".as_slice().into() };
    let reply = call(&ctx, 3, serialize_args(&[&args])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<LOOKUP3res>(&mut payload).expect("lookup res");
    let LOOKUP3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.object.ino, 43);
    assert!(resok.obj_attributes.is_some());
    assert_eq!(resok.dir_attributes, None);
}

#[tokio::test]
async fn access_without_credentials_echoes_desired_mask() {
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_stat(5, file_stat(5, 1));
    let ctx = context(dispatcher);

    let desired = nfs3::ACCESS3_READ | nfs3::ACCESS3_MODIFY;
    let reply = call(&ctx, 4, serialize_args(&[&nfs_fh3 { ino: 5 }, &desired])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<ACCESS3res>(&mut payload).expect("access res");
    let ACCESS3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.access, desired);
    assert!(resok.obj_attributes.is_some());
}

#[tokio::test]
async fn access_intersects_with_owner_permissions() {
    // Owner of a 0644 file: read bits grant READ, no write or exec bits
    // survive the intersection.
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_stat(5, file_stat(5, 1));
    let ctx = context(dispatcher);

    let creds = auth_unix { uid: 1000, gid: 1000, ..Default::default() };
    let desired = nfs3::ACCESS3_READ | nfs3::ACCESS3_EXECUTE | nfs3::ACCESS3_MODIFY;
    let args = serialize_args(&[&nfs_fh3 { ino: 5 }, &desired]);
    let reply = call_raw(&ctx, PROGRAM, VERSION, 4, args, Some(creds)).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<ACCESS3res>(&mut payload).expect("access res");
    let ACCESS3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.access, nfs3::ACCESS3_READ | nfs3::ACCESS3_MODIFY);
}

#[tokio::test]
async fn access_probe_failure_reports_absent_attrs() {
    let ctx = context(StubDispatcher::default());
    let reply = call(&ctx, 4, serialize_args(&[&nfs_fh3 { ino: 5 }, &1_u32])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<ACCESS3res>(&mut payload).expect("access res");
    let ACCESS3res::Fail(stat, resfail) = res else {
        panic!("expected failure, got {res:?}");
    };
    assert_eq!(stat, nfsstat3::NFS3ERR_NOENT);
    assert_eq!(resfail.obj_attributes, None);
}

#[tokio::test]
async fn readlink_survives_failed_attr_probe() {
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_readlink(6, b"target/path");
    let ctx = context(dispatcher);

    let reply = call(&ctx, 5, serialize_args(&[&nfs_fh3 { ino: 6 }])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<READLINK3res>(&mut payload).expect("readlink res");
    let READLINK3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.data.as_ref(), b"target/path");
    assert_eq!(resok.symlink_attributes, None);
}

#[tokio::test]
async fn write_reports_file_sync_and_wcc_bracket() {
    let dispatcher = StubDispatcher::default();
    *dispatcher.write_result.lock().unwrap() = Some(Ok(WriteRes {
        written: 1024,
        pre_stat: Some(file_stat(5, 0)),
        post_stat: Some(file_stat(5, 1024)),
    }));
    let ctx = context(dispatcher);

    let args = WRITE3args {
        file: nfs_fh3 { ino: 5 },
        offset: 0,
        count: 1024,
        stable: stable_how::UNSTABLE,
        data: vec![7; 1024],
    };
    let reply = call(&ctx, 7, serialize_args(&[&args])).await;
    let (msg, mut payload) = parse_reply(&reply);
    assert_eq!(accept_stat(&msg), accept_body::SUCCESS);
    let res = deserialize::<WRITE3res>(&mut payload).expect("write res");
    let WRITE3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.count, 1024);
    assert_eq!(resok.committed, stable_how::FILE_SYNC);
    assert_eq!(resok.verf, 0);
    assert_eq!(resok.file_wcc.before.expect("pre attrs").size, 0);
    assert_eq!(resok.file_wcc.after.expect("post attrs").size, 1024);
}

#[tokio::test]
async fn write_truncates_data_beyond_count() {
    // Four trailing bytes beyond count must be discarded before the
    // back-end sees the buffer.
    let dispatcher = StubDispatcher::default();
    *dispatcher.write_result.lock().unwrap() = Some(Ok(WriteRes {
        written: 8,
        pre_stat: None,
        post_stat: None,
    }));
    let ctx = context(dispatcher);

    let args = WRITE3args {
        file: nfs_fh3 { ino: 5 },
        offset: 0,
        count: 8,
        stable: stable_how::UNSTABLE,
        data: vec![1; 12],
    };
    let reply = call(&ctx, 7, serialize_args(&[&args])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<WRITE3res>(&mut payload).expect("write res");
    let WRITE3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.count, 8);
    assert_eq!(resok.file_wcc.before, None);
    assert_eq!(resok.file_wcc.after, None);
}

#[tokio::test]
async fn unchecked_create_on_existing_file_succeeds_empty() {
    let dispatcher = StubDispatcher::default();
    *dispatcher.create_result.lock().unwrap() = Some(Err(BackendError::Sys(libc::EEXIST)));
    let ctx = context(dispatcher);

    let dirops = diropargs3 { dir: nfs_fh3 { ino: 42 }, name: b"existing".as_slice().into() };
    let how = createhow3::UNCHECKED(sattr3::default());
    let reply = call(&ctx, 8, serialize_args(&[&dirops, &how])).await;
    let (msg, mut payload) = parse_reply(&reply);
    assert_eq!(accept_stat(&msg), accept_body::SUCCESS);
    let res = deserialize::<CREATE3res>(&mut payload).expect("create res");
    let CREATE3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.obj, None);
    assert_eq!(resok.obj_attributes, None);
    assert_eq!(resok.dir_wcc.before, None);
    assert_eq!(resok.dir_wcc.after, None);
}

#[tokio::test]
async fn guarded_create_on_existing_file_fails_exist() {
    let dispatcher = StubDispatcher::default();
    *dispatcher.create_result.lock().unwrap() = Some(Err(BackendError::Sys(libc::EEXIST)));
    let ctx = context(dispatcher);

    let dirops = diropargs3 { dir: nfs_fh3 { ino: 42 }, name: b"existing".as_slice().into() };
    let how = createhow3::GUARDED(sattr3::default());
    let reply = call(&ctx, 8, serialize_args(&[&dirops, &how])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<CREATE3res>(&mut payload).expect("create res");
    let CREATE3res::Fail(stat, _) = res else {
        panic!("expected failure, got {res:?}");
    };
    assert_eq!(stat, nfsstat3::NFS3ERR_EXIST);
}

#[tokio::test]
async fn exclusive_create_is_unsupported() {
    let ctx = context(StubDispatcher::default());
    let dirops = diropargs3 { dir: nfs_fh3 { ino: 42 }, name: b"f".as_slice().into() };
    let how = createhow3::EXCLUSIVE([0; 8]);
    let reply = call(&ctx, 8, serialize_args(&[&dirops, &how])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<CREATE3res>(&mut payload).expect("create res");
    let CREATE3res::Fail(stat, resfail) = res else {
        panic!("expected failure, got {res:?}");
    };
    assert_eq!(stat, nfsstat3::NFS3ERR_NOTSUPP);
    assert_eq!(resfail.dir_wcc.before, None);
    assert_eq!(resfail.dir_wcc.after, None);
}

#[tokio::test]
async fn create_returns_handle_attrs_and_dir_bracket() {
    let dispatcher = StubDispatcher::default();
    *dispatcher.create_result.lock().unwrap() = Some(Ok(CreateRes {
        ino: 77,
        stat: file_stat(77, 0),
        pre_dir_stat: Some(dir_stat(42, 4096)),
        post_dir_stat: Some(dir_stat(42, 4608)),
    }));
    let ctx = context(dispatcher);

    let dirops = diropargs3 { dir: nfs_fh3 { ino: 42 }, name: b"fresh".as_slice().into() };
    let how = createhow3::UNCHECKED(sattr3::default());
    let reply = call(&ctx, 8, serialize_args(&[&dirops, &how])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<CREATE3res>(&mut payload).expect("create res");
    let CREATE3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.obj.expect("handle").ino, 77);
    assert_eq!(resok.obj_attributes.expect("attrs").fileid, 77);
    assert_eq!(resok.dir_wcc.before.expect("pre").size, 4096);
    assert_eq!(resok.dir_wcc.after.expect("post").size, 4608);
}

#[tokio::test]
async fn mkdir_refuses_dot_names() {
    for name in [b".".as_slice(), b"..".as_slice()] {
        let ctx = context(StubDispatcher::default());
        let dirops = diropargs3 { dir: nfs_fh3 { ino: 42 }, name: name.into() };
        let reply = call(&ctx, 9, serialize_args(&[&dirops, &sattr3::default()])).await;
        let (_, mut payload) = parse_reply(&reply);
        let res = deserialize::<MKDIR3res>(&mut payload).expect("mkdir res");
        let MKDIR3res::Fail(stat, resfail) = res else {
            panic!("expected failure, got {res:?}");
        };
        assert_eq!(stat, nfsstat3::NFS3ERR_EXIST);
        assert_eq!(resfail.dir_wcc.before, None);
        assert_eq!(resfail.dir_wcc.after, None);
    }
}

#[tokio::test]
async fn link_always_unsupported_with_file_attrs() {
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_stat(7, file_stat(7, 3));
    let ctx = context(dispatcher);

    let args = LINK3args {
        file: nfs_fh3 { ino: 7 },
        link: diropargs3 { dir: nfs_fh3 { ino: 42 }, name: b"alias".as_slice().into() },
    };
    let reply = call(&ctx, 15, serialize_args(&[&args])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<LINK3res>(&mut payload).expect("link res");
    let LINK3res::Fail(stat, resfail) = res else {
        panic!("expected failure, got {res:?}");
    };
    assert_eq!(stat, nfsstat3::NFS3ERR_NOTSUPP);
    assert_eq!(resfail.file_attributes.expect("file attrs").fileid, 7);
    assert_eq!(resfail.linkdir_wcc.before, None);
    assert_eq!(resfail.linkdir_wcc.after, None);
}

#[tokio::test]
async fn fsstat_derives_byte_counts_from_statfs() {
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_stat(1, dir_stat(1, 4096));
    *dispatcher.statfs_result.lock().unwrap() = Some(Ok(nfs_bridge::posix::PosixStatFs {
        bsize: 4096,
        blocks: 100,
        bfree: 50,
        bavail: 25,
        files: 1000,
        ffree: 900,
    }));
    let ctx = context(dispatcher);

    let reply = call(&ctx, 18, serialize_args(&[&nfs_fh3 { ino: 1 }])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<FSSTAT3res>(&mut payload).expect("fsstat res");
    let FSSTAT3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.tbytes, 100 * 4096);
    assert_eq!(resok.fbytes, 50 * 4096);
    assert_eq!(resok.abytes, 25 * 4096);
    assert_eq!(resok.tfiles, 1000);
    assert_eq!(resok.ffiles, 900);
    assert_eq!(resok.afiles, 900);
    assert_eq!(resok.invarsec, 0);
    assert_eq!(resok.obj_attributes.expect("root attrs").fileid, 1);
}

#[tokio::test]
async fn fsstat_failure_still_carries_probe_attrs() {
    let dispatcher = StubDispatcher::default();
    dispatcher.insert_stat(1, dir_stat(1, 4096));
    *dispatcher.statfs_result.lock().unwrap() = Some(Err(BackendError::Sys(libc::EIO)));
    let ctx = context(dispatcher);

    let reply = call(&ctx, 18, serialize_args(&[&nfs_fh3 { ino: 1 }])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<FSSTAT3res>(&mut payload).expect("fsstat res");
    let FSSTAT3res::Fail(stat, resfail) = res else {
        panic!("expected failure, got {res:?}");
    };
    assert_eq!(stat, nfsstat3::NFS3ERR_IO);
    assert_eq!(resfail.obj_attributes.expect("root attrs").fileid, 1);
}

#[tokio::test]
async fn fsinfo_advertises_static_limits() {
    let ctx = context(StubDispatcher::default());
    let reply = call(&ctx, 19, serialize_args(&[&nfs_fh3 { ino: 1 }])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<FSINFO3res>(&mut payload).expect("fsinfo res");
    let FSINFO3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(resok.obj_attributes, None);
    assert_eq!(resok.rtmax, 1024 * 1024);
    assert_eq!(resok.rtpref, 1024 * 1024);
    assert_eq!(resok.rtmult, 1);
    assert_eq!(resok.wtmax, 1024 * 1024);
    assert_eq!(resok.wtmult, 1);
    assert_eq!(resok.dtpref, 1024 * 1024);
    assert_eq!(resok.maxfilesize, u64::MAX);
    assert_eq!(resok.time_delta.seconds, 0);
    assert_eq!(resok.time_delta.nseconds, 1);
    assert_eq!(
        resok.properties,
        nfs3::FSF_SYMLINK | nfs3::FSF_HOMOGENEOUS | nfs3::FSF_CANSETTIME
    );
}

#[tokio::test]
async fn pathconf_reflects_case_sensitivity_flag() {
    let dispatcher = StubDispatcher::default();
    let ctx = ProcessorContext { dispatcher: Arc::new(dispatcher), case_sensitive: false };

    let reply = call(&ctx, 20, serialize_args(&[&nfs_fh3 { ino: 1 }])).await;
    let (_, mut payload) = parse_reply(&reply);
    let res = deserialize::<PATHCONF3res>(&mut payload).expect("pathconf res");
    let PATHCONF3res::Ok(resok) = res else {
        panic!("expected success, got {res:?}");
    };
    assert!(resok.case_insensitive);
    assert!(resok.case_preserving);
    assert!(resok.no_trunc);
    assert!(resok.chown_restricted);
    assert_eq!(resok.linkmax, 0);
    assert_eq!(resok.name_max, 255);
}
