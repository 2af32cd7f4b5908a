//! Shared test back-end: a stub dispatcher with injectable results.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use nfs_bridge::dispatch::{CreateRes, MkdirRes, NfsDispatcher, WriteRes};
use nfs_bridge::error::{BackendError, BackendResult};
use nfs_bridge::nfs3::RequestContext;
use nfs_bridge::posix::{PosixStat, PosixStatFs, TimeSpec};
use nfs_bridge::xdr::nfs3::{fileid3, filename3};

/// Back-end whose every answer is planted by the test. Missing entries
/// report ENOENT so probe-degradation paths are easy to exercise.
#[derive(Default)]
pub struct StubDispatcher {
    pub stats: Mutex<HashMap<fileid3, BackendResult<PosixStat>>>,
    pub parents: Mutex<HashMap<fileid3, fileid3>>,
    pub lookups: Mutex<HashMap<(fileid3, Vec<u8>), BackendResult<(fileid3, PosixStat)>>>,
    pub readlinks: Mutex<HashMap<fileid3, BackendResult<Vec<u8>>>>,
    pub write_result: Mutex<Option<BackendResult<WriteRes>>>,
    pub create_result: Mutex<Option<BackendResult<CreateRes>>>,
    pub mkdir_result: Mutex<Option<BackendResult<MkdirRes>>>,
    pub statfs_result: Mutex<Option<BackendResult<PosixStatFs>>>,
}

impl StubDispatcher {
    pub fn insert_stat(&self, ino: fileid3, stat: PosixStat) {
        self.stats.lock().unwrap().insert(ino, Ok(stat));
    }

    pub fn fail_stat(&self, ino: fileid3, err: BackendError) {
        self.stats.lock().unwrap().insert(ino, Err(err));
    }

    pub fn insert_parent(&self, ino: fileid3, parent: fileid3) {
        self.parents.lock().unwrap().insert(ino, parent);
    }

    pub fn insert_lookup(&self, dir: fileid3, name: &[u8], ino: fileid3, stat: PosixStat) {
        self.lookups.lock().unwrap().insert((dir, name.to_vec()), Ok((ino, stat)));
    }

    pub fn insert_readlink(&self, ino: fileid3, target: &[u8]) {
        self.readlinks.lock().unwrap().insert(ino, Ok(target.to_vec()));
    }
}

fn noent() -> BackendError {
    BackendError::Sys(libc::ENOENT)
}

#[async_trait]
impl NfsDispatcher for StubDispatcher {
    async fn getattr(&self, ino: fileid3, _req: &RequestContext) -> BackendResult<PosixStat> {
        self.stats.lock().unwrap().get(&ino).cloned().unwrap_or_else(|| Err(noent()))
    }

    async fn get_parent(&self, ino: fileid3, _req: &RequestContext) -> BackendResult<fileid3> {
        self.parents.lock().unwrap().get(&ino).copied().ok_or_else(noent)
    }

    async fn lookup(
        &self,
        dir: fileid3,
        name: &filename3,
        _req: &RequestContext,
    ) -> BackendResult<(fileid3, PosixStat)> {
        self.lookups
            .lock()
            .unwrap()
            .get(&(dir, name.as_ref().to_vec()))
            .cloned()
            .unwrap_or_else(|| Err(noent()))
    }

    async fn readlink(&self, ino: fileid3, _req: &RequestContext) -> BackendResult<Vec<u8>> {
        self.readlinks.lock().unwrap().get(&ino).cloned().unwrap_or_else(|| Err(noent()))
    }

    async fn write(
        &self,
        _ino: fileid3,
        _data: Vec<u8>,
        _offset: u64,
        _req: &RequestContext,
    ) -> BackendResult<WriteRes> {
        self.write_result.lock().unwrap().take().unwrap_or_else(|| Err(noent()))
    }

    async fn create(
        &self,
        _dir: fileid3,
        _name: &filename3,
        _mode: u32,
        _req: &RequestContext,
    ) -> BackendResult<CreateRes> {
        self.create_result.lock().unwrap().take().unwrap_or_else(|| Err(noent()))
    }

    async fn mkdir(
        &self,
        _dir: fileid3,
        _name: &filename3,
        _mode: u32,
        _req: &RequestContext,
    ) -> BackendResult<MkdirRes> {
        self.mkdir_result.lock().unwrap().take().unwrap_or_else(|| Err(noent()))
    }

    async fn statfs(&self, _ino: fileid3, _req: &RequestContext) -> BackendResult<PosixStatFs> {
        self.statfs_result.lock().unwrap().take().unwrap_or_else(|| Err(noent()))
    }
}

/// A plausible regular-file stat snapshot.
pub fn file_stat(ino: fileid3, size: u64) -> PosixStat {
    PosixStat {
        dev: 11,
        ino,
        mode: libc::S_IFREG as u32 | 0o644,
        nlink: 1,
        uid: 1000,
        gid: 1000,
        size,
        blocks: size.div_ceil(512),
        atime: TimeSpec { sec: 1_700_000_000, nsec: 0 },
        mtime: TimeSpec { sec: 1_700_000_100, nsec: 500 },
        ctime: TimeSpec { sec: 1_700_000_200, nsec: 999 },
    }
}

/// A plausible directory stat snapshot.
pub fn dir_stat(ino: fileid3, size: u64) -> PosixStat {
    PosixStat {
        mode: libc::S_IFDIR as u32 | 0o755,
        nlink: 2,
        ..file_stat(ino, size)
    }
}
