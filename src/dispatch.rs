//! The back-end interface the protocol processor drives.
//!
//! A back-end exposes the filesystem being exported: it resolves names to
//! inode numbers, produces `stat`/`statfs` snapshots, and performs the
//! mutations. Objects are identified only by their 64-bit inode number;
//! the processor wraps and unwraps the opaque file handle around it.
//!
//! Implementations must be reentrant: the processor issues overlapping
//! calls (attribute probes run concurrently with the primary operation of
//! a request, and independent requests interleave freely). `getattr`
//! should be fast; NFS clients call it constantly.

use async_trait::async_trait;

use crate::error::BackendResult;
use crate::nfs3::RequestContext;
use crate::posix::{PosixStat, PosixStatFs};
use crate::xdr::nfs3::{fileid3, filename3};

/// Outcome of a [`NfsDispatcher::write`] call: how much was written, plus
/// optional stat snapshots of the file taken around the mutation for weak
/// cache consistency. A back-end unable to cheaply produce a snapshot may
/// omit it; the reply degrades to the absent attribute variant.
#[derive(Clone, Debug, Default)]
pub struct WriteRes {
    /// Bytes actually written. NFS caps a single WRITE at `u32::MAX`
    /// bytes, so this always fits in 32 bits.
    pub written: u64,
    /// File attributes sampled before the write.
    pub pre_stat: Option<PosixStat>,
    /// File attributes sampled after the write.
    pub post_stat: Option<PosixStat>,
}

/// Outcome of a [`NfsDispatcher::create`] call: the new object and
/// optional snapshots of the parent directory around the mutation.
#[derive(Clone, Debug, Default)]
pub struct CreateRes {
    /// Inode number of the created file.
    pub ino: fileid3,
    /// Attributes of the created file.
    pub stat: PosixStat,
    /// Parent directory attributes sampled before the creation.
    pub pre_dir_stat: Option<PosixStat>,
    /// Parent directory attributes sampled after the creation.
    pub post_dir_stat: Option<PosixStat>,
}

/// Outcome of a [`NfsDispatcher::mkdir`] call, shaped like [`CreateRes`].
#[derive(Clone, Debug, Default)]
pub struct MkdirRes {
    /// Inode number of the created directory.
    pub ino: fileid3,
    /// Attributes of the created directory.
    pub stat: PosixStat,
    /// Parent directory attributes sampled before the creation.
    pub pre_dir_stat: Option<PosixStat>,
    /// Parent directory attributes sampled after the creation.
    pub post_dir_stat: Option<PosixStat>,
}

/// The operations a filesystem back-end must provide to be exported.
///
/// Every method receives the per-request context so implementations can
/// attribute work to the originating procedure and caller credentials.
/// Failures are reported through [`crate::error::BackendError`]; the
/// processor translates them to `nfsstat3` values, so back-ends never
/// deal in NFS status codes directly.
#[async_trait]
pub trait NfsDispatcher: Send + Sync {
    /// Produces a stat snapshot of the object.
    async fn getattr(&self, ino: fileid3, req: &RequestContext) -> BackendResult<PosixStat>;

    /// Resolves the parent directory of `ino`, used for `..` lookups.
    async fn get_parent(&self, ino: fileid3, req: &RequestContext) -> BackendResult<fileid3>;

    /// Resolves `name` within the directory `dir` to an inode number and
    /// its attributes.
    async fn lookup(
        &self,
        dir: fileid3,
        name: &filename3,
        req: &RequestContext,
    ) -> BackendResult<(fileid3, PosixStat)>;

    /// Reads the target of the symbolic link `ino`.
    async fn readlink(&self, ino: fileid3, req: &RequestContext) -> BackendResult<Vec<u8>>;

    /// Writes `data` into the file `ino` at `offset`.
    async fn write(
        &self,
        ino: fileid3,
        data: Vec<u8>,
        offset: u64,
        req: &RequestContext,
    ) -> BackendResult<WriteRes>;

    /// Creates a regular file named `name` in `dir` with the given mode.
    async fn create(
        &self,
        dir: fileid3,
        name: &filename3,
        mode: u32,
        req: &RequestContext,
    ) -> BackendResult<CreateRes>;

    /// Creates a directory named `name` in `dir` with the given mode.
    async fn mkdir(
        &self,
        dir: fileid3,
        name: &filename3,
        mode: u32,
        req: &RequestContext,
    ) -> BackendResult<MkdirRes>;

    /// Produces a statfs snapshot of the filesystem containing `ino`.
    async fn statfs(&self, ino: fileid3, req: &RequestContext) -> BackendResult<PosixStatFs>;
}
