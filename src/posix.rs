//! Conversions between POSIX metadata snapshots and NFSv3 wire attributes.
//!
//! The back-end reports plain `stat`/`statfs` style snapshots; these pure
//! functions translate them into the RFC 1813 shapes the handlers
//! serialize. They are deterministic and side-effect free. The only
//! fallible step is timestamp narrowing: NFSv3 times are unsigned 32-bit,
//! so negative or oversized values are a mapping error rather than a
//! silent wrap.

use crate::error::BackendError;
use crate::xdr::nfs3;

/// A `struct timespec` equivalent as reported by the back-end.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeSpec {
    pub sec: i64,
    pub nsec: i64,
}

/// A `struct stat` snapshot of one filesystem object, owned by the
/// back-end and handed to the processor by value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PosixStat {
    /// Device the object lives on (`st_dev`).
    pub dev: u64,
    /// Inode number (`st_ino`).
    pub ino: u64,
    /// File type and permission bits (`st_mode`).
    pub mode: u32,
    /// Hard link count (`st_nlink`).
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    /// Size in bytes (`st_size`).
    pub size: u64,
    /// Allocated 512-byte blocks (`st_blocks`).
    pub blocks: u64,
    pub atime: TimeSpec,
    pub mtime: TimeSpec,
    pub ctime: TimeSpec,
}

/// A `struct statfs` snapshot of the exported filesystem.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PosixStatFs {
    /// Fundamental block size in bytes (`f_bsize`).
    pub bsize: u64,
    /// Total data blocks (`f_blocks`).
    pub blocks: u64,
    /// Free blocks (`f_bfree`).
    pub bfree: u64,
    /// Free blocks available to unprivileged users (`f_bavail`).
    pub bavail: u64,
    /// Total file slots (`f_files`).
    pub files: u64,
    /// Free file slots (`f_ffree`).
    pub ffree: u64,
}

/// Classifies a POSIX mode into the NFS object type. The classification is
/// exhaustive: a mode matching none of the other `S_IF*` patterns is
/// assumed to be a FIFO, asserted in debug builds.
pub fn ftype_of_mode(mode: u32) -> nfs3::ftype3 {
    let fmt = mode & libc::S_IFMT as u32;
    if fmt == libc::S_IFREG as u32 {
        nfs3::ftype3::NF3REG
    } else if fmt == libc::S_IFDIR as u32 {
        nfs3::ftype3::NF3DIR
    } else if fmt == libc::S_IFBLK as u32 {
        nfs3::ftype3::NF3BLK
    } else if fmt == libc::S_IFCHR as u32 {
        nfs3::ftype3::NF3CHR
    } else if fmt == libc::S_IFLNK as u32 {
        nfs3::ftype3::NF3LNK
    } else if fmt == libc::S_IFSOCK as u32 {
        nfs3::ftype3::NF3SOCK
    } else {
        debug_assert_eq!(fmt, libc::S_IFIFO as u32, "unclassifiable mode {mode:#o}");
        nfs3::ftype3::NF3FIFO
    }
}

/// Extracts the NFS mode from a POSIX mode: the full permission bits
/// including setuid/setgid/sticky, with the `S_IFMT` type bits stripped.
pub fn nfs_mode_of_mode(mode: u32) -> nfs3::mode3 {
    mode & 0o7777
}

/// Narrows a timespec into an NFS time. Fails with an invalid-argument
/// error when either field is negative or exceeds `u32::MAX`.
pub fn nfs_time_of_timespec(time: TimeSpec) -> Result<nfs3::nfstime3, BackendError> {
    let seconds = u32::try_from(time.sec)
        .map_err(|_| BackendError::Sys(libc::EINVAL))?;
    let nseconds = u32::try_from(time.nsec)
        .map_err(|_| BackendError::Sys(libc::EINVAL))?;
    Ok(nfs3::nfstime3 { seconds, nseconds })
}

/// Builds the full NFS attribute structure from a stat snapshot.
pub fn fattr3_of_stat(stat: &PosixStat) -> Result<nfs3::fattr3, BackendError> {
    Ok(nfs3::fattr3 {
        ftype: ftype_of_mode(stat.mode),
        mode: nfs_mode_of_mode(stat.mode),
        nlink: stat.nlink,
        uid: stat.uid,
        gid: stat.gid,
        size: stat.size,
        used: stat.blocks.saturating_mul(512),
        rdev: nfs3::specdata3::default(),
        fsid: stat.dev,
        fileid: stat.ino,
        atime: nfs_time_of_timespec(stat.atime)?,
        mtime: nfs_time_of_timespec(stat.mtime)?,
        ctime: nfs_time_of_timespec(stat.ctime)?,
    })
}

/// Wraps the outcome of an attribute probe. A probe failure, or a snapshot
/// whose times cannot be represented, degrades to the absent variant; it
/// never fails the operation the probe accompanies.
pub fn post_op_attr_of(stat: Result<PosixStat, BackendError>) -> nfs3::post_op_attr {
    stat.ok().and_then(|stat| fattr3_of_stat(&stat).ok())
}

/// Extracts the pre-operation attribute subset: size, mtime and ctime.
pub fn pre_op_attr_of(stat: &PosixStat) -> Result<nfs3::wcc_attr, BackendError> {
    Ok(nfs3::wcc_attr {
        size: stat.size,
        mtime: nfs_time_of_timespec(stat.mtime)?,
        ctime: nfs_time_of_timespec(stat.ctime)?,
    })
}

/// Brackets a mutation with the stat snapshots the back-end observed
/// around it. Either side may be missing.
pub fn wcc_data_of(pre: Option<&PosixStat>, post: Option<&PosixStat>) -> nfs3::wcc_data {
    nfs3::wcc_data {
        before: pre.and_then(|stat| pre_op_attr_of(stat).ok()),
        after: post.and_then(|stat| fattr3_of_stat(stat).ok()),
    }
}
