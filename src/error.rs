//! The back-end failure carrier and its translation to NFS status codes.

use std::fmt;

use crate::xdr::nfs3::nfsstat3;

/// Failure reported by a back-end operation.
///
/// Back-ends surface plain errno values where they have them, a dedicated
/// timeout tag when a deadline expired, and free-form text for anything
/// else. [`nfs_error_of`] collapses all three into one `nfsstat3`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendError {
    /// A system error carrying an errno-compatible code.
    Sys(i32),
    /// The operation missed its deadline.
    Timeout,
    /// Any other failure.
    Other(String),
}

impl BackendError {
    /// Tests whether this failure is an EEXIST system error.
    pub fn is_eexist(&self) -> bool {
        matches!(self, BackendError::Sys(errno) if *errno == libc::EEXIST)
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Sys(errno) => write!(f, "system error (errno {errno})"),
            BackendError::Timeout => write!(f, "operation timed out"),
            BackendError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Result alias used throughout the back-end dispatcher interface.
pub type BackendResult<T> = Result<T, BackendError>;

/// Translates a back-end failure into the NFS status reported to the
/// client. The mapping is total: unrecognized errno values and free-form
/// failures both collapse to `NFS3ERR_SERVERFAULT`, and timeouts map to
/// `NFS3ERR_JUKEBOX` so the client retries later.
pub fn nfs_error_of(err: &BackendError) -> nfsstat3 {
    match err {
        BackendError::Sys(errno) => match *errno {
            libc::EPERM => nfsstat3::NFS3ERR_PERM,
            libc::ENOENT => nfsstat3::NFS3ERR_NOENT,
            libc::EIO | libc::ETXTBSY => nfsstat3::NFS3ERR_IO,
            libc::ENXIO => nfsstat3::NFS3ERR_NXIO,
            libc::EACCES => nfsstat3::NFS3ERR_ACCES,
            libc::EEXIST => nfsstat3::NFS3ERR_EXIST,
            libc::EXDEV => nfsstat3::NFS3ERR_XDEV,
            libc::ENODEV => nfsstat3::NFS3ERR_NODEV,
            libc::ENOTDIR => nfsstat3::NFS3ERR_NOTDIR,
            libc::EISDIR => nfsstat3::NFS3ERR_ISDIR,
            libc::EINVAL => nfsstat3::NFS3ERR_INVAL,
            libc::EFBIG => nfsstat3::NFS3ERR_FBIG,
            libc::EROFS => nfsstat3::NFS3ERR_ROFS,
            libc::EMLINK => nfsstat3::NFS3ERR_MLINK,
            libc::ENAMETOOLONG => nfsstat3::NFS3ERR_NAMETOOLONG,
            libc::ENOTEMPTY => nfsstat3::NFS3ERR_NOTEMPTY,
            libc::EDQUOT => nfsstat3::NFS3ERR_DQUOT,
            libc::ESTALE => nfsstat3::NFS3ERR_STALE,
            libc::ETIMEDOUT | libc::EAGAIN | libc::ENOMEM => nfsstat3::NFS3ERR_JUKEBOX,
            libc::ENOTSUP => nfsstat3::NFS3ERR_NOTSUPP,
            _ => nfsstat3::NFS3ERR_SERVERFAULT,
        },
        BackendError::Timeout => nfsstat3::NFS3ERR_JUKEBOX,
        BackendError::Other(_) => nfsstat3::NFS3ERR_SERVERFAULT,
    }
}
