//! NFS version 3 wire types as defined in RFC 1813.
//!
//! The module covers the constants, basic typedefs and compound structures
//! the server needs: file attributes and their optional wrappers, weak
//! cache consistency data, the argument shapes of the implemented
//! procedures, and one reply union per procedure.
//!
//! Replies are pervasively `(status, union-by-status)` on the wire. Each
//! reply here is a tagged sum with an `Ok` arm carrying the resok body and
//! a `Fail` arm carrying the status plus only the fields valid on failure,
//! so an impossible combination (say, a success body under an error
//! status) cannot be constructed.

// The full RFC 1813 surface is modeled even where the server does not use
// every item.
#![allow(dead_code)]
// Keep the RFC naming conventions for consistency with the specification.
#![allow(non_camel_case_types)]

use std::fmt;
use std::io::{Read, Write};

use num_derive::{FromPrimitive, ToPrimitive};

use super::{deserialize, invalid_data, Deserialize, Serialize, XdrEnum, XdrStruct};

/// RPC program number of the NFS service.
pub const PROGRAM: u32 = 100003;
/// Protocol version implemented by this crate.
pub const VERSION: u32 = 3;

/// Longest accepted pathname component, in bytes.
pub const NAME_MAX: usize = 255;

/// Maximum size in bytes of an opaque file handle.
pub const NFS3_FHSIZE: usize = 64;
/// Size in bytes of the verifier used for asynchronous WRITE.
pub const NFS3_WRITEVERFSIZE: usize = 8;
/// Size in bytes of the verifier used for exclusive CREATE.
pub const NFS3_CREATEVERFSIZE: usize = 8;

/// Byte string used for filenames and symlink targets. NFS names are raw
/// bytes with no encoding guarantee, so this is not a Rust `String`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct nfsstring(pub Vec<u8>);

impl nfsstring {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for nfsstring {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for nfsstring {
    fn from(value: &[u8]) -> Self {
        Self(value.into())
    }
}

impl AsRef<[u8]> for nfsstring {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for nfsstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for nfsstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl Serialize for nfsstring {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.0.as_slice().serialize(dest)
    }
}

impl Deserialize for nfsstring {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.0.deserialize(src)
    }
}

/// A single pathname component.
pub type filename3 = nfsstring;
/// A pathname or symbolic link contents.
pub type nfspath3 = nfsstring;
/// Unique file number within the exported filesystem (an inode number).
pub type fileid3 = u64;
/// User id owning a file.
pub type uid3 = u32;
/// Group id owning a file.
pub type gid3 = u32;
/// File size or space usage in bytes.
pub type size3 = u64;
/// Byte position within a file.
pub type offset3 = u64;
/// File mode bits.
pub type mode3 = u32;
/// Count of bytes in a transfer.
pub type count3 = u32;
/// Verifier detecting a server restart between WRITE and COMMIT.
pub type writeverf3 = u64;
/// Verifier making exclusive CREATE idempotent across retries.
pub type createverf3 = [u8; NFS3_CREATEVERFSIZE];

/// Status codes returned by NFS version 3 procedures (RFC 1813 §2.6).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum nfsstat3 {
    /// The call completed successfully.
    #[default]
    NFS3_OK = 0,
    /// Not owner: caller is neither privileged nor the owner.
    NFS3ERR_PERM = 1,
    /// No such file or directory.
    NFS3ERR_NOENT = 2,
    /// A hard I/O error occurred while processing the operation.
    NFS3ERR_IO = 5,
    /// No such device or address.
    NFS3ERR_NXIO = 6,
    /// Permission denied, for reasons other than ownership.
    NFS3ERR_ACCES = 13,
    /// The file specified already exists.
    NFS3ERR_EXIST = 17,
    /// Attempted cross-device hard link.
    NFS3ERR_XDEV = 18,
    /// No such device.
    NFS3ERR_NODEV = 19,
    /// A non-directory was named in a directory operation.
    NFS3ERR_NOTDIR = 20,
    /// A directory was named in a non-directory operation.
    NFS3ERR_ISDIR = 21,
    /// Invalid or unsupported argument.
    NFS3ERR_INVAL = 22,
    /// The operation would grow a file beyond the server's limit.
    NFS3ERR_FBIG = 27,
    /// No space left on device.
    NFS3ERR_NOSPC = 28,
    /// Modifying operation on a read-only filesystem.
    NFS3ERR_ROFS = 30,
    /// Too many hard links.
    NFS3ERR_MLINK = 31,
    /// The filename in an operation was too long.
    NFS3ERR_NAMETOOLONG = 63,
    /// Attempt to remove a non-empty directory.
    NFS3ERR_NOTEMPTY = 66,
    /// Resource (quota) hard limit exceeded.
    NFS3ERR_DQUOT = 69,
    /// The file handle is invalid or the file it named is gone.
    NFS3ERR_STALE = 70,
    /// Too many levels of remote in path.
    NFS3ERR_REMOTE = 71,
    /// The file handle failed internal consistency checks.
    NFS3ERR_BADHANDLE = 10001,
    /// SETATTR update synchronization mismatch.
    NFS3ERR_NOT_SYNC = 10002,
    /// READDIR cookie is stale.
    NFS3ERR_BAD_COOKIE = 10003,
    /// The operation is not supported.
    NFS3ERR_NOTSUPP = 10004,
    /// Buffer or request is too small.
    NFS3ERR_TOOSMALL = 10005,
    /// A server-side error with no protocol-level equivalent.
    NFS3ERR_SERVERFAULT = 10006,
    /// Attempt to create an object of an unsupported type.
    NFS3ERR_BADTYPE = 10007,
    /// The server cannot complete the request in a timely fashion; the
    /// client should retry with a new transaction id later.
    NFS3ERR_JUKEBOX = 10008,
}
XdrEnum!(nfsstat3);

/// Type of a filesystem object (RFC 1813 §2.3.5).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum ftype3 {
    /// Regular file.
    #[default]
    NF3REG = 1,
    /// Directory.
    NF3DIR = 2,
    /// Block special device.
    NF3BLK = 3,
    /// Character special device.
    NF3CHR = 4,
    /// Symbolic link.
    NF3LNK = 5,
    /// Socket.
    NF3SOCK = 6,
    /// Named pipe.
    NF3FIFO = 7,
}
XdrEnum!(ftype3);

/// Major/minor numbers of a special device.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct specdata3 {
    pub specdata1: u32,
    pub specdata2: u32,
}
XdrStruct!(specdata3, specdata1, specdata2);

/// The opaque file handle identifying a filesystem object.
///
/// This server issues handles carrying exactly one 64-bit inode number,
/// encoded big-endian inside the variable-length opaque, and accepts them
/// back verbatim. The number is stable for the life of the mount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct nfs_fh3 {
    pub ino: fileid3,
}

impl Serialize for nfs_fh3 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.ino.to_be_bytes().as_slice().serialize(dest)
    }
}

impl Deserialize for nfs_fh3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let data = deserialize::<Vec<u8>>(src)?;
        let raw: [u8; 8] = data
            .as_slice()
            .try_into()
            .map_err(|_| invalid_data(format!("bad file handle length: {}", data.len())))?;
        self.ino = u64::from_be_bytes(raw);
        Ok(())
    }
}

/// Timestamp with nanosecond resolution (RFC 1813 §2.3.5).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct nfstime3 {
    /// Seconds since the Unix epoch.
    pub seconds: u32,
    /// Nanoseconds, 0..=999_999_999.
    pub nseconds: u32,
}
XdrStruct!(nfstime3, seconds, nseconds);

/// Complete file attributes (RFC 1813 §2.3.5), returned by GETATTR and
/// carried in nearly every reply's post-operation attribute slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct fattr3 {
    pub ftype: ftype3,
    pub mode: mode3,
    /// Number of directory entries referencing this object.
    pub nlink: u32,
    pub uid: uid3,
    pub gid: gid3,
    /// Size of the file data in bytes.
    pub size: size3,
    /// Bytes of storage actually allocated to the object.
    pub used: size3,
    /// Device numbers, meaningful for NF3BLK/NF3CHR objects only.
    pub rdev: specdata3,
    /// Identifier of the filesystem containing the object.
    pub fsid: u64,
    /// Inode number of the object within its filesystem.
    pub fileid: fileid3,
    pub atime: nfstime3,
    pub mtime: nfstime3,
    pub ctime: nfstime3,
}
XdrStruct!(
    fattr3, ftype, mode, nlink, uid, gid, size, used, rdev, fsid, fileid, atime, mtime, ctime
);

/// The attribute subset used for weak cache consistency comparisons.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct wcc_attr {
    pub size: size3,
    pub mtime: nfstime3,
    pub ctime: nfstime3,
}
XdrStruct!(wcc_attr, size, mtime, ctime);

/// Pre-operation attributes; "absent" is a valid wire state.
pub type pre_op_attr = Option<wcc_attr>;
/// Post-operation attributes; "absent" is a valid wire state.
pub type post_op_attr = Option<fattr3>;
/// Optional file handle in CREATE-style replies.
pub type post_op_fh3 = Option<nfs_fh3>;

/// Attributes bracketing an in-place mutation (RFC 1813 §2.6): the subset
/// observed before the operation and the full attributes after it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct wcc_data {
    pub before: pre_op_attr,
    pub after: post_op_attr,
}
XdrStruct!(wcc_data, before, after);

/// How SETATTR-style requests modify a timestamp.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u32)]
pub enum set_atime {
    #[default]
    DONT_CHANGE,
    SET_TO_SERVER_TIME,
    SET_TO_CLIENT_TIME(nfstime3),
}

impl Serialize for set_atime {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            set_atime::DONT_CHANGE => 0_u32.serialize(dest),
            set_atime::SET_TO_SERVER_TIME => 1_u32.serialize(dest),
            set_atime::SET_TO_CLIENT_TIME(v) => {
                2_u32.serialize(dest)?;
                v.serialize(dest)
            }
        }
    }
}

impl Deserialize for set_atime {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = set_atime::DONT_CHANGE,
            1 => *self = set_atime::SET_TO_SERVER_TIME,
            2 => *self = set_atime::SET_TO_CLIENT_TIME(deserialize(src)?),
            other => return Err(invalid_data(format!("invalid set_atime value: {other}"))),
        }
        Ok(())
    }
}

/// How SETATTR-style requests modify the modification time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u32)]
pub enum set_mtime {
    #[default]
    DONT_CHANGE,
    SET_TO_SERVER_TIME,
    SET_TO_CLIENT_TIME(nfstime3),
}

impl Serialize for set_mtime {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            set_mtime::DONT_CHANGE => 0_u32.serialize(dest),
            set_mtime::SET_TO_SERVER_TIME => 1_u32.serialize(dest),
            set_mtime::SET_TO_CLIENT_TIME(v) => {
                2_u32.serialize(dest)?;
                v.serialize(dest)
            }
        }
    }
}

impl Deserialize for set_mtime {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = set_mtime::DONT_CHANGE,
            1 => *self = set_mtime::SET_TO_SERVER_TIME,
            2 => *self = set_mtime::SET_TO_CLIENT_TIME(deserialize(src)?),
            other => return Err(invalid_data(format!("invalid set_mtime value: {other}"))),
        }
        Ok(())
    }
}

/// Attributes a client asks to establish on a new or existing object.
/// Every field is individually optional.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct sattr3 {
    pub mode: Option<mode3>,
    pub uid: Option<uid3>,
    pub gid: Option<gid3>,
    pub size: Option<size3>,
    pub atime: set_atime,
    pub mtime: set_mtime,
}
XdrStruct!(sattr3, mode, uid, gid, size, atime, mtime);

/// A directory handle plus a name within it, the argument shape shared by
/// LOOKUP, CREATE, MKDIR and the other directory operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct diropargs3 {
    pub dir: nfs_fh3,
    pub name: filename3,
}
XdrStruct!(diropargs3, dir, name);

/// How CREATE should behave when the target already exists
/// (RFC 1813 §3.3.8).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum createhow3 {
    /// Create or reuse the existing file; never fails with EXIST.
    UNCHECKED(sattr3),
    /// Fail with EXIST when the file is already present.
    GUARDED(sattr3),
    /// Idempotent creation keyed by a client verifier.
    EXCLUSIVE(createverf3),
}

impl Default for createhow3 {
    fn default() -> createhow3 {
        createhow3::UNCHECKED(sattr3::default())
    }
}

impl createhow3 {
    /// The requested initial attributes, when the mode carries any.
    pub fn attributes(&self) -> Option<&sattr3> {
        match self {
            createhow3::UNCHECKED(attr) | createhow3::GUARDED(attr) => Some(attr),
            createhow3::EXCLUSIVE(_) => None,
        }
    }
}

impl Serialize for createhow3 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            createhow3::UNCHECKED(v) => {
                0_u32.serialize(dest)?;
                v.serialize(dest)
            }
            createhow3::GUARDED(v) => {
                1_u32.serialize(dest)?;
                v.serialize(dest)
            }
            createhow3::EXCLUSIVE(v) => {
                2_u32.serialize(dest)?;
                v.serialize(dest)
            }
        }
    }
}

impl Deserialize for createhow3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = createhow3::UNCHECKED(deserialize(src)?),
            1 => *self = createhow3::GUARDED(deserialize(src)?),
            2 => *self = createhow3::EXCLUSIVE(deserialize(src)?),
            other => return Err(invalid_data(format!("invalid createmode3 value: {other}"))),
        }
        Ok(())
    }
}

/// Stability the client requests for a WRITE and the server reports back
/// (RFC 1813 §3.3.7).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum stable_how {
    /// Data may be cached; durability deferred to COMMIT.
    #[default]
    UNSTABLE = 0,
    /// The written data is on stable storage.
    DATA_SYNC = 1,
    /// The written data and all file metadata are on stable storage.
    FILE_SYNC = 2,
}
XdrEnum!(stable_how);

// ACCESS permission bits (RFC 1813 §3.3.4).
/// Read file data or read a directory.
pub const ACCESS3_READ: u32 = 0x0001;
/// Look up a name in a directory.
pub const ACCESS3_LOOKUP: u32 = 0x0002;
/// Rewrite existing file data or modify existing directory entries.
pub const ACCESS3_MODIFY: u32 = 0x0004;
/// Grow a file or add directory entries.
pub const ACCESS3_EXTEND: u32 = 0x0008;
/// Delete a file or directory entry.
pub const ACCESS3_DELETE: u32 = 0x0010;
/// Execute a file or traverse a directory.
pub const ACCESS3_EXECUTE: u32 = 0x0020;

// FSINFO property bits (RFC 1813 §3.3.19).
/// The filesystem supports hard links.
pub const FSF_LINK: u32 = 0x0001;
/// The filesystem supports symbolic links.
pub const FSF_SYMLINK: u32 = 0x0002;
/// PATHCONF results are identical across the filesystem.
pub const FSF_HOMOGENEOUS: u32 = 0x0008;
/// SETATTR can set object times to the advertised granularity.
pub const FSF_CANSETTIME: u32 = 0x0010;

/// WRITE arguments (RFC 1813 §3.3.7).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WRITE3args {
    pub file: nfs_fh3,
    pub offset: offset3,
    pub count: count3,
    pub stable: stable_how,
    pub data: Vec<u8>,
}
XdrStruct!(WRITE3args, file, offset, count, stable, data);

/// LINK arguments (RFC 1813 §3.3.15): the existing file and the directory
/// entry the new name should occupy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LINK3args {
    pub file: nfs_fh3,
    pub link: diropargs3,
}
XdrStruct!(LINK3args, file, link);

/// Defines the reply union of one procedure: an `Ok` arm for `NFS3_OK`
/// carrying the resok body, a `Fail` arm pairing any other status with
/// the fields valid on failure.
macro_rules! XdrResultUnion {
    ($res:ident, $resok:ty, $resfail:ty) => {
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum $res {
            Ok($resok),
            Fail(nfsstat3, $resfail),
        }

        impl Default for $res {
            fn default() -> $res {
                $res::Fail(nfsstat3::NFS3ERR_SERVERFAULT, Default::default())
            }
        }

        impl Serialize for $res {
            fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
                match self {
                    $res::Ok(v) => {
                        nfsstat3::NFS3_OK.serialize(dest)?;
                        v.serialize(dest)
                    }
                    $res::Fail(stat, v) => {
                        debug_assert!(*stat != nfsstat3::NFS3_OK);
                        stat.serialize(dest)?;
                        v.serialize(dest)
                    }
                }
            }
        }

        impl Deserialize for $res {
            fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
                let stat = deserialize::<nfsstat3>(src)?;
                *self = if stat == nfsstat3::NFS3_OK {
                    $res::Ok(deserialize(src)?)
                } else {
                    $res::Fail(stat, deserialize(src)?)
                };
                Ok(())
            }
        }
    };
}

/// GETATTR success body: just the attributes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GETATTR3resok {
    pub obj_attributes: fattr3,
}
XdrStruct!(GETATTR3resok, obj_attributes);

/// GETATTR reply. The failure arm is void on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GETATTR3res {
    Ok(GETATTR3resok),
    Fail(nfsstat3),
}

impl Default for GETATTR3res {
    fn default() -> GETATTR3res {
        GETATTR3res::Fail(nfsstat3::NFS3ERR_SERVERFAULT)
    }
}

impl Serialize for GETATTR3res {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            GETATTR3res::Ok(v) => {
                nfsstat3::NFS3_OK.serialize(dest)?;
                v.serialize(dest)
            }
            GETATTR3res::Fail(stat) => {
                debug_assert!(*stat != nfsstat3::NFS3_OK);
                stat.serialize(dest)
            }
        }
    }
}

impl Deserialize for GETATTR3res {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let stat = deserialize::<nfsstat3>(src)?;
        *self = if stat == nfsstat3::NFS3_OK {
            GETATTR3res::Ok(deserialize(src)?)
        } else {
            GETATTR3res::Fail(stat)
        };
        Ok(())
    }
}

/// LOOKUP success body: the resolved handle, its attributes, and the
/// directory attributes for cache validation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LOOKUP3resok {
    pub object: nfs_fh3,
    pub obj_attributes: post_op_attr,
    pub dir_attributes: post_op_attr,
}
XdrStruct!(LOOKUP3resok, object, obj_attributes, dir_attributes);

/// LOOKUP failure body: directory attributes only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LOOKUP3resfail {
    pub dir_attributes: post_op_attr,
}
XdrStruct!(LOOKUP3resfail, dir_attributes);

XdrResultUnion!(LOOKUP3res, LOOKUP3resok, LOOKUP3resfail);

/// ACCESS success body: attributes plus the rights actually granted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ACCESS3resok {
    pub obj_attributes: post_op_attr,
    pub access: u32,
}
XdrStruct!(ACCESS3resok, obj_attributes, access);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ACCESS3resfail {
    pub obj_attributes: post_op_attr,
}
XdrStruct!(ACCESS3resfail, obj_attributes);

XdrResultUnion!(ACCESS3res, ACCESS3resok, ACCESS3resfail);

/// READLINK success body: link attributes and the target path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READLINK3resok {
    pub symlink_attributes: post_op_attr,
    pub data: nfspath3,
}
XdrStruct!(READLINK3resok, symlink_attributes, data);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct READLINK3resfail {
    pub symlink_attributes: post_op_attr,
}
XdrStruct!(READLINK3resfail, symlink_attributes);

XdrResultUnion!(READLINK3res, READLINK3resok, READLINK3resfail);

/// WRITE success body.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WRITE3resok {
    /// File attributes bracketing the write.
    pub file_wcc: wcc_data,
    /// Bytes actually written.
    pub count: count3,
    /// Stability the data actually reached.
    pub committed: stable_how,
    /// Restart-detection verifier, compared by the client across COMMITs.
    pub verf: writeverf3,
}
XdrStruct!(WRITE3resok, file_wcc, count, committed, verf);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WRITE3resfail {
    pub file_wcc: wcc_data,
}
XdrStruct!(WRITE3resfail, file_wcc);

XdrResultUnion!(WRITE3res, WRITE3resok, WRITE3resfail);

/// CREATE success body. All three fields are individually optional; an
/// UNCHECKED create racing an existing file returns them all absent to
/// force the client into a LOOKUP.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CREATE3resok {
    pub obj: post_op_fh3,
    pub obj_attributes: post_op_attr,
    pub dir_wcc: wcc_data,
}
XdrStruct!(CREATE3resok, obj, obj_attributes, dir_wcc);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CREATE3resfail {
    pub dir_wcc: wcc_data,
}
XdrStruct!(CREATE3resfail, dir_wcc);

XdrResultUnion!(CREATE3res, CREATE3resok, CREATE3resfail);

/// MKDIR success body, shaped like CREATE's.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MKDIR3resok {
    pub obj: post_op_fh3,
    pub obj_attributes: post_op_attr,
    pub dir_wcc: wcc_data,
}
XdrStruct!(MKDIR3resok, obj, obj_attributes, dir_wcc);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MKDIR3resfail {
    pub dir_wcc: wcc_data,
}
XdrStruct!(MKDIR3resfail, dir_wcc);

XdrResultUnion!(MKDIR3res, MKDIR3resok, MKDIR3resfail);

/// LINK success body (unused by this server, which rejects hard links,
/// but required to round-trip the full reply union).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LINK3resok {
    pub file_attributes: post_op_attr,
    pub linkdir_wcc: wcc_data,
}
XdrStruct!(LINK3resok, file_attributes, linkdir_wcc);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LINK3resfail {
    pub file_attributes: post_op_attr,
    pub linkdir_wcc: wcc_data,
}
XdrStruct!(LINK3resfail, file_attributes, linkdir_wcc);

XdrResultUnion!(LINK3res, LINK3resok, LINK3resfail);

/// FSSTAT success body: volatile filesystem statistics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FSSTAT3resok {
    pub obj_attributes: post_op_attr,
    /// Total bytes in the filesystem.
    pub tbytes: size3,
    /// Free bytes in the filesystem.
    pub fbytes: size3,
    /// Free bytes available to the caller.
    pub abytes: size3,
    /// Total file slots.
    pub tfiles: size3,
    /// Free file slots.
    pub ffiles: size3,
    /// Free file slots available to the caller.
    pub afiles: size3,
    /// Seconds for which this information is expected to stay valid.
    pub invarsec: u32,
}
XdrStruct!(FSSTAT3resok, obj_attributes, tbytes, fbytes, abytes, tfiles, ffiles, afiles, invarsec);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FSSTAT3resfail {
    pub obj_attributes: post_op_attr,
}
XdrStruct!(FSSTAT3resfail, obj_attributes);

XdrResultUnion!(FSSTAT3res, FSSTAT3resok, FSSTAT3resfail);

/// FSINFO success body: static filesystem parameters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FSINFO3resok {
    pub obj_attributes: post_op_attr,
    /// Maximum supported READ size.
    pub rtmax: u32,
    /// Preferred READ size.
    pub rtpref: u32,
    /// Suggested READ size multiple.
    pub rtmult: u32,
    /// Maximum supported WRITE size.
    pub wtmax: u32,
    /// Preferred WRITE size.
    pub wtpref: u32,
    /// Suggested WRITE size multiple.
    pub wtmult: u32,
    /// Preferred READDIR request size.
    pub dtpref: u32,
    /// Maximum file size.
    pub maxfilesize: size3,
    /// Granularity of object timestamps.
    pub time_delta: nfstime3,
    /// FSF_* property bits.
    pub properties: u32,
}
XdrStruct!(
    FSINFO3resok,
    obj_attributes,
    rtmax,
    rtpref,
    rtmult,
    wtmax,
    wtpref,
    wtmult,
    dtpref,
    maxfilesize,
    time_delta,
    properties
);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FSINFO3resfail {
    pub obj_attributes: post_op_attr,
}
XdrStruct!(FSINFO3resfail, obj_attributes);

XdrResultUnion!(FSINFO3res, FSINFO3resok, FSINFO3resfail);

/// PATHCONF success body: POSIX pathconf values for the filesystem.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PATHCONF3resok {
    pub obj_attributes: post_op_attr,
    /// Maximum number of hard links to an object.
    pub linkmax: u32,
    /// Maximum filename length.
    pub name_max: u32,
    /// Over-long names are rejected rather than truncated.
    pub no_trunc: bool,
    /// Ownership changes are restricted to privileged users.
    pub chown_restricted: bool,
    /// Names that differ only in case collide.
    pub case_insensitive: bool,
    /// The filesystem preserves the case of created names.
    pub case_preserving: bool,
}
XdrStruct!(
    PATHCONF3resok,
    obj_attributes,
    linkmax,
    name_max,
    no_trunc,
    chown_restricted,
    case_insensitive,
    case_preserving
);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PATHCONF3resfail {
    pub obj_attributes: post_op_attr,
}
XdrStruct!(PATHCONF3resfail, obj_attributes);

XdrResultUnion!(PATHCONF3res, PATHCONF3resok, PATHCONF3resfail);
