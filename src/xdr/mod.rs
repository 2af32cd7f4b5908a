//! XDR (External Data Representation, RFC 4506) encoding and decoding.
//!
//! ONC RPC and NFS both describe their wire formats in the XDR language;
//! this module provides the Rust-side codec. Where appropriate the standard
//! XDR types are replaced by the closest Rust equivalents: the 32-bit
//! `Integer` becomes `i32`, `opaque<>` becomes `[u8]`/`Vec<u8>`, and XDR
//! optional-data becomes `Option<T>`. All alignment and padding guarantees
//! of the XDR standard are respected by these implementations.

use std::io::{Read, Write};

use byteorder::BigEndian;
use byteorder::{ReadBytesExt, WriteBytesExt};
use num_traits::ToPrimitive;

pub mod nfs3;
pub mod rpc;

/// XDR mandates big endian encoding for all fixed-width integers.
pub type XdrEndian = BigEndian;

/// Every XDR item occupies a multiple of four bytes on the wire.
const ALIGNMENT: usize = 4;

/// Number of zero bytes needed to pad `len` bytes of opaque data out to the
/// XDR four byte boundary.
fn pad_len(len: usize) -> usize {
    (ALIGNMENT - len % ALIGNMENT) % ALIGNMENT
}

fn write_padding(len: usize, dest: &mut impl Write) -> std::io::Result<()> {
    let padding = [0_u8; ALIGNMENT];
    dest.write_all(&padding[..pad_len(len)])
}

fn read_padding(len: usize, src: &mut impl Read) -> std::io::Result<()> {
    let mut padding = [0_u8; ALIGNMENT];
    src.read_exact(&mut padding[..pad_len(len)])
}

pub(crate) fn invalid_data(m: impl Into<String>) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, m.into())
}

pub trait Serialize {
    /// Serializes the value into `dest` in XDR representation.
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()>;
}

pub trait Deserialize {
    /// Deserializes an XDR representation from `src` into `self`.
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()>;
}

/// Deserializes a fresh value, starting from its [Default].
pub fn deserialize<T>(src: &mut impl Read) -> std::io::Result<T>
where
    T: Deserialize + Default,
{
    let mut val = T::default();
    val.deserialize(src)?;
    Ok(val)
}

/// XDR `bool`:
///
/// ```text
/// bool identifier;
/// ```
///
/// is by definition `enum { FALSE = 0, TRUE = 1 }` and therefore encoded as
/// a signed 32-bit integer.
impl Serialize for bool {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_i32::<XdrEndian>(i32::from(*self))
    }
}

impl Deserialize for bool {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match src.read_i32::<XdrEndian>()? {
            0 => *self = false,
            1 => *self = true,
            other => return Err(invalid_data(format!("invalid bool value: {other}"))),
        }
        Ok(())
    }
}

/// XDR `int`.
impl Serialize for i32 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_i32::<XdrEndian>(*self)
    }
}

impl Deserialize for i32 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = src.read_i32::<XdrEndian>()?;
        Ok(())
    }
}

/// XDR `unsigned int`.
impl Serialize for u32 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_u32::<XdrEndian>(*self)
    }
}

impl Deserialize for u32 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = src.read_u32::<XdrEndian>()?;
        Ok(())
    }
}

/// XDR `hyper`.
impl Serialize for i64 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_i64::<XdrEndian>(*self)
    }
}

impl Deserialize for i64 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = src.read_i64::<XdrEndian>()?;
        Ok(())
    }
}

/// XDR `unsigned hyper`.
impl Serialize for u64 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_u64::<XdrEndian>(*self)
    }
}

impl Deserialize for u64 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = src.read_u64::<XdrEndian>()?;
        Ok(())
    }
}

/// XDR Fixed-Length Opaque Data:
///
/// ```text
/// opaque identifier[n];
/// ```
impl<const N: usize> Serialize for [u8; N] {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_all(self)?;
        write_padding(N, dest)
    }
}

impl<const N: usize> Deserialize for [u8; N] {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        src.read_exact(self)?;
        read_padding(N, src)
    }
}

/// XDR lengths are always 32-bit; this wrapper bridges Rust's `usize`.
#[derive(Default)]
struct UsizeAsU32(usize);

impl Serialize for UsizeAsU32 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        let Some(val) = self.0.to_u32() else {
            return Err(invalid_data("length does not fit in u32"));
        };
        val.serialize(dest)
    }
}

impl Deserialize for UsizeAsU32 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let Some(val) = deserialize::<u32>(src)?.to_usize() else {
            return Err(invalid_data("length does not fit in usize"));
        };
        self.0 = val;
        Ok(())
    }
}

/// XDR Variable-Length Opaque Data: a length prefix, the bytes, padding.
impl Serialize for [u8] {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        UsizeAsU32(self.len()).serialize(dest)?;
        dest.write_all(self)?;
        write_padding(self.len(), dest)
    }
}

impl Serialize for Vec<u8> {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.as_slice().serialize(dest)
    }
}

impl Deserialize for Vec<u8> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let length = deserialize::<UsizeAsU32>(src)?.0;
        self.resize(length, 0);
        src.read_exact(self)?;
        read_padding(length, src)
    }
}

/// XDR Variable-Length Array of unsigned integers, used by the AUTH_UNIX
/// group list: a length prefix followed by that many 4-byte values.
impl Serialize for [u32] {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        UsizeAsU32(self.len()).serialize(dest)?;
        for item in self {
            item.serialize(dest)?;
        }
        Ok(())
    }
}

impl Serialize for Vec<u32> {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.as_slice().serialize(dest)
    }
}

impl Deserialize for Vec<u32> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let length = deserialize::<UsizeAsU32>(src)?.0;
        self.clear();
        self.reserve(length.min(64));
        for _ in 0..length {
            self.push(deserialize(src)?);
        }
        Ok(())
    }
}

/// XDR Optional-Data:
///
/// ```text
/// type-name *identifier;
/// ```
///
/// encoded as a boolean discriminant followed by the value when present.
impl<T: Serialize> Serialize for Option<T> {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            Some(data) => {
                true.serialize(dest)?;
                data.serialize(dest)
            }
            None => false.serialize(dest),
        }
    }
}

impl<T: Deserialize + Default> Deserialize for Option<T> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = if deserialize::<bool>(src)? {
            Some(deserialize::<T>(src)?)
        } else {
            None
        };
        Ok(())
    }
}

/// Implements [Serialize] and [Deserialize] for a struct by encoding each
/// named field in declaration order, as the XDR language specifies. Both
/// traits must be in scope at the expansion site: field access uses method
/// syntax so that `Vec<u8>` fields reach the slice impls by auto-deref.
#[macro_export]
macro_rules! XdrStruct {
    ($t:ident $(, $field:ident)* $(,)?) => {
        impl $crate::xdr::Serialize for $t {
            fn serialize<W: std::io::Write>(&self, dest: &mut W) -> std::io::Result<()> {
                $(self.$field.serialize(dest)?;)*
                Ok(())
            }
        }

        impl $crate::xdr::Deserialize for $t {
            fn deserialize<R: std::io::Read>(&mut self, src: &mut R) -> std::io::Result<()> {
                $(self.$field.deserialize(src)?;)*
                Ok(())
            }
        }
    };
}

/// Implements [Serialize] and [Deserialize] for a fieldless enum deriving
/// `FromPrimitive`/`ToPrimitive`. XDR enumerations share the representation
/// of signed integers; values outside the enumeration are a decode error.
#[macro_export]
macro_rules! XdrEnum {
    ($t:ident) => {
        impl $crate::xdr::Serialize for $t {
            fn serialize<W: std::io::Write>(&self, dest: &mut W) -> std::io::Result<()> {
                match num_traits::ToPrimitive::to_i32(self) {
                    Some(val) => $crate::xdr::Serialize::serialize(&val, dest),
                    None => Err($crate::xdr::invalid_data(concat!(
                        "unencodable ",
                        stringify!($t),
                        " value"
                    ))),
                }
            }
        }

        impl $crate::xdr::Deserialize for $t {
            fn deserialize<R: std::io::Read>(&mut self, src: &mut R) -> std::io::Result<()> {
                let val = $crate::xdr::deserialize::<i32>(src)?;
                match num_traits::FromPrimitive::from_i32(val) {
                    Some(val) => {
                        *self = val;
                        Ok(())
                    }
                    None => Err($crate::xdr::invalid_data(format!(
                        "invalid {} value: {val}",
                        stringify!($t)
                    ))),
                }
            }
        }
    };
}

pub use crate::XdrEnum;
pub use crate::XdrStruct;
