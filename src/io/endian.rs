//! Byte-order-aware primitive reads.

use std::io::{self, Cursor, Read, Write};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::types::ByteOrder;

/// Reads fixed-width integers and floats in a byte order chosen at run time.
///
/// The order can change between reads; WKB switches it at every record header.
#[derive(Debug)]
pub struct EndianReader<R> {
    inner: R,
    order: ByteOrder,
}

macro_rules! read_primitive {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self) -> io::Result<$ty> {
            match self.order {
                ByteOrder::BigEndian => self.inner.$name::<BigEndian>(),
                ByteOrder::LittleEndian => self.inner.$name::<LittleEndian>(),
            }
        }
    };
}

impl<R: Read> EndianReader<R> {
    pub fn new(inner: R, order: ByteOrder) -> Self {
        Self { inner, order }
    }

    #[inline] pub fn byte_order(&self) -> ByteOrder { self.order }

    #[inline] pub fn set_byte_order(&mut self, order: ByteOrder) { self.order = order; }

    #[inline] pub fn into_inner(self) -> R { self.inner }

    #[inline]
    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.inner.read_u8()
    }

    read_primitive!(read_i16, i16);
    read_primitive!(read_u16, u16);
    read_primitive!(read_i32, i32);
    read_primitive!(read_u32, u32);
    read_primitive!(read_i64, i64);
    read_primitive!(read_u64, u64);
    read_primitive!(read_f32, f32);
    read_primitive!(
        /// Read an IEEE-754 double; NaN payloads are preserved bit for bit.
        read_f64, f64
    );
}

impl<T: AsRef<[u8]>> EndianReader<Cursor<T>> {
    /// Bytes left before the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        let len = self.inner.get_ref().as_ref().len() as u64;
        len.saturating_sub(self.inner.position()) as usize
    }

    /// Current offset into the buffer.
    #[inline]
    pub fn position(&self) -> u64 {
        self.inner.position()
    }
}

/// Writes fixed-width values in a byte order chosen at run time.
#[derive(Debug)]
pub struct EndianWriter<W> {
    inner: W,
    order: ByteOrder,
}

macro_rules! write_primitive {
    ($name:ident, $ty:ty) => {
        #[inline]
        pub fn $name(&mut self, value: $ty) -> io::Result<()> {
            match self.order {
                ByteOrder::BigEndian => self.inner.$name::<BigEndian>(value),
                ByteOrder::LittleEndian => self.inner.$name::<LittleEndian>(value),
            }
        }
    };
}

impl<W: Write> EndianWriter<W> {
    pub fn new(inner: W, order: ByteOrder) -> Self {
        Self { inner, order }
    }

    #[inline] pub fn byte_order(&self) -> ByteOrder { self.order }

    #[inline] pub fn into_inner(self) -> W { self.inner }

    #[inline]
    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.inner.write_u8(value)
    }

    write_primitive!(write_u32, u32);
    write_primitive!(write_i32, i32);
    write_primitive!(write_f64, f64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ByteOrder::BigEndian, [0x01, 0x02], 0x0102)]
    #[case(ByteOrder::LittleEndian, [0x01, 0x02], 0x0201)]
    fn u16_follows_order(#[case] order: ByteOrder, #[case] bytes: [u8; 2], #[case] expected: u16) {
        let mut reader = EndianReader::new(Cursor::new(bytes), order);
        assert_eq!(reader.read_u16().unwrap(), expected);
    }

    #[test]
    fn signed_values_and_switching() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFE, 0xFE, 0xFF, 0xFF, 0xFF];
        let mut reader = EndianReader::new(Cursor::new(&bytes[..]), ByteOrder::BigEndian);
        assert_eq!(reader.read_i32().unwrap(), -2);
        reader.set_byte_order(ByteOrder::LittleEndian);
        assert_eq!(reader.read_i32().unwrap(), -2);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn doubles_both_orders() {
        let mut bytes = 1.5f64.to_be_bytes().to_vec();
        bytes.extend_from_slice(&(-0.25f64).to_le_bytes());
        let mut reader = EndianReader::new(Cursor::new(bytes), ByteOrder::BigEndian);
        assert_eq!(reader.read_f64().unwrap(), 1.5);
        reader.set_byte_order(ByteOrder::LittleEndian);
        assert_eq!(reader.read_f64().unwrap(), -0.25);
    }

    #[test]
    fn sixty_four_bit_and_single_precision() {
        let mut bytes = u64::MAX.to_le_bytes().to_vec();
        bytes.extend_from_slice(&(-7i64).to_le_bytes());
        bytes.extend_from_slice(&2.5f32.to_le_bytes());
        let mut reader = EndianReader::new(Cursor::new(bytes), ByteOrder::LittleEndian);
        assert_eq!(reader.read_u64().unwrap(), u64::MAX);
        assert_eq!(reader.read_i64().unwrap(), -7);
        assert_eq!(reader.read_f32().unwrap(), 2.5);
    }

    #[test]
    fn writer_mirrors_reader() {
        let mut writer = EndianWriter::new(Vec::new(), ByteOrder::BigEndian);
        writer.write_u32(0x0102_0304).unwrap();
        writer.write_f64(-3.75).unwrap();
        let bytes = writer.into_inner();
        assert_eq!(&bytes[..4], &[1, 2, 3, 4]);

        let mut reader = EndianReader::new(Cursor::new(bytes), ByteOrder::BigEndian);
        assert_eq!(reader.read_u32().unwrap(), 0x0102_0304);
        assert_eq!(reader.read_f64().unwrap(), -3.75);
    }

    #[test]
    fn truncated_stream_is_eof() {
        let mut reader = EndianReader::new(Cursor::new([0u8; 3]), ByteOrder::LittleEndian);
        let err = reader.read_u32().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
