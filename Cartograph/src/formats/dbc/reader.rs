//! Fixed-width record table reader

use std::io::{Cursor, Read};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

use super::{HEADER_SIZE, MAGIC};
use crate::error::{Error, Result};

/// Parsed WDBC header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbcHeader {
    pub magic: [u8; 4],
    pub record_count: u32,
    pub field_count: u32,
    pub record_size: u32,
    pub string_block_size: u32,
}

impl DbcHeader {
    /// Absolute offset of the string pool.
    #[must_use]
    pub fn string_block_offset(&self) -> usize {
        HEADER_SIZE + self.record_count as usize * self.record_size as usize
    }
}

/// A schema that can be decoded from one raw record.
pub trait FromRecord: Sized {
    /// Decode a typed row from `record`.
    ///
    /// # Errors
    /// Returns an error if a field lies outside the record.
    fn from_record(record: &Record<'_>) -> Result<Self>;
}

/// A borrowed view over a WDBC table.
#[derive(Debug, Clone, Copy)]
pub struct RecordTable<'a> {
    header: DbcHeader,
    records: &'a [u8],
    strings: &'a [u8],
}

impl<'a> RecordTable<'a> {
    /// Parse the header and split `data` into records and string pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDbcMagic`] if the table does not start with `WDBC`.
    /// Returns [`Error::DbcTruncated`] if the buffer is shorter than the header describes.
    ///
    /// [`Error::InvalidDbcMagic`]: crate::Error::InvalidDbcMagic
    /// [`Error::DbcTruncated`]: crate::Error::DbcTruncated
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::DbcTruncated {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let mut cursor = Cursor::new(data);

        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(Error::InvalidDbcMagic(magic));
        }

        let record_count = cursor.read_u32::<LittleEndian>()?;
        let field_count = cursor.read_u32::<LittleEndian>()?;
        let record_size = cursor.read_u32::<LittleEndian>()?;
        let string_block_size = cursor.read_u32::<LittleEndian>()?;

        let header = DbcHeader {
            magic,
            record_count,
            field_count,
            record_size,
            string_block_size,
        };

        // Saturating: the error carries the size the header asks for.
        let records_len = (record_count as usize).saturating_mul(record_size as usize);
        let string_end = HEADER_SIZE
            .saturating_add(records_len)
            .saturating_add(string_block_size as usize);

        if data.len() < string_end {
            return Err(Error::DbcTruncated {
                expected: string_end,
                actual: data.len(),
            });
        }
        let string_start = HEADER_SIZE + records_len;

        Ok(Self {
            header,
            records: &data[HEADER_SIZE..string_start],
            strings: &data[string_start..string_end],
        })
    }

    #[must_use]
    pub fn header(&self) -> &DbcHeader {
        &self.header
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.header.record_count as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record at `index`, if in range.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<Record<'a>> {
        if index >= self.len() {
            return None;
        }
        let size = self.header.record_size as usize;
        let start = index * size;
        Some(Record {
            index,
            bytes: &self.records[start..start + size],
            strings: self.strings,
        })
    }

    /// All records in file order.
    pub fn records(&self) -> impl Iterator<Item = Record<'a>> + '_ {
        (0..self.len()).filter_map(|i| self.record(i))
    }

    /// Resolve a string-pool offset.
    #[must_use]
    pub fn string(&self, offset: u32) -> String {
        read_pool_string(self.strings, offset)
    }

    /// Decode every record with schema `T`.
    ///
    /// # Errors
    /// Returns the first error reported by `T::from_record`.
    pub fn decode<T: FromRecord>(&self) -> Result<Vec<T>> {
        self.records().map(|r| T::from_record(&r)).collect()
    }
}

/// One fixed-width record.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    index: usize,
    bytes: &'a [u8],
    strings: &'a [u8],
}

impl<'a> Record<'a> {
    /// Position of this record in the table.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The raw record bytes.
    #[must_use]
    pub fn raw(&self) -> &'a [u8] {
        self.bytes
    }

    fn field(&self, offset: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(4)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(Error::DbcFieldOutOfBounds {
                offset,
                record_size: self.bytes.len(),
            })
    }

    /// Little-endian `u32` at `offset`.
    ///
    /// # Errors
    /// Returns [`Error::DbcFieldOutOfBounds`] if the field exceeds the record.
    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        self.field(offset).map(LittleEndian::read_u32)
    }

    /// Little-endian `i32` at `offset`.
    ///
    /// # Errors
    /// Returns [`Error::DbcFieldOutOfBounds`] if the field exceeds the record.
    pub fn i32_at(&self, offset: usize) -> Result<i32> {
        self.field(offset).map(LittleEndian::read_i32)
    }

    /// Little-endian IEEE-754 `f32` at `offset`.
    ///
    /// # Errors
    /// Returns [`Error::DbcFieldOutOfBounds`] if the field exceeds the record.
    pub fn f32_at(&self, offset: usize) -> Result<f32> {
        self.field(offset).map(LittleEndian::read_f32)
    }

    /// String whose pool offset is stored at `offset`.
    ///
    /// Offsets past the pool yield an empty string.
    ///
    /// # Errors
    /// Returns [`Error::DbcFieldOutOfBounds`] if the field exceeds the record.
    pub fn string_at(&self, offset: usize) -> Result<String> {
        let pool_offset = self.u32_at(offset)?;
        Ok(read_pool_string(self.strings, pool_offset))
    }
}

/// NUL-terminated, lossily decoded UTF-8 starting at `offset` in `pool`.
fn read_pool_string(pool: &[u8], offset: u32) -> String {
    let Some(tail) = pool.get(offset as usize..) else {
        return String::new();
    };
    let len = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    String::from_utf8_lossy(&tail[..len]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use pretty_assertions::assert_eq;

    fn table(records: &[[u32; 2]], pool: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC);
        data.write_u32::<LittleEndian>(records.len() as u32).unwrap();
        data.write_u32::<LittleEndian>(2).unwrap();
        data.write_u32::<LittleEndian>(8).unwrap();
        data.write_u32::<LittleEndian>(pool.len() as u32).unwrap();
        for record in records {
            data.write_u32::<LittleEndian>(record[0]).unwrap();
            data.write_u32::<LittleEndian>(record[1]).unwrap();
        }
        data.extend_from_slice(pool);
        data
    }

    #[test]
    fn test_header_fields() {
        let data = table(&[[1, 0], [2, 5]], b"\0first\0");
        let table = RecordTable::parse(&data).unwrap();

        assert_eq!(table.header().record_count, 2);
        assert_eq!(table.header().field_count, 2);
        assert_eq!(table.header().record_size, 8);
        assert_eq!(table.header().string_block_offset(), 36);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_record_fields_and_strings() {
        let data = table(&[[7, 1], [9, 7]], b"\0alpha\0beta\0");
        let table = RecordTable::parse(&data).unwrap();

        let second = table.record(1).unwrap();
        assert_eq!(second.index(), 1);
        assert_eq!(second.u32_at(0).unwrap(), 9);
        assert_eq!(second.string_at(4).unwrap(), "beta");
        assert_eq!(table.record(0).unwrap().string_at(4).unwrap(), "alpha");
        assert!(table.record(2).is_none());
    }

    #[test]
    fn test_string_offset_past_pool_is_empty() {
        let data = table(&[[1, 400]], b"\0abc\0");
        let table = RecordTable::parse(&data).unwrap();

        assert_eq!(table.record(0).unwrap().string_at(4).unwrap(), "");
        assert_eq!(table.string(5), "");
    }

    #[test]
    fn test_unterminated_and_invalid_utf8_strings() {
        let data = table(&[[1, 1]], b"\0ok\xFFend");
        let table = RecordTable::parse(&data).unwrap();

        assert_eq!(table.string(1), "ok\u{FFFD}end");
    }

    #[test]
    fn test_field_out_of_bounds() {
        let data = table(&[[1, 1]], b"\0");
        let table = RecordTable::parse(&data).unwrap();

        assert!(matches!(
            table.record(0).unwrap().f32_at(6),
            Err(Error::DbcFieldOutOfBounds {
                offset: 6,
                record_size: 8
            })
        ));
    }

    #[test]
    fn test_bad_magic() {
        let mut data = table(&[[1, 1]], b"\0");
        data[..4].copy_from_slice(b"WDB2");

        assert!(matches!(
            RecordTable::parse(&data),
            Err(Error::InvalidDbcMagic(magic)) if &magic == b"WDB2"
        ));
    }

    #[test]
    fn test_truncated_table() {
        let data = table(&[[1, 1], [2, 2]], b"\0name\0");

        assert!(matches!(
            RecordTable::parse(&data[..30]),
            Err(Error::DbcTruncated {
                expected: 42,
                actual: 30
            })
        ));
        assert!(matches!(
            RecordTable::parse(&data[..12]),
            Err(Error::DbcTruncated { expected: 20, .. })
        ));
    }

    #[test]
    fn test_huge_header_reports_requested_size() {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC);
        data.write_u32::<LittleEndian>(u32::MAX).unwrap();
        data.write_u32::<LittleEndian>(1).unwrap();
        data.write_u32::<LittleEndian>(u32::MAX).unwrap();
        data.write_u32::<LittleEndian>(16).unwrap();

        let requested = (u32::MAX as u128) * (u32::MAX as u128) + 36;
        let expected_size = usize::try_from(requested).unwrap_or(usize::MAX);
        let err = RecordTable::parse(&data).unwrap_err();

        assert!(matches!(
            err,
            Error::DbcTruncated { expected, actual: 20 } if expected == expected_size
        ));
        #[cfg(target_pointer_width = "64")]
        assert_ne!(expected_size, usize::MAX);
    }

    #[test]
    fn test_zero_width_records() {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC);
        data.write_u32::<LittleEndian>(3).unwrap();
        data.write_u32::<LittleEndian>(0).unwrap();
        data.write_u32::<LittleEndian>(0).unwrap();
        data.write_u32::<LittleEndian>(0).unwrap();

        let table = RecordTable::parse(&data).unwrap();
        assert_eq!(table.records().count(), 3);
        assert!(table.record(0).unwrap().u32_at(0).is_err());
    }
}
