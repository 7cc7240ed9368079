//! Exposes the struct `Decoder` that allows for HPACK-encoded header blocks to
//! be decoded into a header list.
//!
//! The decoder only follows HPACK rules, without performing any additional
//! (semantic) checks on the header name/value pairs, i.e. it considers the
//! headers as opaque octets.

use crate::{H2Error, H2Result};

use super::huffman::{self, HuffmanDecoderError};
use super::integer::{decode_integer, IntegerDecodingError};
use super::{FieldRepresentation, HeaderField, HeaderList, HeaderTable};

/// Represents all errors that can be encountered while decoding an octet
/// string.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum StringDecodingError {
    NotEnoughOctets,
    HuffmanDecoderError(HuffmanDecoderError),
}

/// Represents all errors that can be encountered while performing the decoding
/// of an HPACK header set.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum DecoderError {
    HeaderIndexOutOfBounds,
    IntegerDecodingError(IntegerDecodingError),
    StringDecodingError(StringDecodingError),
}

/// 首字节决定整个块的表示类型
enum BlockKind {
    Indexed,
    IncrementalIndexing,
    SizeUpdate,
    NeverIndexed,
    WithoutIndexing,
}

impl BlockKind {
    /// Based on the given octet, returns the type of the field representation.
    ///
    /// The given octet should be the top-order byte of the header field that
    /// is about to be decoded.
    fn new(octet: u8) -> BlockKind {
        if octet & 0x80 == 0x80 {
            // High-order bit set
            BlockKind::Indexed
        } else if octet & 0x40 == 0x40 {
            // Bit pattern `01`
            BlockKind::IncrementalIndexing
        } else if octet & 0x20 == 0x20 {
            // Bit pattern `001`
            BlockKind::SizeUpdate
        } else if octet & 0x10 == 0x10 {
            // Bit pattern `0001`
            BlockKind::NeverIndexed
        } else {
            // None of the top 4 bits is set => bit pattern `0000xxxx`
            BlockKind::WithoutIndexing
        }
    }
}

/// Decodes header blocks encoded using HPACK.
///
/// Blocks of one connection have to be fed in the order they arrived; the
/// dynamic table mutates as a side effect of decoding.
pub struct Decoder {
    pub table: HeaderTable,
}

impl Decoder {
    /// Creates a new `Decoder` whose dynamic table is bounded by the protocol
    /// default of 4096 octets.
    pub fn new() -> Decoder {
        Decoder {
            table: HeaderTable::new(),
        }
    }

    pub fn with_size(max_size: usize) -> Decoder {
        Decoder {
            table: HeaderTable::with_size(max_size),
        }
    }

    /// Sets a new maximum dynamic table size for the decoder.
    pub fn set_max_table_size(&mut self, new_max_size: usize) {
        self.table.update_size(new_max_size);
    }

    /// Decode the header block found in the given buffer.
    ///
    /// The buffer should represent the entire block that should be decoded.
    /// For example, in HTTP/2, all continuation frames need to be
    /// concatenated to a single buffer before passing them to the decoder.
    ///
    /// With `update_table == false` the block is decoded against a copy of
    /// the dynamic table and the decoder's own table stays untouched; pass
    /// the result to `update` to commit it later.
    pub fn decode(&mut self, buf: &[u8], update_table: bool) -> H2Result<HeaderList> {
        let mut header_list = Vec::new();
        self.decode_with_cb(buf, update_table, |field, repr| {
            header_list.push((field, repr))
        })?;
        Ok(header_list)
    }

    /// Decodes the headers found in the given buffer, invoking the callback
    /// for each decoded header in turn.
    ///
    /// If an error is encountered during the decoding of any header, decoding
    /// halts and the appropriate error is returned.
    pub fn decode_with_cb<F>(&mut self, buf: &[u8], update_table: bool, cb: F) -> H2Result<()>
    where
        F: FnMut(HeaderField, FieldRepresentation),
    {
        if update_table {
            let mut table = std::mem::take(&mut self.table);
            let ret = Self::decode_inner(&mut table, buf, cb);
            self.table = table;
            ret
        } else {
            let mut table = self.table.clone();
            Self::decode_inner(&mut table, buf, cb)
        }
    }

    /// Appends every `IncrementalIndexing` entry of an already decoded list
    /// to the dynamic table. Meant for callers that decoded with
    /// `update_table == false` and commit afterwards.
    pub fn update(&mut self, header_list: &HeaderList) {
        for (field, repr) in header_list.iter() {
            if *repr == FieldRepresentation::IncrementalIndexing {
                self.table.add(field.clone());
            }
        }
    }

    fn decode_inner<F>(table: &mut HeaderTable, buf: &[u8], mut cb: F) -> H2Result<()>
    where
        F: FnMut(HeaderField, FieldRepresentation),
    {
        let mut idx = 0;

        while idx < buf.len() {
            // At this point we are always at the beginning of the next block
            // within the HPACK data.
            let leftover = &buf[idx..];
            let repr = match BlockKind::new(buf[idx]) {
                BlockKind::Indexed => {
                    let (index, consumed) = decode_integer(leftover, 7)?;
                    idx += consumed;
                    let (name, value) = Self::resolve(table, index as usize)?;
                    cb(HeaderField::new(name, value), FieldRepresentation::Indexed);
                    continue;
                }
                BlockKind::SizeUpdate => {
                    // Not a header: adjust the table bound and emit nothing.
                    let (size, consumed) = decode_integer(leftover, 5)?;
                    idx += consumed;
                    table.update_size(size as usize);
                    continue;
                }
                BlockKind::IncrementalIndexing => FieldRepresentation::IncrementalIndexing,
                BlockKind::NeverIndexed => FieldRepresentation::NeverIndexed,
                BlockKind::WithoutIndexing => FieldRepresentation::WithoutIndexing,
            };

            let prefix = if repr == FieldRepresentation::IncrementalIndexing {
                6
            } else {
                4
            };
            let (name_index, consumed) = decode_integer(&buf[idx..], prefix)?;
            idx += consumed;

            // The name is either indexed, or a literal string follows.
            let (name, name_huffman) = if name_index == 0 {
                let (name, huffman, consumed) = Self::decode_string(&buf[idx..])?;
                idx += consumed;
                (name, huffman)
            } else {
                let (name, _) = Self::resolve(table, name_index as usize)?;
                (name, false)
            };

            // The value is always a literal string.
            let (value, value_huffman, consumed) = Self::decode_string(&buf[idx..])?;
            idx += consumed;

            let field = HeaderField::with_huffman(name, value, name_huffman, value_huffman);
            if repr == FieldRepresentation::IncrementalIndexing {
                table.add(field.clone());
            }
            cb(field, repr);
        }

        Ok(())
    }

    /// Gets the header (name, value) pair with the given index from the
    /// combined static/dynamic table, as owned buffers.
    fn resolve(table: &HeaderTable, index: usize) -> H2Result<(Vec<u8>, Vec<u8>)> {
        match table.get(index) {
            Some((name, value)) => Ok((name.to_vec(), value.to_vec())),
            None => Err(H2Error::Decoder(DecoderError::HeaderIndexOutOfBounds)),
        }
    }

    /// Decodes a length-prefixed octet string: one 7-bit prefix integer for
    /// the length, the high bit flagging huffman coding, then the body.
    fn decode_string(buf: &[u8]) -> H2Result<(Vec<u8>, bool, usize)> {
        if buf.is_empty() {
            return Err(H2Error::Decoder(DecoderError::StringDecodingError(
                StringDecodingError::NotEnoughOctets,
            )));
        }
        let huffman_coded = buf[0] & 0x80 == 0x80;
        let (len, consumed) = decode_integer(buf, 7)?;
        let len = len as usize;
        if consumed + len > buf.len() {
            return Err(H2Error::Decoder(DecoderError::StringDecodingError(
                StringDecodingError::NotEnoughOctets,
            )));
        }
        let raw = &buf[consumed..consumed + len];
        let bytes = if huffman_coded {
            match huffman::decode(raw) {
                Ok(decoded) => decoded,
                Err(e) => {
                    return Err(H2Error::Decoder(DecoderError::StringDecodingError(
                        StringDecodingError::HuffmanDecoderError(e),
                    )))
                }
            }
        } else {
            raw.to_vec()
        };
        Ok((bytes, huffman_coded, consumed + len))
    }
}

impl Default for Decoder {
    fn default() -> Decoder {
        Decoder::new()
    }
}
