//! Exposes the struct `Encoder` that turns a header list into an
//! HPACK-encoded header block fragment.
//!
//! The encoder mirrors the decoder: blocks produced for one connection must
//! be emitted in order, since incrementally indexed literals mutate the
//! dynamic table as a side effect.

use crate::{Buffer, H2Result};

use super::huffman;
use super::integer::encode_integer;
use super::{FieldRepresentation, HeaderList, HeaderTable};

pub struct Encoder {
    pub table: HeaderTable,
}

impl Encoder {
    pub fn new() -> Encoder {
        Encoder {
            table: HeaderTable::new(),
        }
    }

    pub fn with_size(max_size: usize) -> Encoder {
        Encoder {
            table: HeaderTable::with_size(max_size),
        }
    }

    /// Sets a new maximum dynamic table size for the encoder.
    pub fn set_max_table_size(&mut self, new_max_size: usize) {
        self.table.update_size(new_max_size);
    }

    /// Encodes the given header list, appending the block to `out`.
    ///
    /// Returns the number of octets appended. With `update_table == false`
    /// the encoding runs against a copy of the dynamic table, leaving the
    /// sender's own table untouched.
    pub fn encode(
        &mut self,
        headers: &HeaderList,
        update_table: bool,
        out: &mut Buffer,
    ) -> H2Result<usize> {
        if update_table {
            let mut table = std::mem::take(&mut self.table);
            let ret = Self::encode_inner(&mut table, headers, out);
            self.table = table;
            ret
        } else {
            let mut table = self.table.clone();
            Self::encode_inner(&mut table, headers, out)
        }
    }

    fn encode_inner(
        table: &mut HeaderTable,
        headers: &HeaderList,
        out: &mut Buffer,
    ) -> H2Result<usize> {
        let start = out.len();

        for (field, repr) in headers.iter() {
            let mut repr = *repr;

            if repr == FieldRepresentation::Indexed {
                let index = table.find(&field.name, &field.value);
                if index > 0 {
                    encode_integer(out, index as u32, 7, 0x80)?;
                    continue;
                }
                // Not resolvable from any table: downgrade and emit the
                // literal so it becomes indexable for the next blocks.
                repr = FieldRepresentation::IncrementalIndexing;
            }

            let (prefix, pad) = match repr {
                FieldRepresentation::IncrementalIndexing => (6, 0x40),
                FieldRepresentation::WithoutIndexing => (4, 0x00),
                FieldRepresentation::NeverIndexed => (4, 0x10),
                FieldRepresentation::Indexed => unreachable!(),
            };

            let name_index = table.find(&field.name, b"");
            if name_index > 0 {
                encode_integer(out, name_index as u32, prefix, pad)?;
            } else {
                encode_integer(out, 0, prefix, pad)?;
                Self::encode_string(out, &field.name, field.name_huffman)?;
            }
            Self::encode_string(out, &field.value, field.value_huffman)?;

            if repr == FieldRepresentation::IncrementalIndexing {
                table.add(field.clone());
            }
        }

        log::trace!("HPACK: 编码头块大小 {}", out.len() - start);
        Ok(out.len() - start)
    }

    /// Emits a length-prefixed string, huffman coded when requested.
    fn encode_string(out: &mut Buffer, bytes: &[u8], huffman_coded: bool) -> H2Result<()> {
        if huffman_coded {
            let mut coded = Buffer::new();
            huffman::encode(bytes, &mut coded);
            encode_integer(out, coded.len() as u32, 7, 0x80)?;
            out.append_buffer(&coded);
        } else {
            encode_integer(out, bytes.len() as u32, 7, 0x00)?;
            out.append_slice(bytes);
        }
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Encoder {
        Encoder::new()
    }
}

/// Convenience pair used by tests and by callers that keep the two
/// directions of one endpoint together.
pub fn hpack_encode(
    encoder: &mut Encoder,
    headers: &HeaderList,
    out: &mut Buffer,
) -> H2Result<usize> {
    encoder.encode(headers, true, out)
}

pub fn hpack_decode(decoder: &mut super::Decoder, buf: &[u8]) -> H2Result<HeaderList> {
    decoder.decode(buf, true)
}

#[cfg(test)]
mod tests {
    use super::super::{Decoder, HeaderField};
    use super::*;

    fn field(name: &str, value: &str) -> HeaderField {
        HeaderField::new(name.as_bytes(), value.as_bytes())
    }

    #[test]
    fn indexed_static_header() {
        let mut encoder = Encoder::new();
        let mut out = Buffer::new();
        let headers = vec![(field(":method", "GET"), FieldRepresentation::Indexed)];
        encoder.encode(&headers, true, &mut out).unwrap();
        assert_eq!(out.as_slice(), &[0x82]);
        assert_eq!(encoder.table.len(), 0);
    }

    #[test]
    fn literal_with_indexing_rfc_c_2_1() {
        let mut encoder = Encoder::new();
        let mut out = Buffer::new();
        let headers = vec![(
            field("custom-key", "custom-header"),
            FieldRepresentation::IncrementalIndexing,
        )];
        encoder.encode(&headers, true, &mut out).unwrap();
        assert_eq!(
            out.as_slice(),
            &[
                0x40, 0x0a, 0x63, 0x75, 0x73, 0x74, 0x6f, 0x6d, 0x2d, 0x6b, 0x65, 0x79, 0x0d,
                0x63, 0x75, 0x73, 0x74, 0x6f, 0x6d, 0x2d, 0x68, 0x65, 0x61, 0x64, 0x65, 0x72
            ]
        );
        assert_eq!(encoder.table.len(), 1);
        assert_eq!(encoder.table.find(b"custom-key", b"custom-header"), 62);
    }

    #[test]
    fn literal_without_indexing_rfc_c_2_2() {
        let mut encoder = Encoder::new();
        let mut out = Buffer::new();
        let headers = vec![(field(":path", "/sample/path"), FieldRepresentation::WithoutIndexing)];
        encoder.encode(&headers, true, &mut out).unwrap();
        assert_eq!(
            out.as_slice(),
            &[
                0x04, 0x0c, 0x2f, 0x73, 0x61, 0x6d, 0x70, 0x6c, 0x65, 0x2f, 0x70, 0x61, 0x74,
                0x68
            ]
        );
        assert_eq!(encoder.table.len(), 0);
    }

    #[test]
    fn never_indexed_rfc_c_2_3() {
        let mut encoder = Encoder::new();
        let mut out = Buffer::new();
        let headers = vec![(field("password", "secret"), FieldRepresentation::NeverIndexed)];
        encoder.encode(&headers, true, &mut out).unwrap();
        assert_eq!(
            out.as_slice(),
            &[
                0x10, 0x08, 0x70, 0x61, 0x73, 0x73, 0x77, 0x6f, 0x72, 0x64, 0x06, 0x73, 0x65,
                0x63, 0x72, 0x65, 0x74
            ]
        );
        assert_eq!(encoder.table.len(), 0);
    }

    #[test]
    fn indexed_miss_downgrades_to_incremental() {
        let mut encoder = Encoder::new();
        let mut out = Buffer::new();
        let headers = vec![(field("custom-key", "custom-header"), FieldRepresentation::Indexed)];
        encoder.encode(&headers, true, &mut out).unwrap();
        // Same bytes as the explicit incremental literal.
        assert_eq!(out.get(0), Some(0x40));
        assert_eq!(encoder.table.len(), 1);

        // A second block now finds the entry and emits a single index octet.
        let mut out = Buffer::new();
        let headers = vec![(field("custom-key", "custom-header"), FieldRepresentation::Indexed)];
        encoder.encode(&headers, true, &mut out).unwrap();
        assert_eq!(out.as_slice(), &[0xBE]);
    }

    #[test]
    fn no_update_encodes_against_copy() {
        let mut encoder = Encoder::new();
        let mut out = Buffer::new();
        let headers = vec![(
            field("custom-key", "custom-header"),
            FieldRepresentation::IncrementalIndexing,
        )];
        encoder.encode(&headers, false, &mut out).unwrap();
        assert_eq!(encoder.table.len(), 0);
    }

    #[test]
    fn encoder_and_decoder_stay_in_step() {
        let mut encoder = Encoder::new();
        let mut decoder = Decoder::new();

        for round in 0..3 {
            let value = format!("round-{}", round);
            let headers = vec![
                (field(":method", "GET"), FieldRepresentation::Indexed),
                (
                    field("x-trace", value.as_str()),
                    FieldRepresentation::IncrementalIndexing,
                ),
            ];
            let mut block = Buffer::new();
            encoder.encode(&headers, true, &mut block).unwrap();
            let decoded = decoder.decode(block.as_slice(), true).unwrap();
            assert_eq!(decoded, headers);
            assert_eq!(encoder.table.len(), decoder.table.len());
            assert_eq!(encoder.table.size(), decoder.table.size());
        }
    }
}
