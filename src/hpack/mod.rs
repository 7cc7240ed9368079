pub mod decoder;
pub mod encoder;
pub mod field;
pub mod huffman;
pub mod integer;
pub mod table;

pub use decoder::{Decoder, DecoderError, StringDecodingError};
pub use encoder::{hpack_decode, hpack_encode, Encoder};
pub use field::{FieldRepresentation, HeaderField, HeaderList};
pub use huffman::HuffmanDecoderError;
pub use integer::{decode_integer, encode_integer, IntegerDecodingError};
pub use table::{HeaderTable, STATIC_TABLE_SIZE};
