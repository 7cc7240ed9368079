/// A single header, a pair of opaque octet strings. The two flags record
/// whether the literal was (or must be) huffman coded on the wire; they are
/// carried alongside the pair but do not take part in equality.
#[derive(Debug, Clone, Default)]
pub struct HeaderField {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
    pub name_huffman: bool,
    pub value_huffman: bool,
}

impl HeaderField {
    pub fn new<N: Into<Vec<u8>>, V: Into<Vec<u8>>>(name: N, value: V) -> HeaderField {
        HeaderField {
            name: name.into(),
            value: value.into(),
            name_huffman: false,
            value_huffman: false,
        }
    }

    pub fn with_huffman<N: Into<Vec<u8>>, V: Into<Vec<u8>>>(
        name: N,
        value: V,
        name_huffman: bool,
        value_huffman: bool,
    ) -> HeaderField {
        HeaderField {
            name: name.into(),
            value: value.into(),
            name_huffman,
            value_huffman,
        }
    }

    /// 表项在动态表中占用的八位组数, RFC 7541 4.1
    pub fn size(&self) -> usize {
        self.name.len() + self.value.len() + 32
    }
}

impl PartialEq for HeaderField {
    fn eq(&self, other: &HeaderField) -> bool {
        self.name == other.name && self.value == other.value
    }
}

impl Eq for HeaderField {}

/// Different variants of how a particular header field can be represented in
/// an HPACK encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldRepresentation {
    /// Name and value both resolved from a table entry.
    Indexed,
    /// Literal that MUST be inserted into the dynamic table.
    IncrementalIndexing,
    /// Literal that is not inserted.
    WithoutIndexing,
    /// As `WithoutIndexing`, and intermediaries must never index it either.
    NeverIndexed,
}

/// A header list as produced by the decoder and consumed by the encoder.
pub type HeaderList = Vec<(HeaderField, FieldRepresentation)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_huffman_flags() {
        let plain = HeaderField::new(&b"cookie"[..], &b"a=b"[..]);
        let coded = HeaderField::with_huffman(&b"cookie"[..], &b"a=b"[..], true, true);
        assert_eq!(plain, coded);
    }

    #[test]
    fn entry_size() {
        // RFC 7541 C.3: (custom-key, custom-value) occupies 54 octets
        let field = HeaderField::new(&b"custom-key"[..], &b"custom-value"[..]);
        assert_eq!(field.size(), 54);
    }
}
