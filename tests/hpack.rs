use h2parse::hpack::{huffman, Decoder, Encoder};
use h2parse::{Buffer, FieldRepresentation, H2Error, HeaderField, HeaderList, Helper};

fn field(name: &str, value: &str) -> HeaderField {
    HeaderField::new(name.as_bytes(), value.as_bytes())
}

fn indexed(name: &str, value: &str) -> (HeaderField, FieldRepresentation) {
    (field(name, value), FieldRepresentation::Indexed)
}

fn incremental(name: &str, value: &str) -> (HeaderField, FieldRepresentation) {
    (field(name, value), FieldRepresentation::IncrementalIndexing)
}

fn names(list: &HeaderList) -> Vec<(String, String)> {
    list.iter()
        .map(|(f, _)| {
            (
                String::from_utf8_lossy(&f.name).to_string(),
                String::from_utf8_lossy(&f.value).to_string(),
            )
        })
        .collect()
}

/// https://httpwg.org/specs/rfc7541.html#rfc.section.C.1.2
#[test]
fn integer_with_five_bit_prefix() {
    let mut out = Buffer::new();
    h2parse::hpack::encode_integer(&mut out, 1337, 5, 0).unwrap();
    assert_eq!(out.as_slice(), &Helper::hex_to_vec("1f9a 0a")[..]);

    let (value, used) = h2parse::hpack::decode_integer(out.as_slice(), 5).unwrap();
    assert_eq!(value, 1337);
    assert_eq!(used, 3);
}

#[test]
fn indexed_static_header_round_trip() {
    // Encoding [:method GET] as indexed hits static index 2.
    let mut encoder = Encoder::new();
    let mut block = Buffer::new();
    let headers = vec![indexed(":method", "GET")];
    encoder.encode(&headers, true, &mut block).unwrap();
    assert_eq!(block.as_slice(), &[0x82]);
    assert_eq!(encoder.table.len(), 0);

    let mut decoder = Decoder::new();
    let decoded = decoder.decode(block.as_slice(), true).unwrap();
    assert_eq!(decoded, headers);
    assert_eq!(decoder.table.len(), 0);
}

/// https://httpwg.org/specs/rfc7541.html#rfc.section.C.2.1
#[test]
fn literal_with_incremental_indexing() {
    let bytes =
        Helper::hex_to_vec("400a 6375 7374 6f6d 2d6b 6579 0d63 7573 746f 6d2d 6865 6164 6572");

    let mut decoder = Decoder::new();
    let decoded = decoder.decode(&bytes, true).unwrap();
    assert_eq!(decoded, vec![incremental("custom-key", "custom-header")]);
    assert_eq!(decoder.table.len(), 1);
    assert_eq!(decoder.table.size(), 55);
    assert_eq!(decoder.table.find(b"custom-key", b"custom-header"), 62);

    let mut encoder = Encoder::new();
    let mut block = Buffer::new();
    encoder
        .encode(&vec![incremental("custom-key", "custom-header")], true, &mut block)
        .unwrap();
    assert_eq!(block.as_slice(), &bytes[..]);
}

/// https://httpwg.org/specs/rfc7541.html#rfc.section.C.3
#[test]
fn requests_without_huffman() {
    let mut decoder = Decoder::new();

    // C.3.1
    let block = Helper::hex_to_vec(
        "8286 8441 0f77 7777 2e65 7861 6d70 6c65 2e63 6f6d",
    );
    let decoded = decoder.decode(&block, true).unwrap();
    assert_eq!(
        names(&decoded),
        vec![
            (":method".to_string(), "GET".to_string()),
            (":scheme".to_string(), "http".to_string()),
            (":path".to_string(), "/".to_string()),
            (":authority".to_string(), "www.example.com".to_string()),
        ]
    );
    assert_eq!(decoded[3].1, FieldRepresentation::IncrementalIndexing);
    assert_eq!(decoder.table.len(), 1);
    assert_eq!(decoder.table.size(), 57);

    // C.3.2
    let block = Helper::hex_to_vec("8286 84be 5808 6e6f 2d63 6163 6865");
    let decoded = decoder.decode(&block, true).unwrap();
    assert_eq!(
        names(&decoded)[4],
        ("cache-control".to_string(), "no-cache".to_string())
    );
    // :authority now resolves from the dynamic table.
    assert_eq!(decoded[3].1, FieldRepresentation::Indexed);
    assert_eq!(decoder.table.len(), 2);
    assert_eq!(decoder.table.size(), 110);

    // C.3.3
    let block = Helper::hex_to_vec(
        "8287 85bf 400a 6375 7374 6f6d 2d6b 6579 0c63 7573 746f 6d2d 7661 6c75 65",
    );
    let decoded = decoder.decode(&block, true).unwrap();
    assert_eq!(
        names(&decoded),
        vec![
            (":method".to_string(), "GET".to_string()),
            (":scheme".to_string(), "https".to_string()),
            (":path".to_string(), "/index.html".to_string()),
            (":authority".to_string(), "www.example.com".to_string()),
            ("custom-key".to_string(), "custom-value".to_string()),
        ]
    );
    assert_eq!(decoder.table.len(), 3);
    assert_eq!(decoder.table.size(), 164);
}

/// https://httpwg.org/specs/rfc7541.html#rfc.section.C.4
#[test]
fn requests_with_huffman() {
    let mut decoder = Decoder::new();

    // C.4.1
    let block = Helper::hex_to_vec("8286 8441 8cf1 e3c2 e5f2 3a6b a0ab 90f4 ff");
    let decoded = decoder.decode(&block, true).unwrap();
    assert_eq!(
        names(&decoded)[3],
        (":authority".to_string(), "www.example.com".to_string())
    );
    // The wire form was huffman coded and the flag records it.
    assert!(decoded[3].0.value_huffman);
    assert_eq!(decoder.table.len(), 1);
    assert_eq!(decoder.table.size(), 57);

    // C.4.2
    let block = Helper::hex_to_vec("8286 84be 5886 a8eb 1064 9cbf");
    let decoded = decoder.decode(&block, true).unwrap();
    assert_eq!(
        names(&decoded)[4],
        ("cache-control".to_string(), "no-cache".to_string())
    );
    assert_eq!(decoder.table.len(), 2);
    assert_eq!(decoder.table.size(), 110);

    // C.4.3
    let block = Helper::hex_to_vec(
        "8287 85bf 4088 25a8 49e9 5ba9 7d7f 8925 a849 e95b b8e8 b4bf",
    );
    let decoded = decoder.decode(&block, true).unwrap();
    assert_eq!(
        names(&decoded)[4],
        ("custom-key".to_string(), "custom-value".to_string())
    );
    assert_eq!(decoder.table.len(), 3);
    assert_eq!(decoder.table.size(), 164);
}

/// An encoder and a decoder driven in lockstep mutate their tables
/// identically, including across huffman-coded literals and evictions.
#[test]
fn encoder_decoder_tables_stay_identical() {
    let mut encoder = Encoder::with_size(256);
    let mut decoder = Decoder::with_size(256);

    for round in 0..8 {
        let value = format!("value-number-{:04}", round);
        let headers = vec![
            indexed(":status", "200"),
            (
                HeaderField::with_huffman(&b"x-round"[..], value.as_bytes(), true, true),
                FieldRepresentation::IncrementalIndexing,
            ),
            incremental("x-plain", value.as_str()),
        ];
        let mut block = Buffer::new();
        encoder.encode(&headers, true, &mut block).unwrap();
        let decoded = decoder.decode(block.as_slice(), true).unwrap();
        assert_eq!(decoded, headers);
        assert_eq!(encoder.table.len(), decoder.table.len());
        assert_eq!(encoder.table.size(), decoder.table.size());
        // The bound keeps holding while old entries are evicted.
        assert!(decoder.table.size() <= 256);
    }
}

#[test]
fn huffman_round_trip() {
    for input in [
        &b""[..],
        &b"www.example.com"[..],
        &b"no-cache"[..],
        &b"\x00\x01\x02\xFD\xFE\xFF"[..],
    ] {
        let mut coded = Buffer::new();
        huffman::encode(input, &mut coded);
        assert_eq!(huffman::decode(coded.as_slice()).unwrap(), input.to_vec());
    }
}

#[test]
fn size_update_adjusts_table_and_emits_nothing() {
    let mut decoder = Decoder::new();
    // Insert one entry, then a block whose first octet is a size update to 0
    // (0x20): the entry is evicted and no header is emitted for the signal.
    let block =
        Helper::hex_to_vec("400a 6375 7374 6f6d 2d6b 6579 0d63 7573 746f 6d2d 6865 6164 6572");
    decoder.decode(&block, true).unwrap();
    assert_eq!(decoder.table.len(), 1);

    let block = Helper::hex_to_vec("20 82");
    let decoded = decoder.decode(&block, true).unwrap();
    assert_eq!(decoded, vec![indexed(":method", "GET")]);
    assert_eq!(decoder.table.len(), 0);
    assert_eq!(decoder.table.max_size(), 0);
}

#[test]
fn decode_without_update_leaves_table_until_committed() {
    let mut decoder = Decoder::new();
    let block =
        Helper::hex_to_vec("400a 6375 7374 6f6d 2d6b 6579 0d63 7573 746f 6d2d 6865 6164 6572");
    let decoded = decoder.decode(&block, false).unwrap();
    assert_eq!(decoder.table.len(), 0);

    decoder.update(&decoded);
    assert_eq!(decoder.table.len(), 1);
    assert_eq!(decoder.table.find(b"custom-key", b"custom-header"), 62);
}

#[test]
fn decode_failures_are_compression_errors() {
    let mut decoder = Decoder::new();

    // Index 0 is never assigned.
    assert!(matches!(
        decoder.decode(&[0x80], true),
        Err(H2Error::Decoder(_))
    ));
    // Index far beyond the static and (empty) dynamic table.
    assert!(matches!(
        decoder.decode(&[0xFF, 0x80, 0x01], true),
        Err(H2Error::Decoder(_))
    ));
    // Literal whose string length walks past the end of the block.
    assert!(matches!(
        decoder.decode(&Helper::hex_to_vec("400a 6375"), true),
        Err(H2Error::Decoder(_))
    ));
    // Truncated integer continuation.
    assert!(matches!(
        decoder.decode(&[0x7F, 0x80], true),
        Err(H2Error::Decoder(_))
    ));
    // Huffman-coded value with invalid (non-ones) padding.
    assert!(matches!(
        decoder.decode(&Helper::hex_to_vec("0004 7465 7374 8118"), true),
        Err(H2Error::Decoder(_))
    ));
}

#[test]
fn law_decode_of_encode_is_identity() {
    let stories: Vec<HeaderList> = vec![
        vec![indexed(":method", "GET"), indexed(":path", "/")],
        vec![
            indexed(":method", "POST"),
            incremental("content-type", "text/plain"),
            (field("x-secret", "tell-no-one"), FieldRepresentation::NeverIndexed),
            (field("x-once", "1"), FieldRepresentation::WithoutIndexing),
        ],
        vec![incremental("content-type", "text/plain")],
    ];

    let mut encoder = Encoder::new();
    let mut decoder = Decoder::new();
    for headers in stories {
        let mut block = Buffer::new();
        encoder.encode(&headers, true, &mut block).unwrap();
        let decoded = decoder.decode(block.as_slice(), true).unwrap();
        assert_eq!(decoded, headers);
    }
    assert_eq!(encoder.table.len(), decoder.table.len());
    assert_eq!(encoder.table.size(), decoder.table.size());
}
