// Copyright 2022 - 2023 Wenmeng See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Author: tickbh
// -----
// Created Date: 2023/09/14 09:12:08

use std::collections::VecDeque;

use crate::DEFAULT_SETTINGS_HEADER_TABLE_SIZE;

use super::HeaderField;

/// 静态表62项, 索引1..=61有效, 0不使用
pub const STATIC_TABLE_SIZE: usize = 62;

/// (HPACK, Appendix A)
static STATIC_TABLE_RAW: &'static [(&'static str, &'static str)] = &[
    (":authority", ""),
    (":method", "GET"),
    (":method", "POST"),
    (":path", "/"),
    (":path", "/index.html"),
    (":scheme", "http"),
    (":scheme", "https"),
    (":status", "200"),
    (":status", "204"),
    (":status", "206"),
    (":status", "304"),
    (":status", "400"),
    (":status", "404"),
    (":status", "500"),
    ("accept-charset", ""),
    ("accept-encoding", "gzip, deflate"),
    ("accept-language", ""),
    ("accept-ranges", ""),
    ("accept", ""),
    ("access-control-allow-origin", ""),
    ("age", ""),
    ("allow", ""),
    ("authorization", ""),
    ("cache-control", ""),
    ("content-disposition", ""),
    ("content-encoding", ""),
    ("content-language", ""),
    ("content-length", ""),
    ("content-location", ""),
    ("content-range", ""),
    ("content-type", ""),
    ("cookie", ""),
    ("date", ""),
    ("etag", ""),
    ("expect", ""),
    ("expires", ""),
    ("from", ""),
    ("host", ""),
    ("if-match", ""),
    ("if-modified-since", ""),
    ("if-none-match", ""),
    ("if-range", ""),
    ("if-unmodified-since", ""),
    ("last-modified", ""),
    ("link", ""),
    ("location", ""),
    ("max-forwards", ""),
    ("proxy-authenticate", ""),
    ("proxy-authorization", ""),
    ("range", ""),
    ("referer", ""),
    ("refresh", ""),
    ("retry-after", ""),
    ("server", ""),
    ("set-cookie", ""),
    ("strict-transport-security", ""),
    ("transfer-encoding", ""),
    ("user-agent", ""),
    ("vary", ""),
    ("via", ""),
    ("www-authenticate", ""),
];

/// 静态表与动态表的组合, 每个连接的编解码端各持有一份, 不跨连接共享
#[derive(Debug, Clone)]
pub struct HeaderTable {
    /// 动态表, 最新的表项在队头, 索引从62起
    table: VecDeque<HeaderField>,
    /// 当前占用的八位组数
    size: usize,
    /// 大小上限, 由HEADER_TABLE_SIZE或块内的大小更新信号设定
    max_size: usize,
}

impl HeaderTable {
    pub fn new() -> HeaderTable {
        HeaderTable::with_size(DEFAULT_SETTINGS_HEADER_TABLE_SIZE)
    }

    pub fn with_size(max_size: usize) -> HeaderTable {
        HeaderTable {
            table: VecDeque::new(),
            size: 0,
            max_size,
        }
    }

    /// 动态表的表项个数
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns the current size of the dynamic table in octets, as defined
    /// by the IETF HPACK spec.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the maximum size of the dynamic table in octets.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Resolves a 1-based index over the concatenation of the static table
    /// (1..=61) and the dynamic table (62..).
    pub fn get(&self, index: usize) -> Option<(&[u8], &[u8])> {
        let real_index = if index > 0 { index - 1 } else { return None };

        if real_index < STATIC_TABLE_RAW.len() {
            let v = &STATIC_TABLE_RAW[real_index];
            Some((v.0.as_bytes(), v.1.as_bytes()))
        } else {
            // Maybe it's in the dynamic table then?
            let dynamic_index = real_index - STATIC_TABLE_RAW.len();
            match self.table.get(dynamic_index) {
                Some(field) => Some((&field.name, &field.value)),
                None => None,
            }
        }
    }

    /// Finds the first index whose name matches; when `value` is non-empty
    /// the value has to match as well. Returns 0 when nothing matches.
    pub fn find(&self, name: &[u8], value: &[u8]) -> usize {
        let compare_value = !value.is_empty();

        for (idx, &(n, v)) in STATIC_TABLE_RAW.iter().enumerate() {
            if n.as_bytes() == name && (!compare_value || v.as_bytes() == value) {
                return idx + 1;
            }
        }
        for (idx, field) in self.table.iter().enumerate() {
            if field.name == name && (!compare_value || field.value == value) {
                return idx + STATIC_TABLE_SIZE;
            }
        }
        0
    }

    /// 新表项插入队头, 随后从最旧端逐出直到满足上限
    pub fn add(&mut self, field: HeaderField) {
        self.size += field.size();
        self.table.push_front(field);
        self.consolidate();
        log::trace!("HPACK: 动态表新增表项后大小 {}", self.size);
    }

    /// 调整大小上限并逐出超出的表项
    pub fn update_size(&mut self, new_max_size: usize) {
        self.max_size = new_max_size;
        self.consolidate();
    }

    /// Evicts entries from the oldest end until the size bound holds again.
    fn consolidate(&mut self) {
        while self.size > self.max_size {
            let last = match self.table.pop_back() {
                Some(x) => x,
                // Can never happen as the size of the table must reach
                // 0 by the time we've exhausted all elements.
                None => panic!("size of table != 0, but no entries left!"),
            };
            self.size -= last.size();
        }
    }
}

impl Default for HeaderTable {
    fn default() -> HeaderTable {
        HeaderTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_entries() {
        let table = HeaderTable::new();
        assert_eq!(table.get(0), None);
        assert_eq!(table.get(1), Some((&b":authority"[..], &b""[..])));
        assert_eq!(table.get(2), Some((&b":method"[..], &b"GET"[..])));
        assert_eq!(table.get(61), Some((&b"www-authenticate"[..], &b""[..])));
        assert_eq!(table.get(62), None);
    }

    #[test]
    fn dynamic_indexing_newest_first() {
        let mut table = HeaderTable::new();
        table.add(HeaderField::new(&b"one"[..], &b"1"[..]));
        table.add(HeaderField::new(&b"two"[..], &b"2"[..]));
        assert_eq!(table.get(62), Some((&b"two"[..], &b"2"[..])));
        assert_eq!(table.get(63), Some((&b"one"[..], &b"1"[..])));
        assert_eq!(table.get(64), None);
    }

    #[test]
    fn find_by_name_and_value() {
        let mut table = HeaderTable::new();
        assert_eq!(table.find(b":method", b"GET"), 2);
        assert_eq!(table.find(b":method", b"POST"), 3);
        assert_eq!(table.find(b":method", b""), 2);
        assert_eq!(table.find(b"nothere", b""), 0);
        table.add(HeaderField::new(&b"custom-key"[..], &b"custom-header"[..]));
        assert_eq!(table.find(b"custom-key", b"custom-header"), 62);
        assert_eq!(table.find(b"custom-key", b"other"), 0);
        assert_eq!(table.find(b"custom-key", b""), 62);
    }

    #[test]
    fn eviction_is_fifo_by_octets() {
        // Each entry below occupies 32 + 1 + 1 = 34 octets.
        let mut table = HeaderTable::with_size(3 * 34);
        for (name, value) in [(b"a", b"1"), (b"b", b"2"), (b"c", b"3"), (b"d", b"4")] {
            table.add(HeaderField::new(&name[..], &value[..]));
        }
        assert_eq!(table.len(), 3);
        assert_eq!(table.size(), 3 * 34);
        // The oldest ("a") has been evicted.
        assert_eq!(table.find(b"a", b""), 0);
        assert_eq!(table.get(62), Some((&b"d"[..], &b"4"[..])));
        assert_eq!(table.get(64), Some((&b"b"[..], &b"2"[..])));
    }

    #[test]
    fn update_size_evicts() {
        let mut table = HeaderTable::new();
        table.add(HeaderField::new(&b"a"[..], &b"1"[..]));
        table.add(HeaderField::new(&b"b"[..], &b"2"[..]));
        table.update_size(40);
        assert_eq!(table.len(), 1);
        assert!(table.size() <= 40);
        assert_eq!(table.get(62), Some((&b"b"[..], &b"2"[..])));
        table.update_size(0);
        assert_eq!(table.len(), 0);
        assert_eq!(table.size(), 0);
    }
}
