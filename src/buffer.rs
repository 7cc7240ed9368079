use std::fmt;
use std::io::{Read, Result, Write};
use std::ptr;

use log::warn;

use crate::{H2Error, H2Result};

/// 最小的缓存容量, 扩容时以2的倍数增长
const MIN_CAPACITY: usize = 8;

/// 八位组缓冲, 可按偏移读写大端整数, frame与hpack共用
pub struct Buffer {
    val: Vec<u8>,
    cursor: usize,
}

impl Buffer {
    pub fn new() -> Buffer {
        Buffer {
            val: Vec::with_capacity(MIN_CAPACITY),
            cursor: 0,
        }
    }

    pub fn with_capacity(n: usize) -> Buffer {
        let mut buffer = Buffer::new();
        buffer.ensure_capacity(n);
        buffer
    }

    pub fn from_slice(buf: &[u8]) -> Buffer {
        let mut buffer = Buffer::with_capacity(buf.len());
        buffer.val.extend_from_slice(buf);
        buffer
    }

    /// 当前的逻辑长度
    #[inline]
    pub fn len(&self) -> usize {
        self.val.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.val.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.val.capacity()
    }

    /// 扩容到至少min, 容量从8开始每次翻倍
    fn ensure_capacity(&mut self, min: usize) {
        let mut cap = std::cmp::max(self.val.capacity(), MIN_CAPACITY);
        if cap < min {
            while cap < min {
                cap *= 2;
            }
            if cap > 512000 {
                warn!("buffer grow to {:?}k", cap / 1024);
            }
        }
        self.val.reserve_exact(cap - self.val.len());
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.val[..]
    }

    /// 返回从at开始的切片引用, 越界则返回None
    pub fn address(&self, at: usize) -> Option<&[u8]> {
        if at <= self.val.len() {
            Some(&self.val[at..])
        } else {
            None
        }
    }

    pub fn get(&self, at: usize) -> Option<u8> {
        if at < self.val.len() {
            Some(self.val[at])
        } else {
            None
        }
    }

    /// 设置at处的字节, 不足时先补零扩展长度到at+1
    pub fn set(&mut self, b: u8, at: usize) {
        if at >= self.val.len() {
            self.ensure_capacity(at + 1);
            self.val.resize(at + 1, 0);
        }
        self.val[at] = b;
    }

    pub fn append_u8(&mut self, b: u8) {
        self.ensure_capacity(self.val.len() + 1);
        self.val.push(b);
    }

    pub fn append_slice(&mut self, buf: &[u8]) {
        self.ensure_capacity(self.val.len() + buf.len());
        self.val.extend_from_slice(buf);
    }

    pub fn append_buffer(&mut self, other: &Buffer) {
        self.append_slice(other.as_slice());
    }

    /// 从at处覆盖写入, 超出末尾时扩展逻辑长度
    pub fn copy_from(&mut self, source: &Buffer, at: usize) {
        self.copy_from_slice(source.as_slice(), at)
    }

    pub fn copy_from_slice(&mut self, source: &[u8], at: usize) {
        let end = at + source.len();
        if end > self.val.len() {
            self.ensure_capacity(end);
            self.val.resize(end, 0);
        }
        self.val[at..end].copy_from_slice(source);
    }

    pub fn resize(&mut self, n: usize) {
        if n > self.val.len() {
            self.ensure_capacity(n);
        }
        self.val.resize(n, 0);
        if self.cursor > n {
            self.cursor = n;
        }
    }

    pub fn clear(&mut self) {
        self.val.clear();
        self.cursor = 0;
    }

    /// 读取at处1..=8字节的大端无符号整数, 参数非法或越界返回0
    pub fn get_value(&self, bytes: usize, at: usize) -> u64 {
        if bytes == 0 || bytes > 8 || at + bytes > self.val.len() {
            return 0;
        }
        let mut value = 0u64;
        for i in 0..bytes {
            value = value << 8 | self.val[at + i] as u64;
        }
        value
    }

    /// 写入at处1..=8字节的大端无符号整数, 不足时扩展长度到at+bytes
    pub fn set_value(&mut self, value: u64, bytes: usize, at: usize) -> H2Result<()> {
        if bytes == 0 || bytes > 8 {
            return Err(H2Error::Internal);
        }
        if at + bytes > self.val.len() {
            self.ensure_capacity(at + bytes);
            self.val.resize(at + bytes, 0);
        }
        for i in 0..bytes {
            self.val[at + i] = (value >> ((bytes - 1 - i) * 8)) as u8;
        }
        Ok(())
    }

    // ===== 以下为游标读取, 供frame解析使用 =====

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.val.len() - self.cursor
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// 未读部分的切片引用
    #[inline]
    pub fn chunk(&self) -> &[u8] {
        &self.val[self.cursor..]
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        if self.has_remaining() {
            Some(self.val[self.cursor])
        } else {
            None
        }
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.cursor + n <= self.val.len(), "advance overflow");
        self.cursor += n;
    }

    #[inline]
    pub fn get_u8(&mut self) -> u8 {
        assert!(self.remaining() >= 1);
        let ret = self.val[self.cursor];
        self.cursor += 1;
        ret
    }

    #[inline]
    pub fn get_u16(&mut self) -> u16 {
        assert!(self.remaining() >= 2);
        let ret = self.get_value(2, self.cursor) as u16;
        self.cursor += 2;
        ret
    }

    #[inline]
    pub fn get_u32(&mut self) -> u32 {
        assert!(self.remaining() >= 4);
        let ret = self.get_value(4, self.cursor) as u32;
        self.cursor += 4;
        ret
    }

    #[inline]
    pub fn get_u64(&mut self) -> u64 {
        assert!(self.remaining() >= 8);
        let ret = self.get_value(8, self.cursor);
        self.cursor += 8;
        ret
    }

    /// 读取n个字节生成新的Buffer并消耗
    pub fn read_buffer(&mut self, n: usize) -> Buffer {
        assert!(self.remaining() >= n);
        let buffer = Buffer::from_slice(&self.val[self.cursor..self.cursor + n]);
        self.cursor += n;
        buffer
    }

    // ===== 以下为追加写入, 大端序 =====

    pub fn put_u8(&mut self, n: u8) -> usize {
        self.append_u8(n);
        1
    }

    pub fn put_u16(&mut self, n: u16) -> usize {
        self.append_slice(&n.to_be_bytes());
        2
    }

    pub fn put_u32(&mut self, n: u32) -> usize {
        self.append_slice(&n.to_be_bytes());
        4
    }

    pub fn put_u64(&mut self, n: u64) -> usize {
        self.append_slice(&n.to_be_bytes());
        8
    }

    pub fn put_slice(&mut self, src: &[u8]) -> usize {
        self.append_slice(src);
        src.len()
    }

    /// 填充cnt个相同的字节, 编码padding时使用
    pub fn put_bytes(&mut self, val: u8, cnt: usize) -> usize {
        self.ensure_capacity(self.val.len() + cnt);
        self.val.resize(self.val.len() + cnt, val);
        cnt
    }
}

impl Default for Buffer {
    fn default() -> Buffer {
        Buffer::new()
    }
}

impl Clone for Buffer {
    fn clone(&self) -> Buffer {
        Buffer {
            val: self.val.clone(),
            cursor: self.cursor,
        }
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(value: Vec<u8>) -> Buffer {
        Buffer { val: value, cursor: 0 }
    }
}

impl<'a> From<&'a [u8]> for Buffer {
    fn from(value: &'a [u8]) -> Buffer {
        Buffer::from_slice(value)
    }
}

impl<'a> From<&'a str> for Buffer {
    fn from(value: &'a str) -> Buffer {
        Buffer::from_slice(value.as_bytes())
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Buffer) -> bool {
        self.val == other.val
    }
}

impl Eq for Buffer {}

impl fmt::Debug for Buffer {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "bytes ({:?})", self.as_slice())
    }
}

impl Read for Buffer {
    #[inline(always)]
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let left = self.remaining();
        if left == 0 || buf.len() == 0 {
            return Ok(0);
        }
        let read = std::cmp::min(left, buf.len());
        unsafe {
            ptr::copy(&self.val[self.cursor], &mut buf[0], read);
        }
        self.cursor += read;
        Ok(read)
    }
}

impl Write for Buffer {
    #[inline(always)]
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.append_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Iterator for Buffer {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.has_remaining() {
            let read = self.val[self.cursor];
            self.cursor += 1;
            Some(read)
        } else {
            None
        }
    }
}
