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
// Created Date: 2023/09/14 08:55:41

use crate::{Buffer, H2Result};

use super::{Flag, FrameHeader, Kind, StreamIdentifier};

/// CONTINUATION帧, 整个负载都是头块分片, 需并入前序帧的分片后再解码
#[derive(Debug, Eq, PartialEq)]
pub struct Continuation {
    stream_id: StreamIdentifier,
    fragment: Buffer,
    flags: Flag,
}

impl Continuation {
    pub fn new(stream_id: StreamIdentifier, fragment: Buffer) -> Self {
        Continuation {
            stream_id,
            fragment,
            flags: Flag::zero(),
        }
    }

    pub fn parse(header: FrameHeader, payload: &mut Buffer) -> H2Result<Continuation> {
        let fragment = payload.read_buffer(payload.remaining());
        Ok(Continuation {
            stream_id: header.stream_id(),
            fragment,
            flags: header.flag(),
        })
    }

    pub fn stream_id(&self) -> StreamIdentifier {
        self.stream_id
    }

    pub fn flags(&self) -> Flag {
        self.flags
    }

    pub fn is_end_headers(&self) -> bool {
        self.flags.is_end_headers()
    }

    pub fn set_end_headers(&mut self) {
        self.flags.set_end_headers();
    }

    pub fn fragment(&self) -> &Buffer {
        &self.fragment
    }

    pub fn into_fragment(self) -> Buffer {
        self.fragment
    }

    pub fn encode(&self, dst: &mut Buffer) -> H2Result<usize> {
        let mut head = FrameHeader::new(Kind::Continuation, self.flags, self.stream_id);
        head.length = self.fragment.len() as u32;
        let mut size = 0;
        size += head.encode(dst)?;
        size += dst.put_slice(self.fragment.as_slice());
        log::trace!("HTTP2: 编码Continuation信息; len={}", size);
        Ok(size)
    }
}
