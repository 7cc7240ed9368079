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
// Created Date: 2023/09/13 17:21:30

use std::fmt;

use crate::{Buffer, H2Error, H2Result};

use super::{Flag, FrameHeader, Kind, Reason, StreamIdentifier};

#[derive(Clone, Eq, PartialEq)]
pub struct GoAway {
    last_stream_id: StreamIdentifier,
    error_code: Reason,
    debug_data: Buffer,
}

impl GoAway {
    pub fn new(last_stream_id: StreamIdentifier, reason: Reason) -> Self {
        GoAway {
            last_stream_id,
            error_code: reason,
            debug_data: Buffer::new(),
        }
    }

    pub fn with_debug_data(
        last_stream_id: StreamIdentifier,
        reason: Reason,
        debug_data: Buffer,
    ) -> Self {
        Self {
            last_stream_id,
            error_code: reason,
            debug_data,
        }
    }

    pub fn last_stream_id(&self) -> StreamIdentifier {
        self.last_stream_id
    }

    pub fn reason(&self) -> Reason {
        self.error_code
    }

    pub fn debug_data(&self) -> &Buffer {
        &self.debug_data
    }

    pub fn parse(_head: FrameHeader, payload: &mut Buffer) -> H2Result<GoAway> {
        if payload.remaining() < 8 {
            return Err(H2Error::InvalidPayloadLength);
        }

        let last_stream_id = StreamIdentifier::parse(payload);
        let error_code = payload.get_u32();
        let debug_data = payload.read_buffer(payload.remaining());

        Ok(GoAway {
            last_stream_id,
            error_code: error_code.into(),
            debug_data,
        })
    }

    fn head(&self) -> FrameHeader {
        let mut head = FrameHeader::new(Kind::GoAway, Flag::zero(), StreamIdentifier::zero());
        head.length = 8 + self.debug_data.len() as u32;
        head
    }

    pub fn encode(&self, buffer: &mut Buffer) -> H2Result<usize> {
        let mut size = 0;
        size += self.head().encode(buffer)?;
        size += self.last_stream_id.encode(buffer);
        size += buffer.put_u32(self.error_code.into());
        size += buffer.put_slice(self.debug_data.as_slice());
        log::trace!("HTTP2: 编码GoAway信息; len={}", size);
        Ok(size)
    }
}

impl fmt::Debug for GoAway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("GoAway");
        builder.field("error_code", &self.error_code);
        builder.field("last_stream_id", &self.last_stream_id);

        if !self.debug_data.is_empty() {
            builder.field("debug_data", &self.debug_data);
        }

        builder.finish()
    }
}
