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
// Created Date: 2023/09/13 16:44:01

use crate::{Buffer, H2Error, H2Result};

use super::{Flag, FrameHeader, Kind, Reason, StreamIdentifier};

/// RST_STREAM帧, 固定4字节的错误码, 立即终止所指的流
///
/// 该帧永远指向一个具体的流, 流标识为0按连接错误处理
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Reset {
    stream_id: StreamIdentifier,
    error_code: Reason,
}

impl Reset {
    pub fn new(stream_id: StreamIdentifier, error: Reason) -> Reset {
        assert!(!stream_id.is_zero());
        Reset {
            stream_id,
            error_code: error,
        }
    }

    pub fn stream_id(&self) -> StreamIdentifier {
        self.stream_id
    }

    pub fn reason(&self) -> Reason {
        self.error_code
    }

    pub fn parse(head: FrameHeader, payload: &mut Buffer) -> H2Result<Reset> {
        debug_assert_eq!(head.kind(), &Kind::Reset);

        if head.stream_id().is_zero() {
            return Err(H2Error::InvalidStreamId);
        }

        if payload.remaining() != 4 {
            return Err(H2Error::InvalidPayloadLength);
        }

        Ok(Reset {
            stream_id: head.stream_id(),
            error_code: payload.get_u32().into(),
        })
    }

    pub fn encode(&self, buffer: &mut Buffer) -> H2Result<usize> {
        let mut head = FrameHeader::new(Kind::Reset, Flag::zero(), self.stream_id);
        head.length = 4;

        let mut size = 0;
        size += head.encode(buffer)?;
        size += buffer.put_u32(self.error_code.into());
        log::trace!("HTTP2: 编码流终止帧({:?}); len={}", self.error_code, size);
        Ok(size)
    }
}
