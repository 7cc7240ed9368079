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
// Created Date: 2023/09/13 17:02:33

use crate::{Buffer, H2Error, H2Result};

use super::{Flag, FrameHeader, Kind, StreamIdentifier};

/// PING帧, 固定8字节的不透明数据, ACK标志表示应答
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Ping {
    opaque_data: u64,
    flags: Flag,
}

impl Ping {
    pub fn new(opaque_data: u64) -> Ping {
        Ping {
            opaque_data,
            flags: Flag::zero(),
        }
    }

    /// 以收到的数据构造应答
    pub fn pong(opaque_data: u64) -> Ping {
        Ping {
            opaque_data,
            flags: Flag::ack(),
        }
    }

    pub fn opaque_data(&self) -> u64 {
        self.opaque_data
    }

    pub fn flags(&self) -> Flag {
        self.flags
    }

    pub fn is_ack(&self) -> bool {
        self.flags.is_ack()
    }

    pub fn parse(head: FrameHeader, payload: &mut Buffer) -> H2Result<Ping> {
        if payload.remaining() != 8 {
            return Err(H2Error::InvalidPayloadLength);
        }

        Ok(Ping {
            opaque_data: payload.get_u64(),
            flags: head.flag(),
        })
    }

    fn head(&self) -> FrameHeader {
        let mut head = FrameHeader::new(Kind::Ping, self.flags, StreamIdentifier::zero());
        head.length = 8;
        head
    }

    pub fn encode(&self, buffer: &mut Buffer) -> H2Result<usize> {
        let mut size = 0;
        size += self.head().encode(buffer)?;
        size += buffer.put_u64(self.opaque_data);
        log::trace!("HTTP2: 编码Ping信息; len={}", size);
        Ok(size)
    }
}
