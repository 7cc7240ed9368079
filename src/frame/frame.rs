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
// Created Date: 2023/09/13 14:47:12

use crate::hpack::Encoder;
use crate::{Buffer, H2Error, H2Result};

use super::{
    encode_u24, read_u24, Continuation, Data, Flag, GoAway, Headers, Kind, Ping, Priority,
    PushPromise, Reset, Settings, StreamIdentifier, WindowUpdate,
};

pub const FRAME_HEADER_BYTES: usize = 9;

/// 固定9字节的帧头
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHeader {
    pub length: u32,
    pub kind: Kind,
    pub flag: Flag,
    pub id: StreamIdentifier,
}

impl FrameHeader {
    pub fn new(kind: Kind, flag: Flag, id: StreamIdentifier) -> FrameHeader {
        FrameHeader {
            length: 0,
            kind,
            flag,
            id,
        }
    }

    #[inline]
    pub fn parse(buffer: &mut Buffer) -> H2Result<FrameHeader> {
        if buffer.remaining() < FRAME_HEADER_BYTES {
            return Err(H2Error::Short);
        }
        let length = read_u24(buffer);
        let kind = Kind::new(buffer.get_u8());
        let flag = Flag::new(buffer.get_u8());
        // 保留位在StreamIdentifier::parse中被丢弃
        let id = StreamIdentifier::parse(buffer);
        Ok(FrameHeader {
            length,
            kind,
            flag,
            id,
        })
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn stream_id(&self) -> StreamIdentifier {
        self.id
    }

    pub fn flag(&self) -> Flag {
        self.flag
    }

    pub fn flags_mut(&mut self) -> &mut Flag {
        &mut self.flag
    }

    pub fn encode(&self, buffer: &mut Buffer) -> H2Result<usize> {
        let mut size = 0;
        size += encode_u24(buffer, self.length);
        size += buffer.put_u8(self.kind.encode());
        size += buffer.put_u8(self.flag.bits());
        size += self.id.encode(buffer);
        Ok(size)
    }
}

/// 一个完整的帧, 负载按类型分十种
#[derive(Debug)]
pub enum Frame {
    Data(Data),
    Headers(Headers),
    Priority(Priority),
    Reset(Reset),
    Settings(Settings),
    PushPromise(PushPromise),
    Ping(Ping),
    GoAway(GoAway),
    WindowUpdate(WindowUpdate),
    Continuation(Continuation),
}

impl Frame {
    pub fn parse(header: FrameHeader, mut buf: Buffer) -> H2Result<Frame> {
        match header.kind() {
            Kind::Data => Ok(Frame::Data(Data::parse(header, &mut buf)?)),
            Kind::Headers => Ok(Frame::Headers(Headers::parse(header, &mut buf)?)),
            Kind::Priority => Ok(Frame::Priority(Priority::parse(header, &mut buf)?)),
            Kind::Reset => Ok(Frame::Reset(Reset::parse(header, &mut buf)?)),
            Kind::Settings => Ok(Frame::Settings(Settings::parse(header, &mut buf)?)),
            Kind::PushPromise => Ok(Frame::PushPromise(PushPromise::parse(header, &mut buf)?)),
            Kind::Ping => Ok(Frame::Ping(Ping::parse(header, &mut buf)?)),
            Kind::GoAway => Ok(Frame::GoAway(GoAway::parse(header, &mut buf)?)),
            Kind::WindowUpdate => Ok(Frame::WindowUpdate(WindowUpdate::parse(header, &mut buf)?)),
            Kind::Continuation => Ok(Frame::Continuation(Continuation::parse(header, &mut buf)?)),
            Kind::Unknown(v) => Err(H2Error::BadKind(*v)),
        }
    }

    pub fn encode(self, encoder: &mut Encoder, buf: &mut Buffer) -> H2Result<usize> {
        let name = self.display_name();
        let size = match self {
            Frame::Data(v) => v.encode(buf)?,
            Frame::Headers(v) => v.encode(encoder, buf)?,
            Frame::Priority(v) => v.encode(buf)?,
            Frame::Reset(v) => v.encode(buf)?,
            Frame::Settings(v) => v.encode(buf)?,
            Frame::PushPromise(v) => v.encode(encoder, buf)?,
            Frame::Ping(v) => v.encode(buf)?,
            Frame::GoAway(v) => v.encode(buf)?,
            Frame::WindowUpdate(v) => v.encode(buf)?,
            Frame::Continuation(v) => v.encode(buf)?,
        };
        log::trace!("编码http2二进制Frame({}) 大小 {}", name, size);
        Ok(size)
    }

    pub fn display_name(&self) -> String {
        format!("{}({})", self.kind().name(), self.stream_id().0)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Frame::Data(_) => Kind::Data,
            Frame::Headers(_) => Kind::Headers,
            Frame::Priority(_) => Kind::Priority,
            Frame::Reset(_) => Kind::Reset,
            Frame::Settings(_) => Kind::Settings,
            Frame::PushPromise(_) => Kind::PushPromise,
            Frame::Ping(_) => Kind::Ping,
            Frame::GoAway(_) => Kind::GoAway,
            Frame::WindowUpdate(_) => Kind::WindowUpdate,
            Frame::Continuation(_) => Kind::Continuation,
        }
    }

    pub fn stream_id(&self) -> StreamIdentifier {
        match self {
            Frame::Data(f) => f.stream_id(),
            Frame::Headers(f) => f.stream_id(),
            Frame::Priority(f) => f.stream_id(),
            Frame::Reset(f) => f.stream_id(),
            Frame::Settings(_f) => StreamIdentifier::zero(),
            Frame::PushPromise(f) => f.stream_id(),
            Frame::Ping(_f) => StreamIdentifier::zero(),
            Frame::GoAway(_f) => StreamIdentifier::zero(),
            Frame::WindowUpdate(f) => f.stream_id(),
            Frame::Continuation(f) => f.stream_id(),
        }
    }

    pub fn flags(&self) -> Flag {
        match self {
            Frame::Data(f) => f.flags(),
            Frame::Headers(f) => f.flags(),
            Frame::Settings(f) => f.flags(),
            Frame::PushPromise(f) => f.flags(),
            Frame::Ping(f) => f.flags(),
            Frame::Continuation(f) => f.flags(),
            _ => Flag::zero(),
        }
    }

    pub fn is_header(&self) -> bool {
        match self {
            Frame::Headers(_) => true,
            _ => false,
        }
    }

    pub fn is_data(&self) -> bool {
        match self {
            Frame::Data(_) => true,
            _ => false,
        }
    }

    pub fn is_end_headers(&self) -> bool {
        match self {
            Frame::Headers(f) => f.is_end_headers(),
            Frame::PushPromise(f) => f.is_end_headers(),
            Frame::Continuation(f) => f.is_end_headers(),
            _ => false,
        }
    }

    pub fn is_end_stream(&self) -> bool {
        match self {
            Frame::Headers(f) => f.is_end_stream(),
            Frame::Data(f) => f.is_end_stream(),
            _ => false,
        }
    }
}
