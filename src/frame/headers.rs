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
// Created Date: 2023/09/14 04:34:25

use std::fmt;

use crate::hpack::{Decoder, Encoder, HeaderList};
use crate::{Buffer, H2Error, H2Result};

use super::{Flag, FrameHeader, Kind, StreamDependency, StreamIdentifier};

/// HEADERS帧, 携带一个不透明的头块分片
///
/// This could be either a request or a response.
#[derive(Eq, PartialEq)]
pub struct Headers {
    /// The ID of the stream with which this frame is associated.
    stream_id: StreamIdentifier,

    /// The stream dependency information, if any.
    stream_dep: Option<StreamDependency>,

    /// The header block fragment, the in/output of the hpack codec.
    fragment: Buffer,

    /// The decoded (or to be encoded) header list.
    fields: HeaderList,

    pad_len: u8,

    /// The associated flags
    flags: Flag,
}

impl Headers {
    /// Create a new HEADERS frame from a header list; the fragment is
    /// produced by the hpack encoder when the frame is encoded.
    pub fn new(stream_id: StreamIdentifier, fields: HeaderList) -> Self {
        Headers {
            stream_id,
            stream_dep: None,
            fragment: Buffer::new(),
            fields,
            pad_len: 0,
            flags: Flag::end_headers(),
        }
    }

    pub fn parse(header: FrameHeader, payload: &mut Buffer) -> H2Result<Headers> {
        let mut pad_len = 0;
        if header.flag().is_padded() {
            if !payload.has_remaining() {
                return Err(H2Error::Short);
            }
            pad_len = payload.get_u8();
        }

        let stream_dep = if header.flag().is_priority() {
            let dependency = StreamDependency::load(payload)?;
            if dependency.dependency_id() == header.stream_id() {
                return Err(H2Error::InvalidDependencyId);
            }
            Some(dependency)
        } else {
            None
        };

        // 此时pad与优先级字段都已消耗, 剩余减去padding即为分片
        if pad_len as usize > payload.remaining() {
            return Err(H2Error::TooMuchPadding(pad_len));
        }
        let fragment = payload.read_buffer(payload.remaining() - pad_len as usize);

        Ok(Headers {
            stream_id: header.stream_id(),
            stream_dep,
            fragment,
            fields: Vec::new(),
            pad_len,
            flags: header.flag(),
        })
    }

    pub fn stream_id(&self) -> StreamIdentifier {
        self.stream_id
    }

    pub fn flags(&self) -> Flag {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut Flag {
        &mut self.flags
    }

    pub fn is_end_headers(&self) -> bool {
        self.flags.is_end_headers()
    }

    pub fn set_end_headers(&mut self) {
        self.flags.set_end_headers();
    }

    pub fn is_end_stream(&self) -> bool {
        self.flags.is_end_stream()
    }

    pub fn set_end_stream(&mut self) {
        self.flags.set_end_stream()
    }

    pub fn stream_dependency(&self) -> &Option<StreamDependency> {
        &self.stream_dep
    }

    pub fn set_stream_dependency(&mut self, dependency: StreamDependency) {
        self.stream_dep = Some(dependency);
        self.flags.set_priority();
    }

    pub fn pad_length(&self) -> u8 {
        self.pad_len
    }

    pub fn set_pad_length(&mut self, pad_len: u8) {
        self.pad_len = pad_len;
        if pad_len > 0 {
            self.flags.set_padded();
        } else {
            self.flags.unset_padded();
        }
    }

    /// 头块分片的原始字节
    pub fn fragment(&self) -> &Buffer {
        &self.fragment
    }

    pub fn fields(&self) -> &HeaderList {
        &self.fields
    }

    pub fn into_fields(self) -> HeaderList {
        self.fields
    }

    /// Runs the hpack decoder over the carried fragment. The decoder of one
    /// connection has to see the fragments in arrival order.
    pub fn decode_fields(&mut self, decoder: &mut Decoder, update_table: bool) -> H2Result<&HeaderList> {
        self.fields = decoder.decode(self.fragment.as_slice(), update_table)?;
        Ok(&self.fields)
    }

    pub fn encode(mut self, encoder: &mut Encoder, dst: &mut Buffer) -> H2Result<usize> {
        if self.fragment.is_empty() && !self.fields.is_empty() {
            encoder.encode(&self.fields, true, &mut self.fragment)?;
        }

        let mut head = FrameHeader::new(Kind::Headers, self.flags, self.stream_id);
        head.length = self.fragment.len() as u32;
        if self.flags.is_padded() {
            head.length += self.pad_len as u32 + 1;
        }
        if self.stream_dep.is_some() {
            head.length += 5;
        }

        let mut size = 0;
        size += head.encode(dst)?;
        if self.flags.is_padded() {
            size += dst.put_u8(self.pad_len);
        }
        if let Some(dep) = &self.stream_dep {
            size += dep.encode(dst);
        }
        size += dst.put_slice(self.fragment.as_slice());
        if self.flags.is_padded() {
            size += dst.put_bytes(0, self.pad_len as usize);
        }
        log::trace!("HTTP2: 编码头信息; len={}", size);
        Ok(size)
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut builder = f.debug_struct("Headers");
        builder
            .field("stream_id", &self.stream_id)
            .field("flags", &self.flags);

        if let Some(ref dep) = self.stream_dep {
            builder.field("stream_dep", dep);
        }

        // `fragment` and `fields` purposefully not included
        builder.finish()
    }
}

// ===== impl PushPromise =====

/// PUSH_PROMISE帧, 预约的流标识加头块分片
#[derive(Eq, PartialEq)]
pub struct PushPromise {
    /// The ID of the stream with which this frame is associated.
    stream_id: StreamIdentifier,

    /// The ID of the stream being reserved by this PushPromise.
    promised_id: StreamIdentifier,

    /// The header block fragment
    fragment: Buffer,

    /// The decoded (or to be encoded) header list.
    fields: HeaderList,

    pad_len: u8,

    /// The associated flags
    flags: Flag,
}

impl PushPromise {
    pub fn new(
        stream_id: StreamIdentifier,
        promised_id: StreamIdentifier,
        fields: HeaderList,
    ) -> Self {
        PushPromise {
            stream_id,
            promised_id,
            fragment: Buffer::new(),
            fields,
            pad_len: 0,
            flags: Flag::end_headers(),
        }
    }

    pub fn parse(header: FrameHeader, payload: &mut Buffer) -> H2Result<Self> {
        let mut pad_len = 0;
        if header.flag().is_padded() {
            if !payload.has_remaining() {
                return Err(H2Error::Short);
            }
            pad_len = payload.get_u8();
        }

        if payload.remaining() < 4 {
            return Err(H2Error::Short);
        }
        // R位在StreamIdentifier::parse中被丢弃
        let promised_id = StreamIdentifier::parse(payload);

        if pad_len as usize > payload.remaining() {
            return Err(H2Error::TooMuchPadding(pad_len));
        }
        let fragment = payload.read_buffer(payload.remaining() - pad_len as usize);

        Ok(PushPromise {
            stream_id: header.stream_id(),
            promised_id,
            fragment,
            fields: Vec::new(),
            pad_len,
            flags: header.flag(),
        })
    }

    pub fn stream_id(&self) -> StreamIdentifier {
        self.stream_id
    }

    pub fn promised_id(&self) -> StreamIdentifier {
        self.promised_id
    }

    pub fn flags(&self) -> Flag {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut Flag {
        &mut self.flags
    }

    pub fn is_end_headers(&self) -> bool {
        self.flags.is_end_headers()
    }

    pub fn set_end_headers(&mut self) {
        self.flags.set_end_headers();
    }

    pub fn pad_length(&self) -> u8 {
        self.pad_len
    }

    pub fn set_pad_length(&mut self, pad_len: u8) {
        self.pad_len = pad_len;
        if pad_len > 0 {
            self.flags.set_padded();
        } else {
            self.flags.unset_padded();
        }
    }

    pub fn fragment(&self) -> &Buffer {
        &self.fragment
    }

    pub fn fields(&self) -> &HeaderList {
        &self.fields
    }

    pub fn into_fields(self) -> HeaderList {
        self.fields
    }

    pub fn decode_fields(&mut self, decoder: &mut Decoder, update_table: bool) -> H2Result<&HeaderList> {
        self.fields = decoder.decode(self.fragment.as_slice(), update_table)?;
        Ok(&self.fields)
    }

    pub fn encode(mut self, encoder: &mut Encoder, dst: &mut Buffer) -> H2Result<usize> {
        if self.fragment.is_empty() && !self.fields.is_empty() {
            encoder.encode(&self.fields, true, &mut self.fragment)?;
        }

        let mut head = FrameHeader::new(Kind::PushPromise, self.flags, self.stream_id);
        head.length = self.fragment.len() as u32 + 4;
        if self.flags.is_padded() {
            head.length += self.pad_len as u32 + 1;
        }

        let mut size = 0;
        size += head.encode(dst)?;
        if self.flags.is_padded() {
            size += dst.put_u8(self.pad_len);
        }
        size += self.promised_id.encode(dst);
        size += dst.put_slice(self.fragment.as_slice());
        if self.flags.is_padded() {
            size += dst.put_bytes(0, self.pad_len as usize);
        }
        log::trace!("HTTP2: 编码推送信息; len={}", size);
        Ok(size)
    }
}

impl fmt::Debug for PushPromise {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PushPromise")
            .field("stream_id", &self.stream_id)
            .field("promised_id", &self.promised_id)
            .field("flags", &self.flags)
            // `fragment` and `fields` purposefully not included
            .finish()
    }
}
