use crate::{Buffer, H2Error, H2Result};

use super::{Flag, FrameHeader, Kind, StreamIdentifier};

/// DATA帧, 负载为应用数据加可选的padding
#[derive(Eq, PartialEq, Debug)]
pub struct Data {
    stream_id: StreamIdentifier,
    data: Buffer,
    flags: Flag,
    pad_len: u8,
}

impl Data {
    pub fn new(stream_id: StreamIdentifier, data: Buffer) -> Self {
        assert!(!stream_id.is_zero());
        Data {
            stream_id,
            data,
            flags: Flag::zero(),
            pad_len: 0,
        }
    }

    pub fn parse(header: FrameHeader, payload: &mut Buffer) -> H2Result<Data> {
        let mut pad_len = 0;
        if header.flag().is_padded() {
            if !payload.has_remaining() {
                return Err(H2Error::Short);
            }
            pad_len = payload.get_u8();
            if pad_len as usize > payload.remaining() {
                return Err(H2Error::TooMuchPadding(pad_len));
            }
        }
        let data = payload.read_buffer(payload.remaining() - pad_len as usize);
        // 余下的padding字节直接丢弃
        Ok(Data {
            stream_id: header.stream_id(),
            data,
            flags: header.flag(),
            pad_len,
        })
    }

    pub fn stream_id(&self) -> StreamIdentifier {
        self.stream_id
    }

    pub fn flags(&self) -> Flag {
        self.flags
    }

    pub fn is_end_stream(&self) -> bool {
        self.flags.is_end_stream()
    }

    pub fn set_end_stream(&mut self, val: bool) {
        if val {
            self.flags.set_end_stream();
        } else {
            self.flags.unset_end_stream();
        }
    }

    pub fn is_padded(&self) -> bool {
        self.flags.is_padded()
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

    pub fn payload(&self) -> &Buffer {
        &self.data
    }

    pub fn into_payload(self) -> Buffer {
        self.data
    }

    fn head(&self) -> FrameHeader {
        let mut head = FrameHeader::new(Kind::Data, self.flags, self.stream_id);
        head.length = self.data.len() as u32;
        if self.flags.is_padded() {
            head.length += self.pad_len as u32 + 1;
        }
        head
    }

    pub fn encode(&self, dst: &mut Buffer) -> H2Result<usize> {
        let mut size = 0;
        size += self.head().encode(dst)?;
        if self.flags.is_padded() {
            size += dst.put_u8(self.pad_len);
        }
        size += dst.put_slice(self.data.as_slice());
        if self.flags.is_padded() {
            size += dst.put_bytes(0, self.pad_len as usize);
        }
        log::trace!("HTTP2: 编码数据帧; len={}", size);
        Ok(size)
    }
}
