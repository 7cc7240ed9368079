mod continuation;
mod data;
mod flag;
mod frame;
mod go_away;
mod headers;
mod kind;
mod ping;
mod priority;
mod reason;
mod reset;
mod settings;
mod window_update;

use std::cmp::Ordering;

pub use self::continuation::Continuation;
pub use self::data::Data;
pub use self::flag::Flag;
pub use self::frame::{Frame, FrameHeader, FRAME_HEADER_BYTES};
pub use self::go_away::GoAway;
pub use self::headers::{Headers, PushPromise};
pub use self::kind::Kind;
pub use self::ping::Ping;
pub use self::priority::{Priority, StreamDependency};
pub use self::reason::Reason;
pub use self::reset::Reset;
pub use self::settings::Settings;
pub use self::window_update::WindowUpdate;

use crate::{Buffer, H2Error, H2Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StreamIdentifier(pub u32);

impl StreamIdentifier {
    /// 读取31位的流标识, 保留位直接丢弃
    pub fn parse(buf: &mut Buffer) -> StreamIdentifier {
        if buf.remaining() < 4 {
            return StreamIdentifier(0);
        }
        StreamIdentifier(read_u31(buf))
    }

    pub fn zero() -> StreamIdentifier {
        StreamIdentifier(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn encode(&self, buffer: &mut Buffer) -> usize {
        buffer.put_u32(self.0 & MASK_U31)
    }
}

impl From<u32> for StreamIdentifier {
    fn from(value: u32) -> Self {
        StreamIdentifier(value)
    }
}

impl Ord for StreamIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for StreamIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub const MASK_U31: u32 = (1u32 << 31) - 1;

#[inline(always)]
pub fn read_u31(buf: &mut Buffer) -> u32 {
    if buf.remaining() < 4 {
        return 0;
    }
    let val = buf.get_u32();
    val & MASK_U31
}

#[inline(always)]
pub fn read_u24(buf: &mut Buffer) -> u32 {
    if buf.remaining() < 3 {
        return 0;
    }
    (buf.get_u8() as u32) << 16 | (buf.get_u8() as u32) << 8 | buf.get_u8() as u32
}

#[inline(always)]
pub fn encode_u24(buf: &mut Buffer, val: u32) -> usize {
    buf.put_u8((val >> 16) as u8);
    buf.put_u8((val >> 8) as u8);
    buf.put_u8((val >> 0) as u8);
    3
}

/// 从字节流解析一个完整的帧, 负载被切出独立持有, 解码不会越过Length
pub fn decode_frame(buf: &mut Buffer, max_frame_size: u32) -> H2Result<Frame> {
    let header = FrameHeader::parse(buf)?;
    if header.length > max_frame_size {
        return Err(H2Error::PayloadLengthTooLarge);
    }
    if buf.remaining() < header.length as usize {
        return Err(H2Error::Short);
    }
    let payload = buf.read_buffer(header.length as usize);
    Frame::parse(header, payload)
}

/// 编码一个帧写入buf, 返回写入的字节数, 头部与负载一起写出
pub fn encode_frame(
    frame: Frame,
    encoder: &mut crate::hpack::Encoder,
    buf: &mut Buffer,
) -> H2Result<usize> {
    frame.encode(encoder, buf)
}
