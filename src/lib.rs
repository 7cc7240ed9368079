#[macro_use]
extern crate bitflags;

mod buffer;
mod error;
pub mod frame;
mod helper;
pub mod hpack;
mod stream;

pub use buffer::Buffer;
pub use error::{H2Error, H2Result};
pub use frame::{
    decode_frame, encode_frame, Flag, Frame, FrameHeader, Kind, Reason, Settings,
    StreamIdentifier,
};
pub use helper::Helper;
pub use hpack::{Decoder, Encoder, FieldRepresentation, HeaderField, HeaderList, HeaderTable};
pub use stream::{Stream, StreamStatus};

/// 客户端在发送任何帧之前必须先发送的连接前言
pub const HTTP2_MAGIC: &[u8] = b"PRI * HTTP/2.0\r\n\r\nSM\r\n\r\n";
pub const MAGIC_LEN: usize = HTTP2_MAGIC.len();

pub type FrameSize = u32;
pub type WindowSize = u32;

/// 默认的header最大长度值
pub const DEFAULT_SETTINGS_HEADER_TABLE_SIZE: usize = 4_096;

/// 默认的发送窗口大小值
pub const DEFAULT_INITIAL_WINDOW_SIZE: u32 = 65_535;

/// 默认的单帧大小
pub const DEFAULT_MAX_FRAME_SIZE: FrameSize = 16_384;

/// 最大的单帧大小
pub const MAX_MAX_FRAME_SIZE: FrameSize = (1 << 24) - 1;

/// 最大的窗口大小
pub const MAX_WINDOW_SIZE: WindowSize = (1 << 31) - 1;

/// 最大的初始窗口大小, 超过则为FLOW_CONTROL_ERROR
pub const MAX_INITIAL_WINDOW_SIZE: WindowSize = (1 << 31) - 1;
