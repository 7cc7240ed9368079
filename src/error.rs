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
// Created Date: 2023/09/12 10:21:44

use std::{fmt, result};

use crate::frame::Reason;
use crate::hpack::{DecoderError, HuffmanDecoderError};

/// 解析过程中所有可能的错误, 每个错误都能映射到RFC7540的错误码
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum H2Error {
    /// 数据不足, 无法完成解析
    Short,
    /// 未知的帧类型
    BadKind(u8),
    /// 非法的流标识, 如SETTINGS帧流标识非0
    InvalidStreamId,
    /// 流依赖指向自身
    InvalidDependencyId,
    /// 固定长度的负载长度不符, 或SETTINGS负载非6的倍数
    InvalidPayloadLength,
    /// 负载长度超过了MAX_FRAME_SIZE
    PayloadLengthTooLarge,
    /// padding长度超过了负载本身
    TooMuchPadding(u8),
    /// SETTINGS参数值非法
    InvalidSettingValue,
    /// 窗口大小超过2^31-1
    WindowOverflow,
    /// hpack解码失败
    Decoder(DecoderError),
    /// huffman解码失败
    Huffman(HuffmanDecoderError),
    /// 内部状态错误
    Internal,
    // 以下错误码由调用方构造后用于GOAWAY/RST_STREAM
    FlowControl,
    SettingsTimeout,
    StreamClosed,
    RefusedStream,
    Cancel,
    Connect,
    EnhanceYourCalm,
    InadequateSecurity,
    Http11Required,
}

impl H2Error {
    #[inline]
    pub fn description_str(&self) -> &'static str {
        match *self {
            H2Error::Short => "not enough data",
            H2Error::BadKind(_) => "unknown frame kind",
            H2Error::InvalidStreamId => "invalid stream id",
            H2Error::InvalidDependencyId => "stream depends on itself",
            H2Error::InvalidPayloadLength => "invalid payload length",
            H2Error::PayloadLengthTooLarge => "payload length exceeds max frame size",
            H2Error::TooMuchPadding(_) => "padding exceeds payload",
            H2Error::InvalidSettingValue => "invalid setting value",
            H2Error::WindowOverflow => "window size exceeds 2^31-1",
            H2Error::Decoder(_) => "hpack decode error",
            H2Error::Huffman(_) => "huffman decode error",
            H2Error::Internal => "internal error",
            H2Error::FlowControl => "flow control error",
            H2Error::SettingsTimeout => "settings timeout",
            H2Error::StreamClosed => "stream closed",
            H2Error::RefusedStream => "refused stream",
            H2Error::Cancel => "cancel",
            H2Error::Connect => "connect error",
            H2Error::EnhanceYourCalm => "enhance your calm",
            H2Error::InadequateSecurity => "inadequate security",
            H2Error::Http11Required => "http/1.1 required",
        }
    }

    /// 映射到发往对端的错误码
    pub fn error_code(&self) -> Reason {
        match *self {
            H2Error::Short
            | H2Error::BadKind(_)
            | H2Error::InvalidStreamId
            | H2Error::InvalidDependencyId
            | H2Error::TooMuchPadding(_)
            | H2Error::InvalidSettingValue => Reason::PROTOCOL_ERROR,
            H2Error::Internal => Reason::INTERNAL_ERROR,
            H2Error::FlowControl | H2Error::WindowOverflow => Reason::FLOW_CONTROL_ERROR,
            H2Error::SettingsTimeout => Reason::SETTINGS_TIMEOUT,
            H2Error::StreamClosed => Reason::STREAM_CLOSED,
            H2Error::InvalidPayloadLength | H2Error::PayloadLengthTooLarge => {
                Reason::FRAME_SIZE_ERROR
            }
            H2Error::RefusedStream => Reason::REFUSED_STREAM,
            H2Error::Cancel => Reason::CANCEL,
            H2Error::Decoder(_) | H2Error::Huffman(_) => Reason::COMPRESSION_ERROR,
            H2Error::Connect => Reason::CONNECT_ERROR,
            H2Error::EnhanceYourCalm => Reason::ENHANCE_YOUR_CALM,
            H2Error::InadequateSecurity => Reason::INADEQUATE_SECURITY,
            H2Error::Http11Required => Reason::HTTP_1_1_REQUIRED,
        }
    }
}

impl fmt::Display for H2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description_str())
    }
}

impl std::error::Error for H2Error {}

impl From<DecoderError> for H2Error {
    fn from(e: DecoderError) -> Self {
        H2Error::Decoder(e)
    }
}

impl From<HuffmanDecoderError> for H2Error {
    fn from(e: HuffmanDecoderError) -> Self {
        H2Error::Huffman(e)
    }
}

pub type H2Result<T> = result::Result<T, H2Error>;
