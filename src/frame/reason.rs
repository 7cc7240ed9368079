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
// Created Date: 2023/09/13 11:20:45

use std::fmt;

/// 线上传输的错误码, RFC 7540 7节, 未知的错误码原样保留
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct Reason(u32);

impl Reason {
    pub const NO_ERROR: Reason = Reason(0x0);
    pub const PROTOCOL_ERROR: Reason = Reason(0x1);
    pub const INTERNAL_ERROR: Reason = Reason(0x2);
    pub const FLOW_CONTROL_ERROR: Reason = Reason(0x3);
    pub const SETTINGS_TIMEOUT: Reason = Reason(0x4);
    pub const STREAM_CLOSED: Reason = Reason(0x5);
    pub const FRAME_SIZE_ERROR: Reason = Reason(0x6);
    pub const REFUSED_STREAM: Reason = Reason(0x7);
    pub const CANCEL: Reason = Reason(0x8);
    pub const COMPRESSION_ERROR: Reason = Reason(0x9);
    pub const CONNECT_ERROR: Reason = Reason(0xA);
    pub const ENHANCE_YOUR_CALM: Reason = Reason(0xB);
    pub const INADEQUATE_SECURITY: Reason = Reason(0xC);
    pub const HTTP_1_1_REQUIRED: Reason = Reason(0xD);

    /// Get a string description of the error code.
    pub fn description(&self) -> &str {
        match self.0 {
            0x0 => "not a result of an error",
            0x1 => "unspecific protocol error detected",
            0x2 => "unexpected internal error encountered",
            0x3 => "flow-control protocol violated",
            0x4 => "settings ACK not received in timely manner",
            0x5 => "received frame when stream half-closed",
            0x6 => "frame with invalid size",
            0x7 => "refused stream before processing any application logic",
            0x8 => "stream no longer needed",
            0x9 => "unable to maintain the header compression context",
            0xA => "connection established in response to a CONNECT request was reset or abnormally closed",
            0xB => "detected excessive load generating behavior",
            0xC => "security properties do not meet minimum requirements",
            0xD => "endpoint requires HTTP/1.1",
            _ => "unknown reason",
        }
    }
}

impl From<u32> for Reason {
    fn from(src: u32) -> Reason {
        Reason(src)
    }
}

impl From<Reason> for u32 {
    fn from(src: Reason) -> u32 {
        src.0
    }
}

impl fmt::Debug for Reason {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let name = match self.0 {
            0x0 => "NO_ERROR",
            0x1 => "PROTOCOL_ERROR",
            0x2 => "INTERNAL_ERROR",
            0x3 => "FLOW_CONTROL_ERROR",
            0x4 => "SETTINGS_TIMEOUT",
            0x5 => "STREAM_CLOSED",
            0x6 => "FRAME_SIZE_ERROR",
            0x7 => "REFUSED_STREAM",
            0x8 => "CANCEL",
            0x9 => "COMPRESSION_ERROR",
            0xA => "CONNECT_ERROR",
            0xB => "ENHANCE_YOUR_CALM",
            0xC => "INADEQUATE_SECURITY",
            0xD => "HTTP_1_1_REQUIRED",
            other => return write!(fmt, "Reason(0x{:x})", other),
        };
        write!(fmt, "{}", name)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.description())
    }
}
