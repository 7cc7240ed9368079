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
// Created Date: 2023/09/15 09:41:17

use crate::{WindowSize, DEFAULT_INITIAL_WINDOW_SIZE};

/// 流的六种状态, RFC 7540 5.1, 状态的流转由上层驱动
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StreamStatus {
    Idle,
    Reserved,
    Open,
    HalfClosedLocal,
    HalfClosedRemote,
    Closed,
}

impl StreamStatus {
    /// 该状态迁移是否出现在RFC 7540 5.1的状态图中
    pub fn can_transition(&self, to: StreamStatus) -> bool {
        use StreamStatus::*;
        match (*self, to) {
            (Idle, Open) | (Idle, Reserved) => true,
            (Reserved, HalfClosedLocal) | (Reserved, HalfClosedRemote) | (Reserved, Closed) => {
                true
            }
            (Open, HalfClosedLocal) | (Open, HalfClosedRemote) | (Open, Closed) => true,
            (HalfClosedLocal, Closed) | (HalfClosedRemote, Closed) => true,
            _ => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        *self == StreamStatus::Closed
    }

    pub fn name(&self) -> &'static str {
        match *self {
            StreamStatus::Idle => "idle",
            StreamStatus::Reserved => "reserved",
            StreamStatus::Open => "open",
            StreamStatus::HalfClosedLocal => "half-closed (local)",
            StreamStatus::HalfClosedRemote => "half-closed (remote)",
            StreamStatus::Closed => "closed",
        }
    }
}

/// 单个流的记录, 只保存数据不推动状态
#[derive(Debug, Clone)]
pub struct Stream {
    status: StreamStatus,
    window_size: WindowSize,
}

impl Stream {
    pub fn new() -> Stream {
        Stream {
            status: StreamStatus::Idle,
            window_size: DEFAULT_INITIAL_WINDOW_SIZE,
        }
    }

    pub fn status(&self) -> StreamStatus {
        self.status
    }

    pub fn set_status(&mut self, status: StreamStatus) {
        self.status = status;
    }

    pub fn window_size(&self) -> WindowSize {
        self.window_size
    }

    pub fn set_window_size(&mut self, window_size: WindowSize) {
        self.window_size = window_size;
    }
}

impl Default for Stream {
    fn default() -> Stream {
        Stream::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        use StreamStatus::*;
        assert!(Idle.can_transition(Open));
        assert!(Idle.can_transition(Reserved));
        assert!(Open.can_transition(HalfClosedLocal));
        assert!(HalfClosedRemote.can_transition(Closed));
        assert!(!Closed.can_transition(Open));
        assert!(!Idle.can_transition(HalfClosedLocal));
        assert!(!HalfClosedLocal.can_transition(Open));
    }
}
