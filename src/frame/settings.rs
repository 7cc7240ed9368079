use crate::{
    Buffer, H2Error, H2Result, DEFAULT_INITIAL_WINDOW_SIZE, DEFAULT_MAX_FRAME_SIZE,
    DEFAULT_SETTINGS_HEADER_TABLE_SIZE, MAX_INITIAL_WINDOW_SIZE, MAX_MAX_FRAME_SIZE,
};

use super::{Flag, FrameHeader, Kind, StreamIdentifier};

/// 六个SETTINGS参数的记录, 未协商时取RFC 7540 6.5.2的默认值
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Settings {
    flags: Flag,
    // Fields
    header_table_size: u32,
    enable_push: bool,
    max_concurrent_streams: u32,
    initial_window_size: u32,
    max_frame_size: u32,
    max_header_list_size: u32,
}

#[derive(Debug)]
pub enum Setting {
    HeaderTableSize(u32),
    EnablePush(u32),
    MaxConcurrentStreams(u32),
    InitialWindowSize(u32),
    MaxFrameSize(u32),
    MaxHeaderListSize(u32),
}

// ===== impl Setting =====

impl Setting {
    /// Creates a new `Setting` with the correct variant corresponding to the
    /// given setting id, based on the settings IDs defined in section
    /// 6.5.2.
    pub fn from_id(id: u16, val: u32) -> Option<Setting> {
        use self::Setting::*;

        match id {
            1 => Some(HeaderTableSize(val)),
            2 => Some(EnablePush(val)),
            3 => Some(MaxConcurrentStreams(val)),
            4 => Some(InitialWindowSize(val)),
            5 => Some(MaxFrameSize(val)),
            6 => Some(MaxHeaderListSize(val)),
            // 其余标识必须忽略
            _ => None,
        }
    }

    fn parse(bytes: &mut Buffer) -> Option<Setting> {
        let id: u16 = bytes.get_u16();
        let val: u32 = bytes.get_u32();

        Setting::from_id(id, val)
    }

    fn encode(&self, dst: &mut Buffer) -> usize {
        use self::Setting::*;

        let (kind, val) = match *self {
            HeaderTableSize(v) => (1, v),
            EnablePush(v) => (2, v),
            MaxConcurrentStreams(v) => (3, v),
            InitialWindowSize(v) => (4, v),
            MaxFrameSize(v) => (5, v),
            MaxHeaderListSize(v) => (6, v),
        };

        dst.put_u16(kind);
        dst.put_u32(val);
        6
    }
}

impl Settings {
    pub fn ack() -> Settings {
        Settings {
            flags: Flag::ack(),
            ..Settings::default()
        }
    }

    pub fn is_ack(&self) -> bool {
        self.flags.is_ack()
    }

    pub fn flags(&self) -> Flag {
        self.flags
    }

    pub fn header_table_size(&self) -> u32 {
        self.header_table_size
    }

    pub fn set_header_table_size(&mut self, size: u32) {
        self.header_table_size = size;
    }

    pub fn is_push_enabled(&self) -> bool {
        self.enable_push
    }

    pub fn set_enable_push(&mut self, enable: bool) {
        self.enable_push = enable;
    }

    pub fn max_concurrent_streams(&self) -> u32 {
        self.max_concurrent_streams
    }

    pub fn set_max_concurrent_streams(&mut self, max: u32) {
        self.max_concurrent_streams = max;
    }

    pub fn initial_window_size(&self) -> u32 {
        self.initial_window_size
    }

    pub fn set_initial_window_size(&mut self, size: u32) {
        self.initial_window_size = size;
    }

    pub fn max_frame_size(&self) -> u32 {
        self.max_frame_size
    }

    pub fn set_max_frame_size(&mut self, size: u32) {
        debug_assert!(DEFAULT_MAX_FRAME_SIZE <= size && size <= MAX_MAX_FRAME_SIZE);
        self.max_frame_size = size;
    }

    pub fn max_header_list_size(&self) -> u32 {
        self.max_header_list_size
    }

    pub fn set_max_header_list_size(&mut self, size: u32) {
        self.max_header_list_size = size;
    }

    pub fn parse(head: FrameHeader, payload: &mut Buffer) -> H2Result<Settings> {
        use self::Setting::*;

        debug_assert_eq!(head.kind(), &Kind::Settings);

        if !head.stream_id().is_zero() {
            return Err(H2Error::InvalidStreamId);
        }

        // Load the flag
        let flag = head.flag();

        if flag.is_ack() {
            // Ensure that the payload is empty
            if payload.has_remaining() {
                return Err(H2Error::InvalidPayloadLength);
            }

            // Return the ACK frame
            return Ok(Settings::ack());
        }

        // Ensure the payload length is correct, each setting is 6 bytes long.
        if payload.remaining() % 6 != 0 {
            return Err(H2Error::InvalidPayloadLength);
        }

        let mut settings = Settings::default();
        debug_assert!(!settings.flags.is_ack());

        let len = payload.remaining() / 6;
        for _ in 0..len {
            match Setting::parse(payload) {
                Some(HeaderTableSize(val)) => {
                    settings.header_table_size = val;
                }
                Some(EnablePush(val)) => match val {
                    0 | 1 => {
                        settings.enable_push = val == 1;
                    }
                    _ => {
                        return Err(H2Error::InvalidSettingValue);
                    }
                },
                Some(MaxConcurrentStreams(val)) => {
                    settings.max_concurrent_streams = val;
                }
                Some(InitialWindowSize(val)) => {
                    if val > MAX_INITIAL_WINDOW_SIZE {
                        return Err(H2Error::WindowOverflow);
                    } else {
                        settings.initial_window_size = val;
                    }
                }
                Some(MaxFrameSize(val)) => {
                    // 超出范围的值收紧到[2^14, 2^24-1]
                    let val = val.clamp(DEFAULT_MAX_FRAME_SIZE, MAX_MAX_FRAME_SIZE);
                    settings.max_frame_size = val;
                }
                Some(MaxHeaderListSize(val)) => {
                    settings.max_header_list_size = val;
                }
                None => {}
            }
        }
        Ok(settings)
    }

    pub fn payload_len(&self) -> usize {
        let mut len = 0;
        self.for_each(|_| len += 6);
        len
    }

    pub fn encode(&self, dst: &mut Buffer) -> H2Result<usize> {
        // Create & encode an appropriate frame head
        let mut head = FrameHeader::new(Kind::Settings, self.flags, StreamIdentifier::zero());
        head.length = self.payload_len() as u32;

        let mut size = 0;
        size += head.encode(dst)?;

        // Encode the settings
        self.for_each(|setting| {
            log::trace!("encoding setting; val={:?}", setting);
            size += setting.encode(dst)
        });
        Ok(size)
    }

    /// 只遍历与默认值不同的参数
    fn for_each<F: FnMut(Setting)>(&self, mut f: F) {
        use self::Setting::*;

        if self.flags.is_ack() {
            return;
        }

        if self.header_table_size != DEFAULT_SETTINGS_HEADER_TABLE_SIZE as u32 {
            f(HeaderTableSize(self.header_table_size));
        }

        if !self.enable_push {
            f(EnablePush(self.enable_push as u32));
        }

        if self.max_concurrent_streams != u32::MAX {
            f(MaxConcurrentStreams(self.max_concurrent_streams));
        }

        if self.initial_window_size != DEFAULT_INITIAL_WINDOW_SIZE {
            f(InitialWindowSize(self.initial_window_size));
        }

        if self.max_frame_size != DEFAULT_MAX_FRAME_SIZE {
            f(MaxFrameSize(self.max_frame_size));
        }

        if self.max_header_list_size != u32::MAX {
            f(MaxHeaderListSize(self.max_header_list_size));
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            flags: Flag::zero(),
            header_table_size: DEFAULT_SETTINGS_HEADER_TABLE_SIZE as u32,
            enable_push: true,
            max_concurrent_streams: u32::MAX,
            initial_window_size: DEFAULT_INITIAL_WINDOW_SIZE,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            max_header_list_size: u32::MAX,
        }
    }
}
