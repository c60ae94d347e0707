use crate::control::control_msg::ControlMsg;

/// Video heights selectable by the resolution control, lowest first.
pub const HEIGHT_LADDER: [u32; 6] = [144, 240, 360, 480, 720, 1080];

pub const DEFAULT_BITRATE_KBPS: u32 = 1000;
pub const DEFAULT_FPS: u32 = 30;

/// Encoding targets the client asks the sender to honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamTargets {
    bitrate_kbps: u32,
    fps: u32,
    height_index: usize,
}

impl Default for StreamTargets {
    fn default() -> Self {
        Self {
            bitrate_kbps: DEFAULT_BITRATE_KBPS,
            fps: DEFAULT_FPS,
            height_index: HEIGHT_LADDER.len() - 1,
        }
    }
}

impl StreamTargets {
    #[must_use]
    pub fn new(bitrate_kbps: u32, fps: u32, height: u32) -> Self {
        let mut t = Self {
            bitrate_kbps,
            fps,
            ..Self::default()
        };
        t.set_height(height);
        t
    }

    pub const fn bitrate_kbps(&self) -> u32 {
        self.bitrate_kbps
    }

    pub const fn fps(&self) -> u32 {
        self.fps
    }

    pub const fn height(&self) -> u32 {
        HEIGHT_LADDER[self.height_index]
    }

    pub const fn height_index(&self) -> usize {
        self.height_index
    }

    pub fn set_bitrate_kbps(&mut self, kbps: u32) -> ControlMsg {
        self.bitrate_kbps = kbps;
        self.bitrate_msg()
    }

    pub fn set_fps(&mut self, fps: u32) -> ControlMsg {
        self.fps = fps;
        ControlMsg::TargetFps(fps)
    }

    /// Selects a ladder step; out-of-range indices clamp to the top step.
    pub fn set_height_index(&mut self, index: usize) -> ControlMsg {
        self.height_index = index.min(HEIGHT_LADDER.len() - 1);
        ControlMsg::TargetHeight(self.height())
    }

    /// Selects the highest ladder step not above `height` (the lowest step when
    /// `height` is below the ladder).
    pub fn set_height(&mut self, height: u32) -> ControlMsg {
        let index = HEIGHT_LADDER
            .iter()
            .rposition(|&h| h <= height)
            .unwrap_or(0);
        self.set_height_index(index)
    }

    fn bitrate_msg(&self) -> ControlMsg {
        ControlMsg::TargetBitrate(u64::from(self.bitrate_kbps) * 1000)
    }

    /// Messages announcing every current target, sent when the channel opens.
    #[must_use]
    pub fn announce(&self) -> [ControlMsg; 3] {
        [
            self.bitrate_msg(),
            ControlMsg::TargetFps(self.fps),
            ControlMsg::TargetHeight(self.height()),
        ]
    }
}
