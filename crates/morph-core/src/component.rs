/// Clock handed to every component once per rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Monotonic host clock in milliseconds.
    pub now_ms: f64,
    /// Time since the previous frame, zero on the first one.
    pub delta_ms: f64,
}

impl FrameTime {
    pub fn new(now_ms: f64, delta_ms: f64) -> Self {
        Self { now_ms, delta_ms }
    }
}

/// Something the host render loop initialises once and then ticks every frame.
pub trait FrameComponent {
    fn on_init(&mut self, time: FrameTime);
    fn on_tick(&mut self, time: FrameTime);
}

/// Tracks the previous frame's clock so hosts can build [`FrameTime`]s.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn advance(&mut self, now_ms: f64) -> FrameTime {
        let delta_ms = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_ms = Some(now_ms);
        FrameTime { now_ms, delta_ms }
    }
}
