//! Host events (tracking, media transport, UI clicks) and their dispatch.
//!
//! Everything runs on the browser's single thread: sources push into an
//! [`EventQueue`] and the [`EventDispatcher`] drains it in order. Each
//! [`EventKind`] has at most one handler; registering again replaces it.

use fnv::FnvHashMap;
use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    TargetFound,
    TargetLost,
    Play,
    Pause,
    Ended,
    /// Duration may be NaN until the media metadata has really loaded.
    LoadedMetadata { duration_s: f64 },
    TimeUpdate { current_s: f64, duration_s: f64 },
    Seek { position_s: f64 },
    AudioControlClicked,
    ToggleLyricsClicked,
    WebsiteClicked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    TargetFound,
    TargetLost,
    Play,
    Pause,
    Ended,
    LoadedMetadata,
    TimeUpdate,
    Seek,
    AudioControlClicked,
    ToggleLyricsClicked,
    WebsiteClicked,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::TargetFound,
        EventKind::TargetLost,
        EventKind::Play,
        EventKind::Pause,
        EventKind::Ended,
        EventKind::LoadedMetadata,
        EventKind::TimeUpdate,
        EventKind::Seek,
        EventKind::AudioControlClicked,
        EventKind::ToggleLyricsClicked,
        EventKind::WebsiteClicked,
    ];
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::TargetFound => EventKind::TargetFound,
            HostEvent::TargetLost => EventKind::TargetLost,
            HostEvent::Play => EventKind::Play,
            HostEvent::Pause => EventKind::Pause,
            HostEvent::Ended => EventKind::Ended,
            HostEvent::LoadedMetadata { .. } => EventKind::LoadedMetadata,
            HostEvent::TimeUpdate { .. } => EventKind::TimeUpdate,
            HostEvent::Seek { .. } => EventKind::Seek,
            HostEvent::AudioControlClicked => EventKind::AudioControlClicked,
            HostEvent::ToggleLyricsClicked => EventKind::ToggleLyricsClicked,
            HostEvent::WebsiteClicked => EventKind::WebsiteClicked,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<HostEvent>,
}

impl EventQueue {
    #[inline]
    pub fn push(&mut self, event: HostEvent) {
        self.pending.push_back(event);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<HostEvent> {
        self.pending.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

pub type Handler = Box<dyn FnMut(&HostEvent)>;

#[derive(Default)]
pub struct EventDispatcher {
    handlers: FnvHashMap<EventKind, Handler>,
}

impl EventDispatcher {
    /// Install `handler` for `kind`. Returns `true` when it replaced an existing one.
    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&HostEvent) + 'static) -> bool {
        self.handlers.insert(kind, Box::new(handler)).is_some()
    }

    pub fn off(&mut self, kind: EventKind) -> bool {
        self.handlers.remove(&kind).is_some()
    }

    #[inline]
    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Run the handler for `event`; events without a handler are dropped.
    pub fn dispatch(&mut self, event: &HostEvent) -> bool {
        match self.handlers.get_mut(&event.kind()) {
            Some(handler) => {
                handler(event);
                true
            }
            None => {
                log::trace!("[events] no handler for {:?}", event.kind());
                false
            }
        }
    }

    /// Drain `queue` in FIFO order. Returns how many events found a handler.
    pub fn dispatch_all(&mut self, queue: &mut EventQueue) -> usize {
        let mut handled = 0;
        while let Some(event) = queue.pop() {
            if self.dispatch(&event) {
                handled += 1;
            }
        }
        handled
    }
}

/// Queue and dispatcher together; `emit` enqueues and drains in one step.
#[derive(Default)]
pub struct EventBus {
    pub queue: EventQueue,
    pub dispatcher: EventDispatcher,
}

impl EventBus {
    pub fn emit(&mut self, event: HostEvent) -> usize {
        self.queue.push(event);
        self.dispatcher.dispatch_all(&mut self.queue)
    }
}
