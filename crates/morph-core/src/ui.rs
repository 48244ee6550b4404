//! Transport and overlay state driven by [`HostEvent`]s.
//!
//! The state machine is platform-free; it answers each event with a short list
//! of [`UiEffect`]s which the web front-end applies to the DOM and the audio
//! element.

use crate::events::HostEvent;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiEffect {
    /// Fade the scanning overlay out (`true`) or back in.
    ScanningFaded(bool),
    LyricsVisible(bool),
    PlayIcon(PlayIcon),
    SeekMax(f64),
    SeekValue(f64),
    CurrentTimeText(String),
    DurationText(String),
    RequestPlay,
    RequestPause,
    SeekAudio(f64),
    OpenWebsite,
}

pub type UiEffects = SmallVec<[UiEffect; 3]>;

#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub target_found: bool,
    pub lyrics_visible: bool,
    pub playing: bool,
    pub duration_s: Option<f64>,
    pub current_s: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            target_found: false,
            lyrics_visible: false,
            playing: false,
            duration_s: None,
            current_s: 0.0,
        }
    }
}

impl UiState {
    pub fn handle(&mut self, event: &HostEvent) -> UiEffects {
        let mut fx = UiEffects::new();
        match *event {
            HostEvent::TargetFound => {
                self.target_found = true;
                fx.push(UiEffect::ScanningFaded(true));
            }
            HostEvent::TargetLost => {
                self.target_found = false;
                fx.push(UiEffect::ScanningFaded(false));
            }
            HostEvent::Play => {
                self.playing = true;
                fx.push(UiEffect::PlayIcon(PlayIcon::Pause));
            }
            HostEvent::Pause | HostEvent::Ended => {
                self.playing = false;
                fx.push(UiEffect::PlayIcon(PlayIcon::Play));
            }
            HostEvent::LoadedMetadata { duration_s } => {
                let Some(text) = format_time(duration_s) else {
                    log::warn!("audio duration is {}; waiting for the next event", duration_s);
                    return fx;
                };
                self.duration_s = Some(duration_s);
                fx.push(UiEffect::SeekMax(duration_s));
                fx.push(UiEffect::DurationText(text));
            }
            HostEvent::TimeUpdate {
                current_s,
                duration_s,
            } => {
                let Some(text) = format_time(current_s) else {
                    return fx;
                };
                self.current_s = current_s;
                fx.push(UiEffect::CurrentTimeText(text));
                fx.push(UiEffect::SeekValue(current_s));
                if let Some(left) = format_time(duration_s - current_s) {
                    fx.push(UiEffect::DurationText(left));
                }
            }
            HostEvent::Seek { position_s } => {
                let Some(text) = format_time(position_s) else {
                    return fx;
                };
                self.current_s = position_s;
                fx.push(UiEffect::SeekAudio(position_s));
                fx.push(UiEffect::CurrentTimeText(text));
            }
            HostEvent::AudioControlClicked => {
                fx.push(if self.playing {
                    UiEffect::RequestPause
                } else {
                    UiEffect::RequestPlay
                });
            }
            HostEvent::ToggleLyricsClicked => {
                self.lyrics_visible = !self.lyrics_visible;
                fx.push(UiEffect::LyricsVisible(self.lyrics_visible));
            }
            HostEvent::WebsiteClicked => fx.push(UiEffect::OpenWebsite),
        }
        fx
    }
}

/// `m:ss`, with a leading `-` for negative input. `None` for NaN/infinite.
pub fn format_time(seconds: f64) -> Option<String> {
    if !seconds.is_finite() {
        return None;
    }
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs().floor() as u64;
    Some(format!("{}{}:{:02}", sign, total / 60, total % 60))
}
