use crate::constants::{ANALYSER_SMOOTHING, FFT_SIZE};
use morph_core::SpectrumSource;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Media element routed through an analyser to the speakers.
pub struct AudioGraph {
    pub ctx: web::AudioContext,
    pub analyser: web::AnalyserNode,
    _source: web::MediaElementAudioSourceNode,
}

pub fn build_audio_graph(element: &web::HtmlAudioElement) -> anyhow::Result<AudioGraph> {
    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {:?}", e))?;
    let resumed = ctx.clone();
    spawn_local(async move {
        // autoplay policy keeps the context suspended until a user gesture
        if let Err(e) = resume_context(&resumed).await {
            log::warn!("[audio] context not resumed yet: {:?}", e);
        }
    });

    let analyser =
        web::AnalyserNode::new(&ctx).map_err(|e| anyhow::anyhow!("AnalyserNode: {:?}", e))?;
    analyser.set_fft_size(FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);

    let source = ctx
        .create_media_element_source(element)
        .map_err(|e| anyhow::anyhow!("MediaElementSource: {:?}", e))?;
    source
        .connect_with_audio_node(&analyser)
        .map_err(|e| anyhow::anyhow!("connect source: {:?}", e))?;
    analyser
        .connect_with_audio_node(&ctx.destination())
        .map_err(|e| anyhow::anyhow!("connect analyser: {:?}", e))?;

    log::info!(
        "[audio] analyser fft={} bins={}",
        analyser.fft_size(),
        analyser.frequency_bin_count()
    );
    Ok(AudioGraph {
        ctx,
        analyser,
        _source: source,
    })
}

async fn resume_context(ctx: &web::AudioContext) -> Result<(), JsValue> {
    JsFuture::from(ctx.resume()?).await.map(|_| ())
}

impl AudioGraph {
    pub fn spectrum(&self, element: &web::HtmlAudioElement) -> AnalyserSpectrum {
        AnalyserSpectrum {
            analyser: self.analyser.clone(),
            element: element.clone(),
        }
    }
}

/// Play/pause/seek on the audio element. Works with or without an analyser graph.
#[derive(Clone)]
pub struct Transport {
    element: web::HtmlAudioElement,
    ctx: Option<web::AudioContext>,
}

impl Transport {
    pub fn new(element: &web::HtmlAudioElement, graph: Option<&AudioGraph>) -> Self {
        Self {
            element: element.clone(),
            ctx: graph.map(|g| g.ctx.clone()),
        }
    }

    /// Start playback. Must run inside the click handler for autoplay rules.
    pub fn play(&self) {
        let ctx = self.ctx.clone();
        match self.element.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::error!("Audio control error: {:?}", e);
                    return;
                }
                if let Some(ctx) = ctx {
                    if let Err(e) = resume_context(&ctx).await {
                        log::error!("Audio control error: {:?}", e);
                    }
                }
            }),
            Err(e) => log::error!("Audio control error: {:?}", e),
        }
    }

    pub fn pause(&self) {
        if let Err(e) = self.element.pause() {
            log::error!("Audio control error: {:?}", e);
        }
    }

    pub fn seek(&self, position_s: f64) {
        self.element.set_current_time(position_s);
    }
}

/// Feeds the equalizer from the analyser while the element is playing.
pub struct AnalyserSpectrum {
    analyser: web::AnalyserNode,
    element: web::HtmlAudioElement,
}

impl SpectrumSource for AnalyserSpectrum {
    fn is_playing(&self) -> bool {
        !self.element.paused()
    }

    fn read_spectrum(&mut self, out: &mut [u8]) {
        self.analyser.get_byte_frequency_data(out);
    }
}
