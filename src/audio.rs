//! Per-cell sound: either a sine tone at the emotion's pitch or a looping
//! stream, both routed through one master gain that follows the glows.

use crate::constants::GAIN_RAMP_SEC;
use glim_core::emotion::{target_gain, Emotion};
use wasm_bindgen::JsValue;
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

struct Stream {
    url: String,
    element: web::HtmlAudioElement,
    source: web::MediaElementAudioSourceNode,
}

pub struct CellAudio {
    ctx: web::AudioContext,
    master: web::GainNode,
    tone: Option<(Emotion, web::OscillatorNode)>,
    stream: Option<Stream>,
    // Last stream that could not be started; not retried every frame.
    failed_url: Option<String>,
    last_gain: Option<f32>,
}

impl CellAudio {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(js_err)?;
        let master = web::GainNode::new(&ctx).map_err(js_err)?;
        master
            .connect_with_audio_node(&ctx.destination())
            .map_err(js_err)?;
        _ = ctx.resume();
        log::info!("[audio] context ready");
        Ok(Self {
            ctx,
            master,
            tone: None,
            stream: None,
            failed_url: None,
            last_gain: None,
        })
    }

    /// Browsers keep a new context suspended until a user gesture.
    pub fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }

    /// Bring the graph in line with what the cell wants to play. Inactive
    /// audio silences both sources; a stream URL replaces the tone.
    pub fn sync(&mut self, active: bool, emotion: Emotion, stream_url: Option<&str>) {
        if !active {
            self.stop_tone();
            self.stop_stream();
            return;
        }
        match stream_url {
            Some(url) => {
                self.stop_tone();
                let playing = self.stream.as_ref().map(|s| s.url.as_str()) == Some(url);
                if !playing && self.failed_url.as_deref() != Some(url) {
                    self.stop_stream();
                    if let Err(e) = self.start_stream(url) {
                        log::warn!("[audio] stream {url} failed: {e}");
                        self.failed_url = Some(url.to_string());
                    }
                }
            }
            None => {
                self.stop_stream();
                if self.tone.as_ref().map(|(e, _)| *e) != Some(emotion) {
                    self.stop_tone();
                    if let Err(e) = self.start_tone(emotion) {
                        log::warn!("[audio] tone failed: {e}");
                    }
                }
            }
        }
    }

    /// Ramp the master gain to the level for `emotion` plus the current glow
    /// intensity. Repeated calls with the same level are ignored.
    pub fn follow_glows(&mut self, emotion: Emotion, total_glow_intensity: f32) {
        let gain = target_gain(emotion, total_glow_intensity);
        if self.last_gain == Some(gain) {
            return;
        }
        self.last_gain = Some(gain);
        let t = self.ctx.current_time() + GAIN_RAMP_SEC;
        _ = self.master.gain().linear_ramp_to_value_at_time(gain, t);
    }

    fn start_tone(&mut self, emotion: Emotion) -> anyhow::Result<()> {
        let profile = emotion.audio_profile();
        let osc = web::OscillatorNode::new(&self.ctx).map_err(js_err)?;
        osc.set_type(web::OscillatorType::Sine);
        let now = self.ctx.current_time();
        osc.frequency()
            .set_value_at_time(profile.frequency_hz, now)
            .map_err(js_err)?;
        _ = self
            .master
            .gain()
            .set_value_at_time(target_gain(emotion, 0.0), now);
        self.last_gain = None;
        osc.connect_with_audio_node(&self.master).map_err(js_err)?;
        osc.start().map_err(js_err)?;
        log::info!("[audio] tone {} {:.2}Hz", emotion.key(), profile.frequency_hz);
        self.tone = Some((emotion, osc));
        Ok(())
    }

    fn stop_tone(&mut self) {
        if let Some((_, osc)) = self.tone.take() {
            _ = osc.stop();
            _ = osc.disconnect();
        }
    }

    fn start_stream(&mut self, url: &str) -> anyhow::Result<()> {
        let element = web::HtmlAudioElement::new_with_src(url).map_err(js_err)?;
        element.set_loop(true);
        element.set_cross_origin(Some("anonymous"));
        let source = self
            .ctx
            .create_media_element_source(&element)
            .map_err(js_err)?;
        source
            .connect_with_audio_node(&self.master)
            .map_err(js_err)?;
        _ = element.play();
        log::info!("[audio] streaming {url}");
        self.stream = Some(Stream {
            url: url.to_string(),
            element,
            source,
        });
        Ok(())
    }

    fn stop_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            _ = stream.element.pause();
            _ = stream.source.disconnect();
        }
    }
}

impl Drop for CellAudio {
    fn drop(&mut self) {
        self.stop_tone();
        self.stop_stream();
        _ = self.master.disconnect();
        _ = self.ctx.close();
        log::info!("[audio] closed");
    }
}
