use mirage_config::{Config, SynthesisConfig, TtsProviderType};
use mirage_core::{MediaKind, MediaProvider, MediaResponse, SOURCE_SYNTHESIZER, Waterfall};
use mirage_synth::VoiceParams;

use crate::{
    provider::{elevenlabs::ElevenLabsProvider, openai_tts::OpenAiTtsProvider},
    types::{AudioFormat, SpeechJob},
};

/// Speech generation engine: provider waterfall with synthesized fallback
pub struct Server {
    waterfall: Waterfall<SpeechJob>,
    synthesis: SynthesisConfig,
}

impl Server {
    /// Generate speech audio for a validated job
    ///
    /// Runs the provider waterfall; on exhaustion, synthesizes placeholder
    /// audio locally. Always terminates with bytes for a valid job.
    ///
    /// # Errors
    ///
    /// Only [`crate::TtsError::SynthesisFailed`], which indicates an
    /// internal invariant violation rather than an external condition.
    pub async fn generate(&self, job: SpeechJob) -> crate::error::Result<MediaResponse> {
        if let Some((source, media)) = self.waterfall.run(&job).await {
            return Ok(MediaResponse {
                kind: MediaKind::Audio,
                bytes: media.bytes,
                mime_type: media.mime_type,
                suggested_filename: job.suggested_filename(),
                source,
                echoed_options: job.echoed_options(),
            });
        }

        tracing::info!(
            providers = self.waterfall.provider_count(),
            format = job.format.token(),
            "speech providers exhausted, synthesizing placeholder audio"
        );

        let params = VoiceParams {
            sample_rate: self.synthesis.sample_rate,
            seconds_per_char: self.synthesis.seconds_per_char,
            max_seconds: self.synthesis.max_seconds,
            rate: job.rate,
            pitch: job.pitch,
            volume: job.volume,
        };

        let bytes = match job.format {
            AudioFormat::Wav => {
                let pcm = mirage_synth::render_pcm(&job.text, &params);
                mirage_synth::encode_wav(&pcm, params.sample_rate)?
            }
            AudioFormat::Mp3 => mirage_synth::placeholder_mp3(&job.text, params.duration_secs(&job.text)),
        };

        Ok(MediaResponse {
            kind: MediaKind::Audio,
            bytes,
            mime_type: job.format.mime_type().to_owned(),
            suggested_filename: job.suggested_filename(),
            source: SOURCE_SYNTHESIZER.to_owned(),
            echoed_options: job.echoed_options(),
        })
    }
}

/// Builder for constructing the speech engine from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a Config,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> Server {
        let mut providers: Vec<(u32, Box<dyn MediaProvider<SpeechJob>>)> = Vec::new();

        for (name, provider_config) in &self.config.tts.providers {
            tracing::debug!(
                provider = %name,
                priority = provider_config.priority,
                configured = provider_config.api_key.is_some(),
                "registering speech provider"
            );

            let provider: Box<dyn MediaProvider<SpeechJob>> = match &provider_config.provider_type {
                TtsProviderType::OpenaiTts => Box::new(OpenAiTtsProvider::new(name.clone(), provider_config)),
                TtsProviderType::Elevenlabs => Box::new(ElevenLabsProvider::new(name.clone(), provider_config)),
            };

            providers.push((provider_config.priority, provider));
        }

        if providers.is_empty() {
            tracing::info!("no speech providers configured, every request will be synthesized");
        }

        Server {
            waterfall: Waterfall::new(providers, self.config.fallback.min_audio_bytes),
            synthesis: self.config.synthesis.clone(),
        }
    }
}
