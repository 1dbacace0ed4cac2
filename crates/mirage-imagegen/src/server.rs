use mirage_config::{Config, ImageGenProviderType};
use mirage_core::{MediaKind, MediaProvider, MediaResponse, SOURCE_SYNTHESIZER, Waterfall};

use crate::{
    provider::{openai::OpenAiImageProvider, replicate::ReplicateProvider},
    types::ImageJob,
};

/// Image generation engine: provider waterfall with gradient fallback
pub struct Server {
    waterfall: Waterfall<ImageJob>,
}

impl Server {
    /// Generate an image for a validated job
    ///
    /// Runs the provider waterfall; on exhaustion, renders a deterministic
    /// gradient placeholder locally.
    ///
    /// # Errors
    ///
    /// Only [`crate::ImageGenError::SynthesisFailed`], which indicates an
    /// internal invariant violation rather than an external condition.
    pub async fn generate(&self, job: ImageJob) -> crate::error::Result<MediaResponse> {
        if let Some((source, media)) = self.waterfall.run(&job).await {
            return Ok(MediaResponse {
                kind: MediaKind::Image,
                bytes: media.bytes,
                mime_type: media.mime_type,
                suggested_filename: job.suggested_filename(),
                source,
                echoed_options: job.echoed_options(),
            });
        }

        tracing::info!(
            providers = self.waterfall.provider_count(),
            width = job.width,
            height = job.height,
            "image providers exhausted, rendering placeholder gradient"
        );

        let bytes = mirage_synth::render_image(&job.prompt, job.width, job.height, job.format)?;

        Ok(MediaResponse {
            kind: MediaKind::Image,
            bytes,
            mime_type: job.format.mime_type().to_owned(),
            suggested_filename: job.suggested_filename(),
            source: SOURCE_SYNTHESIZER.to_owned(),
            echoed_options: job.echoed_options(),
        })
    }
}

/// Builder for constructing the image engine from configuration
pub struct ImageGenServerBuilder<'a> {
    config: &'a Config,
}

impl<'a> ImageGenServerBuilder<'a> {
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> Server {
        let mut providers: Vec<(u32, Box<dyn MediaProvider<ImageJob>>)> = Vec::new();

        for (name, provider_config) in &self.config.imagegen.providers {
            tracing::debug!(
                provider = %name,
                priority = provider_config.priority,
                configured = provider_config.api_key.is_some(),
                "registering image provider"
            );

            let provider: Box<dyn MediaProvider<ImageJob>> = match &provider_config.provider_type {
                ImageGenProviderType::OpenaiImages => Box::new(OpenAiImageProvider::new(name.clone(), provider_config)),
                ImageGenProviderType::Replicate => Box::new(ReplicateProvider::new(name.clone(), provider_config)),
            };

            providers.push((provider_config.priority, provider));
        }

        if providers.is_empty() {
            tracing::info!("no image providers configured, every request will be synthesized");
        }

        Server {
            waterfall: Waterfall::new(providers, self.config.fallback.min_image_bytes),
        }
    }
}
