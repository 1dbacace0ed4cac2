use async_trait::async_trait;

/// Raw media returned by a provider
#[derive(Debug, Clone)]
pub struct MediaBytes {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Why a provider attempt produced nothing usable
#[derive(Debug)]
pub enum FailureReason {
    /// No credential configured; skipped without network I/O
    Unconfigured,
    /// Transport-level failure (connect, timeout, TLS)
    Connection(String),
    /// Upstream returned a non-success status
    Status { status: u16, message: String },
    /// Upstream returned 200 with no body
    EmptyBody,
    /// Upstream payload could not be interpreted (bad JSON, bad base64,
    /// failed job, polls exhausted)
    Invalid(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconfigured => write!(f, "no API key configured"),
            Self::Connection(e) => write!(f, "connection error: {e}"),
            Self::Status { status, message } => write!(f, "upstream status {status}: {message}"),
            Self::EmptyBody => write!(f, "upstream returned an empty body"),
            Self::Invalid(e) => write!(f, "unusable upstream payload: {e}"),
        }
    }
}

/// Outcome of a single provider attempt
///
/// Providers never propagate errors past this boundary; every failure mode
/// collapses into a [`FailureReason`] the waterfall can log and move past.
#[derive(Debug)]
pub enum ProviderOutcome {
    Success(MediaBytes),
    Failure(FailureReason),
}

/// One external generation service
#[async_trait]
pub trait MediaProvider<R>: Send + Sync {
    /// Attempt generation; exactly one network exchange on the happy path
    async fn fetch(&self, request: &R) -> ProviderOutcome;

    /// Provider name, as configured
    fn name(&self) -> &str;
}

/// A 200 reply declaring a text or JSON body is an upstream error page,
/// not media
fn is_media_content_type(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    !(essence.starts_with("text/") || essence == "application/json" || essence == "application/xml")
}

/// Sequential, priority-ordered provider waterfall
///
/// Providers are tried strictly in order and the first plausible success
/// short-circuits; later providers are never invoked after a hit. A 200
/// body only counts as plausible when it is large enough and its declared
/// content type is not text or JSON. When every provider is unconfigured
/// or fails, `run` returns `None` and the caller falls back to local
/// synthesis.
pub struct Waterfall<R> {
    providers: Vec<Box<dyn MediaProvider<R>>>,
    min_bytes: usize,
}

impl<R: Sync> Waterfall<R> {
    /// Build from `(priority, provider)` pairs; lower priority runs first,
    /// ties keep configuration order
    pub fn new(mut providers: Vec<(u32, Box<dyn MediaProvider<R>>)>, min_bytes: usize) -> Self {
        providers.sort_by_key(|(priority, _)| *priority);
        Self {
            providers: providers.into_iter().map(|(_, provider)| provider).collect(),
            min_bytes,
        }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Run the waterfall, returning the producing provider's name and its
    /// media, or `None` on exhaustion
    pub async fn run(&self, request: &R) -> Option<(String, MediaBytes)> {
        for provider in &self.providers {
            match provider.fetch(request).await {
                ProviderOutcome::Success(media) => {
                    // The accept/fall-through decision is logged explicitly
                    // rather than silently absorbing truncated bodies.
                    if !is_media_content_type(&media.mime_type) {
                        tracing::warn!(
                            provider = provider.name(),
                            mime_type = %media.mime_type,
                            "provider returned a non-media content type, trying next provider"
                        );
                        continue;
                    }
                    if media.bytes.len() < self.min_bytes {
                        tracing::warn!(
                            provider = provider.name(),
                            bytes = media.bytes.len(),
                            min_bytes = self.min_bytes,
                            "provider body below plausibility threshold, trying next provider"
                        );
                        continue;
                    }

                    tracing::info!(
                        provider = provider.name(),
                        bytes = media.bytes.len(),
                        mime_type = %media.mime_type,
                        "provider produced media"
                    );
                    return Some((provider.name().to_owned(), media));
                }
                ProviderOutcome::Failure(FailureReason::Unconfigured) => {
                    tracing::debug!(provider = provider.name(), "skipping unconfigured provider");
                }
                ProviderOutcome::Failure(reason) => {
                    tracing::warn!(
                        provider = provider.name(),
                        %reason,
                        "provider attempt failed, trying next provider"
                    );
                }
            }
        }

        None
    }
}
