use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let mut config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Treat an empty `api_key` as absent
    ///
    /// A `default("")` placeholder leaves the key as an empty string when the
    /// environment variable is unset; the provider should be registered
    /// keyless rather than send a blank credential upstream.
    pub fn normalize(&mut self) {
        for provider in self.tts.providers.values_mut() {
            if provider.api_key.as_ref().is_some_and(|key| key.expose_secret().is_empty()) {
                provider.api_key = None;
            }
        }
        for provider in self.imagegen.providers.values_mut() {
            if provider.api_key.as_ref().is_some_and(|key| key.expose_secret().is_empty()) {
                provider.api_key = None;
            }
        }
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if any section holds values the server cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        if self.synthesis.sample_rate == 0 {
            anyhow::bail!("synthesis.sample_rate must be greater than 0");
        }
        if self.synthesis.seconds_per_char <= 0.0 || self.synthesis.max_seconds <= 0.0 {
            anyhow::bail!("synthesis durations must be positive");
        }

        for (name, provider) in &self.imagegen.providers {
            if provider.poll_interval_ms == 0 {
                anyhow::bail!("image provider '{name}': poll_interval_ms must be greater than 0");
            }
            if provider.max_polls == 0 {
                anyhow::bail!("image provider '{name}': max_polls must be greater than 0");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Config;

    #[test]
    fn empty_config_is_valid() {
        let config: Config = toml::from_str("").unwrap();
        config.validate().unwrap();
        assert!(config.tts.providers.is_empty());
        assert!(config.imagegen.providers.is_empty());
        assert_eq!(config.fallback.min_audio_bytes, 1024);
    }

    #[test]
    fn providers_parse_with_priority() {
        let config: Config = toml::from_str(
            r#"
            [tts.providers.primary]
            type = "openai_tts"
            api_key = "sk-1"
            priority = 10

            [tts.providers.backup]
            type = "elevenlabs"
            priority = 20

            [imagegen.providers.jobs]
            type = "replicate"
            api_key = "r8-1"
            poll_interval_ms = 500
            "#,
        )
        .unwrap();
        config.validate().unwrap();

        assert_eq!(config.tts.providers.len(), 2);
        assert_eq!(config.tts.providers["primary"].priority, 10);
        assert!(config.tts.providers["backup"].api_key.is_none());
        assert_eq!(config.imagegen.providers["jobs"].poll_interval_ms, 500);
        assert_eq!(config.imagegen.providers["jobs"].max_polls, 30);
    }

    #[test]
    fn shipped_default_config_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../mirage.toml");
        let config = Config::load(&path).unwrap();

        assert_eq!(config.tts.providers.len(), 2);
        assert_eq!(config.imagegen.providers.len(), 2);
        assert!(config.server.cors.is_some());
    }

    #[test]
    fn empty_api_key_is_normalized_to_none() {
        let mut config: Config = toml::from_str(
            r#"
            [tts.providers.primary]
            type = "openai_tts"
            api_key = ""
            "#,
        )
        .unwrap();
        config.normalize();
        assert!(config.tts.providers["primary"].api_key.is_none());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config: Config = toml::from_str(
            r#"
            [imagegen.providers.jobs]
            type = "replicate"
            poll_interval_ms = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_health_path_is_rejected() {
        let config: Config = toml::from_str(
            r#"
            [server.health]
            enabled = true
            path = "health"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
