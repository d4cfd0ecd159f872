//! `simplyfi.toml` plus environment overrides

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use simplyfi_ai::{ExplainConfig, ProviderKind};

pub const DEFAULT_CONFIG_FILE: &str = "simplyfi.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub ai: AiSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AiSection {
    pub provider: ProviderKind,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            api_key: None,
            endpoint: None,
            timeout_secs: simplyfi_ai::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl AppConfig {
    /// Load `path` (defaults when it does not exist), then `.env`, then
    /// apply environment overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = Self::from_file(path)?;

        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", env_file.display());
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self =
            toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.ai.timeout_secs == 0 {
            anyhow::bail!("[ai] timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// `SIMPLYFI_AI_PROVIDER` replaces the provider. `SIMPLYFI_API_KEY` wins
    /// over the file; the provider's own variable only fills a missing key.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(provider) = lookup("SIMPLYFI_AI_PROVIDER") {
            self.ai.provider = provider
                .parse()
                .context("invalid SIMPLYFI_AI_PROVIDER")?;
        }

        if let Some(key) = lookup("SIMPLYFI_API_KEY") {
            self.ai.api_key = Some(key);
        }

        if self.ai.api_key.is_none() {
            let fallback = match self.ai.provider {
                ProviderKind::Gemini => Some("GEMINI_API_KEY"),
                ProviderKind::OpenAI => Some("OPENAI_API_KEY"),
                ProviderKind::Local => None,
            };
            self.ai.api_key = fallback.and_then(&lookup);
        }

        self.validate()
    }

    pub fn explain_config(&self) -> ExplainConfig {
        ExplainConfig {
            provider: self.ai.provider,
            api_key: self.ai.api_key.clone(),
            model: self.ai.model.clone(),
            endpoint: self.ai.endpoint.clone(),
            timeout: Duration::from_secs(self.ai.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join("simplyfi.toml")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.ai.provider, ProviderKind::Gemini);
        assert_eq!(config.ai.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simplyfi.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9000\n\n[ai]\nprovider = \"openai\"\nmodel = \"gpt-4o\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);

        let explain = config.explain_config();
        assert_eq!(explain.provider, ProviderKind::OpenAI);
        assert_eq!(explain.model.as_deref(), Some("gpt-4o"));
        assert_eq!(explain.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simplyfi.toml");
        std::fs::write(&path, "[ai]\ntimeout_secs = 0\n").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("simplyfi.toml"));
        assert!(format!("{err:#}").contains("timeout_secs"));

        let mut config = AppConfig::default();
        config.ai.timeout_secs = 0;
        assert!(config.apply_env(env(&[])).is_err());
    }

    #[test]
    fn test_env_key_overrides_file() {
        let mut config = AppConfig::default();
        config.ai.api_key = Some("from-file".to_string());

        config
            .apply_env(env(&[("SIMPLYFI_API_KEY", "from-env"), ("GEMINI_API_KEY", "other")]))
            .unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_provider_specific_key_fills_gap() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[("SIMPLYFI_AI_PROVIDER", "openai"), ("OPENAI_API_KEY", "sk-test")]))
            .unwrap();

        assert_eq!(config.ai.provider, ProviderKind::OpenAI);
        assert_eq!(config.ai.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_local_provider_needs_no_key() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[("SIMPLYFI_AI_PROVIDER", "local"), ("GEMINI_API_KEY", "unused")]))
            .unwrap();
        assert_eq!(config.ai.api_key, None);
    }

    #[test]
    fn test_invalid_provider_env() {
        let mut config = AppConfig::default();
        assert!(config.apply_env(env(&[("SIMPLYFI_AI_PROVIDER", "mystery")])).is_err());
    }
}
