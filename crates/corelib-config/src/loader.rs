use std::path::Path;

use anyhow::Context as _;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot
    /// be expanded, the TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&raw)
    }

    /// Parse configuration from TOML text; see [`load`](Self::load)
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus file access
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).context("config variable expansion failed")?;
        let config: Self = toml::from_str(&expanded).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a code segment is empty or contains `-`, the
    /// default locale is malformed, or the Redis settings are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_error_codes()?;
        self.validate_messages()?;
        self.validate_redis()?;
        Ok(())
    }

    /// Composite codes are `{service}-{prefix}-{short}`; segments must be
    /// non-empty and free of the separator
    fn validate_error_codes(&self) -> anyhow::Result<()> {
        let segments = [
            ("service.code", &self.service.code),
            ("errors.business_prefix", &self.errors.business_prefix),
            ("errors.internal_prefix", &self.errors.internal_prefix),
        ];

        for (name, value) in segments {
            if value.trim().is_empty() {
                anyhow::bail!("{name} must not be empty");
            }
            if value.contains('-') {
                anyhow::bail!("{name} must not contain '-': {value}");
            }
        }

        Ok(())
    }

    fn validate_messages(&self) -> anyhow::Result<()> {
        if self.messages.base_name.trim().is_empty() {
            anyhow::bail!("messages.base_name must not be empty");
        }
        self.messages
            .locale()
            .with_context(|| format!("invalid messages.default_locale '{}'", self.messages.default_locale))?;
        Ok(())
    }

    fn validate_redis(&self) -> anyhow::Result<()> {
        let Some(ref redis) = self.redis else {
            return Ok(());
        };

        if redis.host.trim().is_empty() {
            anyhow::bail!("redis.host must not be empty");
        }
        if redis.port == 0 {
            anyhow::bail!("redis.port must be greater than 0");
        }
        if redis.timeout_ms == 0 {
            anyhow::bail!("redis.timeout_ms must be greater than 0");
        }
        redis.connection_url()?;

        Ok(())
    }
}
