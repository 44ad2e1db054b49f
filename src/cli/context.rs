use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::domain::models::{Environment, OverrideRule, ResolvedSettings, DEFAULT_OVERRIDE_RULES};
use crate::infrastructure::config::ConfigSource;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};

/// Everything a command needs to resolve the configuration.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Process environment captured once at startup
    pub env: Environment,
    /// Base file and overlays
    pub source: ConfigSource,
    /// Override table
    pub rules: &'static [OverrideRule],
}

impl CommandContext {
    /// Capture the environment and work out which files to read.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let base_dir = std::env::current_dir().context("Failed to get current directory")?;
        let env = Environment::from_process();
        let source = ConfigSource::discover(cli.config.clone(), cli.overlays.clone(), &env, &base_dir);
        Ok(Self {
            env,
            source,
            rules: DEFAULT_OVERRIDE_RULES,
        })
    }

    /// Run the resolution pipeline.
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        Ok(self.source.resolve(&self.env, self.rules)?)
    }

    /// Resolve, then install logging as the resolved settings describe.
    ///
    /// The returned logger must be kept alive for file output to flush.
    pub fn bootstrap(&self) -> Result<(ResolvedSettings, LoggerImpl)> {
        let settings = self.resolve()?;
        let logger = LoggerImpl::init(&LogConfig::from(settings.logging()))?;
        tracing::debug!(
            source = %settings.source().display(),
            environment = %settings.app().environment,
            "settings loaded"
        );
        Ok((settings, logger))
    }
}
