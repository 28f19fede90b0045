use anyhow::Result;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for the workflow engine
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Publishing readiness thresholds
    pub publishing: PublishingSettings,
    /// Status machine behaviour
    pub workflow: TransitionSettings,
    /// Batch execution settings
    pub batch: BatchSettings,
    /// Audit trail backend
    pub audit: AuditSettings,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublishingSettings {
    /// Minimum characters in the SEO description
    pub seo_description_min_len: usize,
    /// Minimum number of GEO key points
    pub geo_min_key_points: usize,
    /// SEO titles longer than this produce a warning
    pub seo_title_max_len: usize,
}

impl Default for PublishingSettings {
    fn default() -> Self {
        Self {
            seo_description_min_len: 50,
            geo_min_key_points: 3,
            seo_title_max_len: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransitionSettings {
    /// Let privileged roles publish a draft without the review step.
    /// The readiness validator still runs.
    pub allow_direct_publish: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchSettings {
    /// Records processed at once during a batch run (1 = sequential)
    pub max_concurrency: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self { max_concurrency: 4 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditBackend {
    Memory,
    JsonFile,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditSettings {
    pub backend: AuditBackend,
    /// Directory for the json_file backend
    pub directory: PathBuf,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            backend: AuditBackend::Memory,
            directory: PathBuf::from(".courseware-workflow/audit"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: true,
        }
    }
}

impl WorkflowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (courseware-workflow.toml, .courseware-workflow-rc)
    /// 3. Environment variables (prefixed with COURSEWARE_WORKFLOW_, `__` between sections)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("courseware-workflow.toml").exists() {
            builder = builder.add_source(File::with_name("courseware-workflow"));
        }

        if Path::new(".courseware-workflow-rc").exists() {
            builder = builder.add_source(File::new(".courseware-workflow-rc", FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("COURSEWARE_WORKFLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from an explicit TOML file layered over the defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<WorkflowConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = WorkflowConfig::load_env_file();
        WorkflowConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static WorkflowConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}
