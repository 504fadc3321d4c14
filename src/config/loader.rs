//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（scriptcast.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["scriptcast", "scriptcast.local"];

/// API key 的回退环境变量（按顺序）
const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SCRIPTCAST_`，层级分隔符 `__`）
/// 2. 配置文件（scriptcast.toml 或 scriptcast.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SCRIPTCAST_TTS__MODEL=gemini-2.5-pro-preview-tts`
/// - `SCRIPTCAST_BATCH__GROUP_SIZE=5`
/// - `SCRIPTCAST_EXPORT__OUTPUT_DIR=/tmp/narration`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("tts.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("tts.model", "gemini-2.5-flash-preview-tts")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("batch.group_size", 3)?
        .set_default("batch.words_per_segment", 750)?
        .set_default("audio.sample_rate", 24000)?
        .set_default("audio.channels", 1)?
        .set_default("export.output_dir", "output")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: SCRIPTCAST_TTS__API_KEY=...
    builder = builder.add_source(
        Environment::with_prefix("SCRIPTCAST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    resolve_api_key(&mut app_config, |name| std::env::var(name).ok());
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 未配置 tts.api_key 时按顺序读取回退变量
fn resolve_api_key(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let configured = config
        .tts
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty());
    if configured {
        return;
    }

    config.tts.api_key = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|key| !key.trim().is_empty());
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.tts.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS base URL cannot be empty".to_string(),
        ));
    }

    if config.tts.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS model cannot be empty".to_string(),
        ));
    }

    if config.batch.group_size == 0 {
        return Err(ConfigError::ValidationError(
            "Batch group size cannot be 0".to_string(),
        ));
    }

    if config.batch.words_per_segment == 0 {
        return Err(ConfigError::ValidationError(
            "Words per segment cannot be 0".to_string(),
        ));
    }

    // 字节率和块对齐必须能写进 WAV 头
    config
        .audio
        .wav_format()
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("TTS Base URL: {}", config.tts.base_url);
    tracing::info!("TTS Model: {}", config.tts.model);
    tracing::info!(
        "TTS API Key: {}",
        if config.tts.api_key.is_some() { "set" } else { "missing" }
    );
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("Group Size: {}", config.batch.group_size);
    tracing::info!("Words Per Segment: {}", config.batch.words_per_segment);
    tracing::info!(
        "Audio: {} Hz, {} channel(s)",
        config.audio.sample_rate,
        config.audio.channels
    );
    tracing::info!("Output Directory: {:?}", config.export.output_dir);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_group_size() {
        let mut config = AppConfig::default();
        config.batch.group_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_words() {
        let mut config = AppConfig::default();
        config.batch.words_per_segment = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_model() {
        let mut config = AppConfig::default();
        config.tts.model = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_channels() {
        let mut config = AppConfig::default();
        config.audio.channels = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_overflowing_audio_format() {
        let mut config = AppConfig::default();
        config.audio.channels = 65535;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("overflows"));

        let mut config = AppConfig::default();
        config.audio.sample_rate = u32::MAX;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = AppConfig::default();
        config.audio.sample_rate = 48000;
        config.audio.channels = 2;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scriptcast.toml");
        std::fs::write(
            &path,
            "[batch]\ngroup_size = 5\n\n[export]\noutput_dir = \"narration\"\n",
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.batch.group_size, 5);
        assert_eq!(config.batch.words_per_segment, 750);
        assert_eq!(config.export.output_dir, std::path::PathBuf::from("narration"));
        assert_eq!(config.audio.sample_rate, 24000);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scriptcast.toml");
        std::fs::write(&path, "[batch]\ngroup_size = 0\n").unwrap();

        let result = load_config_from_path(Some(&path));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_api_key_fallback_order() {
        let env: HashMap<&str, &str> = [("GEMINI_API_KEY", "gemini"), ("API_KEY", "generic")].into();
        let lookup = |name: &str| env.get(name).map(|v| v.to_string());

        let mut config = AppConfig::default();
        resolve_api_key(&mut config, lookup);
        assert_eq!(config.tts.api_key.as_deref(), Some("gemini"));

        let mut config = AppConfig::default();
        config.tts.api_key = Some("configured".to_string());
        resolve_api_key(&mut config, lookup);
        assert_eq!(config.tts.api_key.as_deref(), Some("configured"));

        let mut config = AppConfig::default();
        resolve_api_key(&mut config, |name| {
            (name == "API_KEY").then(|| "generic".to_string())
        });
        assert_eq!(config.tts.api_key.as_deref(), Some("generic"));
    }
}
