//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::audio::WavFormat;
use crate::domain::DEFAULT_WORDS_PER_SEGMENT;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 批量生成配置
    #[serde(default)]
    pub batch: BatchConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 导出配置
    #[serde(default)]
    pub export: ExportConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// API 基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    /// 模型名
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// API key；未设置时回退到 GEMINI_API_KEY / API_KEY
    #[serde(default)]
    pub api_key: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_tts_base_url(),
            model: default_tts_model(),
            api_key: None,
            timeout_secs: default_tts_timeout(),
        }
    }
}

/// 批量生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// 每组并发请求数
    #[serde(default = "default_group_size")]
    pub group_size: usize,

    /// 每段最多词数
    #[serde(default = "default_words_per_segment")]
    pub words_per_segment: usize,
}

fn default_group_size() -> usize {
    3
}

fn default_words_per_segment() -> usize {
    DEFAULT_WORDS_PER_SEGMENT
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            group_size: default_group_size(),
            words_per_segment: default_words_per_segment(),
        }
    }
}

/// 音频配置
///
/// 需与 TTS 服务返回的 PCM 一致（Gemini: 24kHz 单声道 16-bit）
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// 采样率（Hz）
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// 声道数
    #[serde(default = "default_channels")]
    pub channels: u16,
}

fn default_sample_rate() -> u32 {
    24000
}

fn default_channels() -> u16 {
    1
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
        }
    }
}

impl AudioConfig {
    /// WAV 封装格式
    pub fn wav_format(&self) -> WavFormat {
        WavFormat::pcm16(self.sample_rate, self.channels)
    }
}

/// 导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// 输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
