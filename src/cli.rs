//! Command Line Interface
//!
//! split / generate / voices / preview 子命令

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use scriptcast::application::ApplicationError;
use scriptcast::domain::segment::GenerationSettings;
use scriptcast::domain::voice::{find_emotion, find_language, find_voice, BaseVoice, VoiceError};

/// Long-form text to speech studio
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: scriptcast.toml, scriptcast.local.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split scripts into segments and print them
    Split(SplitCommand),

    /// Synthesize every segment and export ZIP / merged WAV
    Generate(GenerateCommand),

    /// List voice presets, emotions and languages
    Voices,

    /// Synthesize a short preview of one voice
    Preview(PreviewCommand),
}

/// Split scripts into segments
#[derive(Parser, Debug)]
pub struct SplitCommand {
    /// Script files (.txt, .md, .srt)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Maximum words per segment (default from config)
    #[arg(short, long)]
    pub words: Option<usize>,
}

/// Shared generation settings
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Language code
    #[arg(short, long, default_value = "en-US")]
    pub language: String,

    /// Speaking rate (0.5 - 2.0)
    #[arg(long, default_value_t = 1.0)]
    pub speed: f32,

    /// Pitch (0.5 - 2.0)
    #[arg(long, default_value_t = 1.0)]
    pub pitch: f32,
}

/// Synthesize a script
#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Script files (.txt, .md, .srt), joined in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Voice preset id or name (e.g. v1, Sophia) or a base voice (e.g. Puck)
    #[arg(short, long, default_value = "v1")]
    pub voice: String,

    /// Emotion / style
    #[arg(short, long, default_value = "Neutral")]
    pub emotion: String,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Maximum words per segment (default from config)
    #[arg(short, long)]
    pub words: Option<usize>,

    /// Concurrent requests per group (default from config)
    #[arg(short, long)]
    pub group_size: Option<usize>,

    /// Output directory (default from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the ZIP export
    #[arg(long)]
    pub no_zip: bool,

    /// Skip the merged WAV export
    #[arg(long)]
    pub no_merged: bool,

    /// Also write one WAV file per completed segment
    #[arg(long)]
    pub per_segment: bool,

    /// Use the offline tone generator instead of the TTS service
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn generation_settings(&self) -> Result<GenerationSettings, ApplicationError> {
        let settings = GenerationSettings {
            voice: resolve_base_voice(&self.voice)?,
            speed: self.settings.speed,
            pitch: self.settings.pitch,
            emotion: find_emotion(&self.emotion)?.to_string(),
            language: find_language(&self.settings.language)?.code.to_string(),
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Preview a voice
#[derive(Parser, Debug)]
pub struct PreviewCommand {
    /// Voice preset id or name
    pub voice: String,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output WAV file (default: {output_dir}/preview_{id}.wav)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use the offline tone generator instead of the TTS service
    #[arg(long)]
    pub dry_run: bool,
}

impl PreviewCommand {
    /// 音色和情绪由试听本身决定
    pub fn generation_settings(&self) -> Result<GenerationSettings, ApplicationError> {
        let settings = GenerationSettings {
            speed: self.settings.speed,
            pitch: self.settings.pitch,
            language: find_language(&self.settings.language)?.code.to_string(),
            ..Default::default()
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// 预置音色优先，其次是基础音色名
fn resolve_base_voice(key: &str) -> Result<BaseVoice, VoiceError> {
    match find_voice(key) {
        Ok(voice) => Ok(voice.base_voice),
        Err(not_found) => key.parse().map_err(|_| not_found),
    }
}
