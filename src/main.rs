//! Scriptcast - 长文本 TTS 批量生成
//!
//! 脚本 → 分段 → 分组合成 → ZIP / 合并 WAV

mod cli;

use clap::Parser;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

use scriptcast::application::{
    ApplicationError, ExportMerged, ExportMergedHandler, ExportStoragePort, ExportZip,
    ExportZipHandler, GetSegmentAudio, GetSegmentAudioHandler, ImportScript, ImportScriptHandler,
    ListSegments, ListSegmentsHandler, ListVoices, ListVoicesHandler, PreviewVoice,
    PreviewVoiceHandler, SegmentStorePort, SplitScript, SplitScriptHandler, TtsEnginePort,
};
use scriptcast::config::{load_config, load_config_from_path, print_config, AppConfig, LogConfig};
use scriptcast::domain::segment::SegmentState;
use scriptcast::infrastructure::adapters::{
    FakeTtsClient, FakeTtsClientConfig, FileExportStorage, GeminiTtsClient, GeminiTtsClientConfig,
    ZipArchiver,
};
use scriptcast::infrastructure::{
    BatchOrchestrator, BatchOrchestratorConfig, BatchOutcome, EventPublisher,
    InMemoryPreviewCache, InMemorySegmentStore, StudioEvent,
};

use cli::{Cli, Commands, GenerateCommand, PreviewCommand, SplitCommand};

/// split 输出中每段显示的词数
const PREVIEW_WORDS: usize = 8;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match &cli.config {
        Some(path) => load_config_from_path(Some(path)),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    match cli.command {
        Commands::Split(cmd) => split(&config, cmd).await,
        Commands::Generate(cmd) => generate(&config, cmd).await,
        Commands::Voices => {
            voices();
            Ok(())
        }
        Commands::Preview(cmd) => preview(&config, cmd).await,
    }
}

/// 初始化日志；日志写 stderr，stdout 留给命令输出
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},scriptcast={}", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_engine(config: &AppConfig, dry_run: bool) -> anyhow::Result<Arc<dyn TtsEnginePort>> {
    if dry_run {
        tracing::info!("Dry run: using the offline tone generator");
        return Ok(Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            sample_rate: config.audio.sample_rate,
            ..Default::default()
        })));
    }

    let client = GeminiTtsClient::new(GeminiTtsClientConfig {
        base_url: config.tts.base_url.clone(),
        model: config.tts.model.clone(),
        api_key: config.tts.api_key.clone(),
        timeout_secs: config.tts.timeout_secs,
    })?;
    Ok(Arc::new(client))
}

async fn split(config: &AppConfig, cmd: SplitCommand) -> anyhow::Result<()> {
    let script = ImportScriptHandler::new()
        .handle(ImportScript { paths: cmd.files })
        .await?;

    let store = Arc::new(InMemorySegmentStore::new());
    let response = SplitScriptHandler::new(store.clone()).handle(SplitScript {
        text: script,
        words_per_segment: cmd.words.unwrap_or(config.batch.words_per_segment),
    })?;

    println!(
        "{} words -> {} segment(s)",
        response.total_words, response.total_segments
    );
    for segment in store.list() {
        let opening: Vec<&str> = segment.text().split_whitespace().take(PREVIEW_WORDS).collect();
        println!(
            "{:>4}  {:<14} {:>5} words  {}...",
            segment.sequence_index(),
            segment.name(),
            segment.word_count(),
            opening.join(" ")
        );
    }
    Ok(())
}

async fn generate(config: &AppConfig, cmd: GenerateCommand) -> anyhow::Result<()> {
    let settings = cmd.generation_settings()?;
    let format = config.audio.wav_format();
    let group_size = cmd.group_size.unwrap_or(config.batch.group_size).max(1);
    let output_dir = cmd
        .output
        .clone()
        .unwrap_or_else(|| config.export.output_dir.clone());
    print_config(config);

    // 1. 导入并分段
    let script = ImportScriptHandler::new()
        .handle(ImportScript {
            paths: cmd.files.clone(),
        })
        .await?;
    let store = Arc::new(InMemorySegmentStore::new());
    let split = SplitScriptHandler::new(store.clone()).handle(SplitScript {
        text: script,
        words_per_segment: cmd.words.unwrap_or(config.batch.words_per_segment),
    })?;
    println!(
        "{} words -> {} segment(s), {} request(s) at a time",
        split.total_words, split.total_segments, group_size
    );

    // 2. 分组合成，Ctrl-C 在分组边界停止
    let event_publisher = Arc::new(EventPublisher::new());
    let orchestrator = BatchOrchestrator::new(
        BatchOrchestratorConfig { group_size },
        store.clone(),
        build_engine(config, cmd.dry_run)?,
        event_publisher.clone(),
    );
    let progress = tokio::spawn(print_progress(event_publisher.subscribe(), split.total_segments));

    let run = orchestrator.run(&settings);
    tokio::pin!(run);
    let report = loop {
        tokio::select! {
            report = &mut run => break report,
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    if orchestrator.cancel() {
                        println!("Cancelling after the current group...");
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to listen for ctrl-c");
                    break (&mut run).await;
                }
            },
        }
    };
    if let Err(e) = progress.await {
        tracing::warn!(error = %e, "Progress printer stopped");
    }

    println!(
        "{}: {} completed, {} failed, {} already done",
        match report.outcome {
            BatchOutcome::Cancelled => "Cancelled",
            _ => "Finished",
        },
        report.completed,
        report.failed,
        report.skipped
    );
    for summary in ListSegmentsHandler::new(store.clone()).handle(ListSegments) {
        if let Some(error) = summary.error {
            println!("  {} failed: {}", summary.name, error);
        }
    }

    // 3. 导出已完成片段
    let storage = Arc::new(FileExportStorage::new(&output_dir).await?);
    if !cmd.no_zip {
        let handler = ExportZipHandler::new(
            store.clone(),
            Arc::new(ZipArchiver::new()),
            storage.clone(),
            format,
        );
        report_export("Archive", handler.handle(ExportZip::default()).await)?;
    }
    if !cmd.no_merged {
        let handler = ExportMergedHandler::new(store.clone(), storage.clone(), format);
        report_export("Merged audio", handler.handle(ExportMerged::default()).await)?;
    }
    if cmd.per_segment {
        let handler = GetSegmentAudioHandler::new(store.clone(), format);
        for segment in store.completed() {
            let audio = handler.handle(GetSegmentAudio {
                segment_id: segment.id(),
            })?;
            let path = storage.save(&segment.file_name(), audio.as_bytes()).await?;
            println!("Segment audio: {}", path.display());
        }
    }

    Ok(())
}

/// 没有已完成片段时只提示，不视为错误
fn report_export(
    label: &str,
    result: Result<scriptcast::application::ExportResponse, ApplicationError>,
) -> anyhow::Result<()> {
    match result {
        Ok(response) => {
            println!(
                "{}: {} ({} segment(s), {} bytes)",
                label,
                response.path.display(),
                response.segment_count,
                response.size_bytes
            );
            Ok(())
        }
        Err(ApplicationError::NothingToExport) => {
            println!("{}: nothing to export", label);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn print_progress(mut events: broadcast::Receiver<StudioEvent>, total: usize) {
    let mut settled = 0;
    loop {
        match events.recv().await {
            Ok(StudioEvent::SegmentStateChanged {
                sequence_index,
                state,
                error,
                ..
            }) => match state {
                SegmentState::Processing => {
                    println!("[{:>4}/{}] Segment {} processing", settled, total, sequence_index + 1)
                }
                SegmentState::Completed => {
                    settled += 1;
                    println!("[{:>4}/{}] Segment {} completed", settled, total, sequence_index + 1);
                }
                SegmentState::Failed => {
                    settled += 1;
                    println!(
                        "[{:>4}/{}] Segment {} failed: {}",
                        settled,
                        total,
                        sequence_index + 1,
                        error.unwrap_or_default()
                    );
                }
                SegmentState::Idle => {}
            },
            Ok(StudioEvent::RunCancelled { remaining_segments }) => {
                println!("{} segment(s) left idle", remaining_segments);
            }
            Ok(StudioEvent::RunStarted { .. }) => {}
            Ok(StudioEvent::RunFinished { .. }) | Err(RecvError::Closed) => break,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped = skipped, "Progress output lagged");
            }
        }
    }
}

fn voices() {
    let catalog = ListVoicesHandler::new().handle(ListVoices);

    println!("Voices:");
    for voice in catalog.voices {
        println!(
            "  {:<4} {:<10} {:<7} {:<7} {}",
            voice.id,
            voice.name,
            voice.gender.as_str(),
            voice.base_voice,
            voice.description
        );
    }
    println!("Emotions: {}", catalog.emotions.join(", "));
    println!("Languages:");
    for language in catalog.languages {
        println!("  {:<6} {}", language.code, language.name);
    }
}

async fn preview(config: &AppConfig, cmd: PreviewCommand) -> anyhow::Result<()> {
    let settings = cmd.generation_settings()?;
    let handler = PreviewVoiceHandler::new(
        build_engine(config, cmd.dry_run)?,
        Arc::new(InMemoryPreviewCache::new()),
        config.audio.wav_format(),
    );

    let response = handler
        .handle(PreviewVoice {
            voice: cmd.voice.clone(),
            settings,
        })
        .await?;

    let path = match cmd.output {
        Some(path) => path,
        None => config
            .export
            .output_dir
            .join(format!("preview_{}.wav", response.voice.id)),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, response.audio.as_bytes()).await?;

    println!(
        "{} ({}, {} ms): {}",
        response.voice.name,
        response.voice.base_voice,
        response.audio.duration_ms().unwrap_or_default(),
        path.display()
    );
    Ok(())
}
