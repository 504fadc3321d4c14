//! Batch Orchestrator - 分组并发合成
//!
//! 片段按 sequence_index 分组，组内并发、组间串行；
//! 取消只在分组边界生效，已派发的请求照常完成并记录结果

use futures_util::future::join_all;
use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::application::ports::{SegmentStorePort, SynthesisRequest, TtsEnginePort};
use crate::domain::segment::{GenerationSettings, Segment};
use crate::infrastructure::events::EventPublisher;

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const CANCELLING: u8 = 2;

/// 编排器配置
#[derive(Debug, Clone)]
pub struct BatchOrchestratorConfig {
    /// 每组并发请求数
    pub group_size: usize,
}

impl Default for BatchOrchestratorConfig {
    fn default() -> Self {
        Self { group_size: 3 }
    }
}

/// 运行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    /// 所有分组都已处理
    Completed,
    /// 在某个分组边界停止
    Cancelled,
    /// 已有运行在进行，本次未做任何事
    AlreadyRunning,
}

/// 运行汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcome: BatchOutcome,
    /// 发出的合成请求数
    pub dispatched: usize,
    pub completed: usize,
    pub failed: usize,
    /// 运行开始时已完成而跳过的片段
    pub skipped: usize,
}

impl BatchReport {
    fn new(outcome: BatchOutcome) -> Self {
        Self {
            outcome,
            dispatched: 0,
            completed: 0,
            failed: 0,
            skipped: 0,
        }
    }
}

/// 单个片段的处理结果
enum SegmentOutcome {
    Completed,
    Failed,
    /// 片段已不在集合中（被重新分段替换），结果丢弃
    Dropped { dispatched: bool },
}

/// 运行期间持有，离开作用域时清除运行和取消标志
struct RunGuard<'a> {
    state: &'a AtomicU8,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.state.store(IDLE, Ordering::Release);
    }
}

/// 批量编排器
pub struct BatchOrchestrator {
    config: BatchOrchestratorConfig,
    store: Arc<dyn SegmentStorePort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    event_publisher: Arc<EventPublisher>,
    state: AtomicU8,
}

impl BatchOrchestrator {
    pub fn new(
        config: BatchOrchestratorConfig,
        store: Arc<dyn SegmentStorePort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            config,
            store,
            tts_engine,
            event_publisher,
            state: AtomicU8::new(IDLE),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::Acquire) != IDLE
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.state.load(Ordering::Acquire) == CANCELLING
    }

    /// 请求取消当前运行；没有运行时返回 false
    pub fn cancel(&self) -> bool {
        let requested = self
            .state
            .compare_exchange(RUNNING, CANCELLING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if requested {
            tracing::info!("Batch cancellation requested");
        }
        requested
    }

    /// 处理所有未完成的片段（Idle / Failed）
    pub async fn run(&self, settings: &GenerationSettings) -> BatchReport {
        if self
            .state
            .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Batch run already in progress, ignoring");
            return BatchReport::new(BatchOutcome::AlreadyRunning);
        }
        let _guard = RunGuard { state: &self.state };

        let segments = self.store.list();
        let group_size = self.config.group_size.max(1);
        let mut report = BatchReport::new(BatchOutcome::Completed);

        tracing::info!(
            total_segments = segments.len(),
            group_size = group_size,
            voice = %settings.voice,
            emotion = %settings.emotion,
            language = %settings.language,
            "Batch run started"
        );
        self.event_publisher
            .publish_run_started(segments.len(), group_size);

        for (group_index, group) in segments.chunks(group_size).enumerate() {
            if self.is_cancel_requested() {
                let remaining = segments.len() - group_index * group_size;
                tracing::info!(
                    group = group_index,
                    remaining_segments = remaining,
                    "Batch run cancelled at group boundary"
                );
                self.event_publisher.publish_run_cancelled(remaining);
                report.outcome = BatchOutcome::Cancelled;
                break;
            }

            let pending: Vec<&Segment> = group.iter().filter(|s| !s.is_completed()).collect();
            report.skipped += group.len() - pending.len();
            if pending.is_empty() {
                continue;
            }

            tracing::debug!(group = group_index, size = pending.len(), "Dispatching group");

            let outcomes = join_all(
                pending
                    .into_iter()
                    .map(|segment| self.process_segment(segment, settings)),
            )
            .await;

            for outcome in outcomes {
                match outcome {
                    SegmentOutcome::Completed => {
                        report.dispatched += 1;
                        report.completed += 1;
                    }
                    SegmentOutcome::Failed => {
                        report.dispatched += 1;
                        report.failed += 1;
                    }
                    SegmentOutcome::Dropped { dispatched } => {
                        report.dispatched += usize::from(dispatched);
                    }
                }
            }
        }

        tracing::info!(
            outcome = ?report.outcome,
            dispatched = report.dispatched,
            completed = report.completed,
            failed = report.failed,
            skipped = report.skipped,
            "Batch run finished"
        );
        self.event_publisher.publish_run_finished(report);

        report
    }

    /// 合成单个片段并写回结果
    async fn process_segment(
        &self,
        segment: &Segment,
        settings: &GenerationSettings,
    ) -> SegmentOutcome {
        let processing = segment.processing();
        if self.store.replace(processing.clone()).is_err() {
            tracing::warn!(
                segment_id = %segment.id(),
                sequence_index = segment.sequence_index(),
                "Segment no longer in store, skipping"
            );
            return SegmentOutcome::Dropped { dispatched: false };
        }
        self.event_publisher.publish_segment_state(&processing);

        let result = self
            .tts_engine
            .synthesize(SynthesisRequest::new(segment.text(), settings))
            .await;

        let (updated, outcome) = match result {
            Ok(audio) => {
                tracing::debug!(
                    segment_id = %segment.id(),
                    sequence_index = segment.sequence_index(),
                    bytes = audio.len(),
                    "Segment synthesized"
                );
                (segment.completed(audio), SegmentOutcome::Completed)
            }
            Err(e) => {
                tracing::warn!(
                    segment_id = %segment.id(),
                    sequence_index = segment.sequence_index(),
                    error = %e,
                    "Segment synthesis failed"
                );
                (segment.failed(e.to_string()), SegmentOutcome::Failed)
            }
        };

        if self.store.replace(updated.clone()).is_err() {
            tracing::warn!(
                segment_id = %segment.id(),
                sequence_index = segment.sequence_index(),
                "Segment no longer in store, dropping result"
            );
            return SegmentOutcome::Dropped { dispatched: true };
        }
        self.event_publisher.publish_segment_state(&updated);

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::TtsError;
    use crate::domain::segment::SegmentState;
    use crate::infrastructure::events::StudioEvent;
    use crate::infrastructure::memory::InMemorySegmentStore;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::time::Duration;
    use tokio::sync::Semaphore;

    /// 计数合成器：记录调用次数和最大并发
    #[derive(Default)]
    struct CountingEngine {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        fail_marked: AtomicBool,
    }

    #[async_trait]
    impl TtsEnginePort for CountingEngine {
        async fn synthesize(&self, request: SynthesisRequest<'_>) -> Result<Bytes, TtsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_marked.load(Ordering::SeqCst) && request.text.contains("FAIL") {
                return Err(TtsError::ServiceError("quota exceeded".to_string()));
            }
            Ok(Bytes::from(request.text.as_bytes().to_vec()))
        }
    }

    /// 闸门合成器：请求在放行前一直挂起
    struct GatedEngine {
        started: AtomicUsize,
        gate: Semaphore,
    }

    impl GatedEngine {
        fn new() -> Self {
            Self {
                started: AtomicUsize::new(0),
                gate: Semaphore::new(0),
            }
        }

        async fn wait_started(&self, count: usize) {
            while self.started.load(Ordering::SeqCst) < count {
                tokio::task::yield_now().await;
            }
        }
    }

    #[async_trait]
    impl TtsEnginePort for GatedEngine {
        async fn synthesize(&self, _request: SynthesisRequest<'_>) -> Result<Bytes, TtsError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| TtsError::NetworkError(e.to_string()))?;
            Ok(Bytes::from_static(&[0, 0]))
        }
    }

    fn setup(
        texts: &[&str],
        engine: Arc<dyn TtsEnginePort>,
    ) -> (Arc<InMemorySegmentStore>, Arc<BatchOrchestrator>) {
        let store = Arc::new(InMemorySegmentStore::new());
        store.replace_all(
            texts
                .iter()
                .enumerate()
                .map(|(i, text)| Segment::new(i, *text))
                .collect(),
        );
        let orchestrator = Arc::new(BatchOrchestrator::new(
            BatchOrchestratorConfig::default(),
            store.clone(),
            engine,
            Arc::new(EventPublisher::new()),
        ));
        (store, orchestrator)
    }

    fn states(store: &InMemorySegmentStore) -> Vec<SegmentState> {
        store.list().iter().map(|s| s.state()).collect()
    }

    #[tokio::test]
    async fn test_run_completes_all_segments() {
        let engine = Arc::new(CountingEngine::default());
        let (store, orchestrator) = setup(&["a", "b", "c", "d"], engine.clone());

        let report = orchestrator.run(&GenerationSettings::default()).await;

        assert_eq!(report.outcome, BatchOutcome::Completed);
        assert_eq!(report.dispatched, 4);
        assert_eq!(report.completed, 4);
        assert_eq!(states(&store), vec![SegmentState::Completed; 4]);
        assert_eq!(
            store.list()[3].audio_data().unwrap(),
            &Bytes::from_static(b"d")
        );
        assert!(!orchestrator.is_running());
    }

    #[tokio::test]
    async fn test_rerun_over_completed_makes_no_calls() {
        let engine = Arc::new(CountingEngine::default());
        let (_store, orchestrator) = setup(&["a", "b", "c", "d", "e"], engine.clone());

        orchestrator.run(&GenerationSettings::default()).await;
        assert_eq!(engine.calls.load(Ordering::SeqCst), 5);

        let report = orchestrator.run(&GenerationSettings::default()).await;
        assert_eq!(engine.calls.load(Ordering::SeqCst), 5);
        assert_eq!(report.dispatched, 0);
        assert_eq!(report.skipped, 5);
    }

    #[tokio::test]
    async fn test_failure_is_isolated_and_retried() {
        let engine = Arc::new(CountingEngine::default());
        engine.fail_marked.store(true, Ordering::SeqCst);
        let (store, orchestrator) = setup(&["a", "b", "FAIL", "d", "e"], engine.clone());

        let report = orchestrator.run(&GenerationSettings::default()).await;
        assert_eq!(report.completed, 4);
        assert_eq!(report.failed, 1);

        let segments = store.list();
        assert_eq!(segments[1].state(), SegmentState::Completed);
        assert_eq!(segments[2].state(), SegmentState::Failed);
        assert!(segments[2]
            .error_message()
            .unwrap()
            .contains("quota exceeded"));
        assert_eq!(segments[3].state(), SegmentState::Completed);

        engine.fail_marked.store(false, Ordering::SeqCst);
        let report = orchestrator.run(&GenerationSettings::default()).await;
        assert_eq!(report.dispatched, 1);
        assert_eq!(report.skipped, 4);
        assert_eq!(states(&store), vec![SegmentState::Completed; 5]);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_group_size() {
        let engine = Arc::new(CountingEngine::default());
        let texts: Vec<String> = (0..10).map(|i| format!("segment {i}")).collect();
        let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
        let (_store, orchestrator) = setup(&texts, engine.clone());

        orchestrator.run(&GenerationSettings::default()).await;

        assert_eq!(engine.calls.load(Ordering::SeqCst), 10);
        assert_eq!(engine.max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cancel_stops_at_group_boundary() {
        let engine = Arc::new(GatedEngine::new());
        let texts = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];
        let (store, orchestrator) = setup(&texts, engine.clone());

        let running = orchestrator.clone();
        let handle =
            tokio::spawn(async move { running.run(&GenerationSettings::default()).await });

        engine.wait_started(3).await;
        assert!(orchestrator.is_running());
        assert!(orchestrator.cancel());
        assert!(orchestrator.is_cancel_requested());
        engine.gate.add_permits(16);

        let report = handle.await.unwrap();
        assert_eq!(report.outcome, BatchOutcome::Cancelled);
        assert_eq!(report.completed, 3);
        assert_eq!(engine.started.load(Ordering::SeqCst), 3);

        let states = states(&store);
        assert_eq!(&states[..3], &[SegmentState::Completed; 3]);
        assert_eq!(&states[3..], &[SegmentState::Idle; 6]);

        assert!(!orchestrator.is_running());
        assert!(!orchestrator.is_cancel_requested());
        assert!(!orchestrator.cancel());
    }

    #[tokio::test]
    async fn test_second_run_while_active_is_noop() {
        let engine = Arc::new(GatedEngine::new());
        let (_store, orchestrator) = setup(&["a", "b", "c", "d"], engine.clone());

        let running = orchestrator.clone();
        let handle =
            tokio::spawn(async move { running.run(&GenerationSettings::default()).await });
        engine.wait_started(3).await;

        let second = orchestrator.run(&GenerationSettings::default()).await;
        assert_eq!(second.outcome, BatchOutcome::AlreadyRunning);
        assert_eq!(second.dispatched, 0);
        assert_eq!(engine.started.load(Ordering::SeqCst), 3);

        engine.gate.add_permits(16);
        let first = handle.await.unwrap();
        assert_eq!(first.outcome, BatchOutcome::Completed);
        assert_eq!(first.completed, 4);
    }

    #[tokio::test]
    async fn test_results_for_replaced_segments_are_dropped() {
        let engine = Arc::new(GatedEngine::new());
        let (store, orchestrator) = setup(&["a", "b", "c"], engine.clone());

        let running = orchestrator.clone();
        let handle =
            tokio::spawn(async move { running.run(&GenerationSettings::default()).await });
        engine.wait_started(3).await;

        store.replace_all(vec![Segment::new(0, "fresh"), Segment::new(1, "script")]);
        engine.gate.add_permits(16);

        let report = handle.await.unwrap();
        assert_eq!(report.dispatched, 3);
        assert_eq!(report.completed, 0);
        assert_eq!(states(&store), vec![SegmentState::Idle; 2]);
    }

    #[tokio::test]
    async fn test_events_bracket_the_run() {
        let engine = Arc::new(CountingEngine::default());
        let store = Arc::new(InMemorySegmentStore::new());
        store.replace_all(vec![Segment::new(0, "only")]);
        let publisher = Arc::new(EventPublisher::new());
        let mut rx = publisher.subscribe();
        let orchestrator = BatchOrchestrator::new(
            BatchOrchestratorConfig::default(),
            store,
            engine,
            publisher,
        );

        orchestrator.run(&GenerationSettings::default()).await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], StudioEvent::RunStarted { total_segments: 1, .. }));
        assert!(matches!(
            events[1],
            StudioEvent::SegmentStateChanged {
                state: SegmentState::Processing,
                ..
            }
        ));
        assert!(matches!(
            events[2],
            StudioEvent::SegmentStateChanged {
                state: SegmentState::Completed,
                ..
            }
        ));
        assert!(matches!(events[3], StudioEvent::RunFinished { .. }));
    }
}
