//! Event Publisher Implementation
//!
//! 片段状态与批量运行事件的广播

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::segment::{Segment, SegmentId, SegmentState};
use crate::infrastructure::worker::BatchReport;

/// 广播通道容量
const CHANNEL_CAPACITY: usize = 256;

/// Studio 事件类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum StudioEvent {
    /// 片段状态变更
    SegmentStateChanged {
        segment_id: SegmentId,
        sequence_index: usize,
        state: SegmentState,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// 批量运行开始
    RunStarted {
        total_segments: usize,
        group_size: usize,
    },
    /// 已请求取消，剩余分组不再派发
    RunCancelled { remaining_segments: usize },
    /// 批量运行结束
    RunFinished { report: BatchReport },
}

/// 事件发布器
///
/// 没有订阅者时事件直接丢弃
pub struct EventPublisher {
    channel: broadcast::Sender<StudioEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.channel.subscribe()
    }

    /// 发布片段当前状态
    pub fn publish_segment_state(&self, segment: &Segment) {
        self.publish(StudioEvent::SegmentStateChanged {
            segment_id: segment.id(),
            sequence_index: segment.sequence_index(),
            state: segment.state(),
            error: segment.error_message().map(str::to_string),
        });
    }

    pub fn publish_run_started(&self, total_segments: usize, group_size: usize) {
        self.publish(StudioEvent::RunStarted {
            total_segments,
            group_size,
        });
    }

    pub fn publish_run_cancelled(&self, remaining_segments: usize) {
        self.publish(StudioEvent::RunCancelled { remaining_segments });
    }

    pub fn publish_run_finished(&self, report: BatchReport) {
        self.publish(StudioEvent::RunFinished { report });
    }

    fn publish(&self, event: StudioEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::trace!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_segment_state_event() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.subscribe();

        let segment = Segment::new(2, "hello").failed("quota exceeded");
        publisher.publish_segment_state(&segment);

        match rx.recv().await.unwrap() {
            StudioEvent::SegmentStateChanged {
                segment_id,
                sequence_index,
                state,
                error,
            } => {
                assert_eq!(segment_id, segment.id());
                assert_eq!(sequence_index, 2);
                assert_eq!(state, SegmentState::Failed);
                assert_eq!(error.as_deref(), Some("quota exceeded"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_publish_without_subscribers() {
        let publisher = EventPublisher::new();
        publisher.publish_run_started(3, 3);
        publisher.publish_run_cancelled(0);
    }

    #[test]
    fn test_event_json_shape() {
        let event = StudioEvent::RunStarted {
            total_segments: 7,
            group_size: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "RunStarted");
        assert_eq!(json["data"]["total_segments"], 7);
    }
}
