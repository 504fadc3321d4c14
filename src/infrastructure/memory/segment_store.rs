//! In-Memory Segment Store Implementation

use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{SegmentStorePort, StoreError};
use crate::domain::segment::{Segment, SegmentId};

/// 内存片段集合
pub struct InMemorySegmentStore {
    /// segment_id -> Segment
    segments: DashMap<SegmentId, Segment>,
}

impl InMemorySegmentStore {
    pub fn new() -> Self {
        Self {
            segments: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySegmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentStorePort for InMemorySegmentStore {
    fn replace_all(&self, segments: Vec<Segment>) {
        let dropped = self.segments.len();
        self.segments.clear();

        let count = segments.len();
        for segment in segments {
            self.segments.insert(segment.id(), segment);
        }

        tracing::debug!(dropped = dropped, count = count, "Segment set replaced");
    }

    fn replace(&self, segment: Segment) -> Result<(), StoreError> {
        let id = segment.id();
        let mut entry = self
            .segments
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;

        let old_state = entry.state();
        let new_state = segment.state();
        *entry = segment;

        tracing::debug!(
            segment_id = %id,
            old_state = %old_state,
            new_state = %new_state,
            "Segment state changed"
        );
        Ok(())
    }

    fn get(&self, id: SegmentId) -> Option<Segment> {
        self.segments.get(&id).map(|s| s.clone())
    }

    fn list(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = self.segments.iter().map(|s| s.clone()).collect();
        segments.sort_by_key(|s| s.sequence_index());
        segments
    }

    fn clear(&self) {
        self.segments.clear();
        tracing::debug!("Segment set cleared");
    }

    fn len(&self) -> usize {
        self.segments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::segment::SegmentState;
    use bytes::Bytes;

    #[test]
    fn test_list_sorted_by_sequence_index() {
        let store = InMemorySegmentStore::new();
        let segments: Vec<Segment> = (0..20).rev().map(|i| Segment::new(i, "w")).collect();
        store.replace_all(segments);

        let listed = store.list();
        assert_eq!(listed.len(), 20);
        for (i, segment) in listed.iter().enumerate() {
            assert_eq!(segment.sequence_index(), i);
        }
    }

    #[test]
    fn test_replace_is_whole_segment() {
        let store = InMemorySegmentStore::new();
        let segment = Segment::new(0, "hello");
        store.replace_all(vec![segment.clone()]);

        store.replace(segment.failed("boom")).unwrap();
        assert_eq!(store.get(segment.id()).unwrap().state(), SegmentState::Failed);

        store
            .replace(segment.completed(Bytes::from_static(&[1, 2])))
            .unwrap();
        let stored = store.get(segment.id()).unwrap();
        assert!(stored.is_completed());
        assert!(stored.error_message().is_none());
        assert_eq!(store.completed().len(), 1);
    }

    #[test]
    fn test_replace_unknown_id() {
        let store = InMemorySegmentStore::new();
        store.replace_all(vec![Segment::new(0, "a")]);

        let stranger = Segment::new(0, "b");
        let result = store.replace(stranger.processing());
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == stranger.id()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_all_discards_previous() {
        let store = InMemorySegmentStore::new();
        let old = Segment::new(0, "old");
        store.replace_all(vec![old.clone()]);
        store.replace_all(vec![Segment::new(0, "new"), Segment::new(1, "newer")]);

        assert!(store.get(old.id()).is_none());
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }
}
