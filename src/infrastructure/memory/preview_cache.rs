//! In-Memory Preview Cache Implementation
//!
//! 每个音色一个 OnceCell，同一音色的并发请求只合成一次

use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::application::ports::{PreviewCachePort, TtsError};
use crate::domain::audio::AudioContainer;

/// 内存试听缓存
pub struct InMemoryPreviewCache {
    /// voice_id -> cell
    cells: DashMap<String, Arc<OnceCell<AudioContainer>>>,
}

impl InMemoryPreviewCache {
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    fn cell(&self, voice_id: &str) -> Arc<OnceCell<AudioContainer>> {
        // 先克隆出来再 await，避免持有 DashMap 分片锁
        self.cells
            .entry(voice_id.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}

impl Default for InMemoryPreviewCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreviewCachePort for InMemoryPreviewCache {
    async fn get_or_try_insert(
        &self,
        voice_id: &str,
        init: BoxFuture<'_, Result<AudioContainer, TtsError>>,
    ) -> Result<AudioContainer, TtsError> {
        let cell = self.cell(voice_id);
        let audio = cell.get_or_try_init(|| init).await?;
        Ok(audio.clone())
    }

    fn get(&self, voice_id: &str) -> Option<AudioContainer> {
        self.cells
            .get(voice_id)
            .and_then(|cell| cell.get().cloned())
    }

    fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.initialized()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::WavFormat;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn audio(byte: u8) -> AudioContainer {
        AudioContainer::encode(&[byte, 0], WavFormat::default()).unwrap()
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_init() {
        let cache = InMemoryPreviewCache::new();
        let calls = AtomicUsize::new(0);

        let make = |byte: u8| {
            let calls = &calls;
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, TtsError>(audio(byte))
            }) as BoxFuture<'_, Result<AudioContainer, TtsError>>
        };

        let (a, b) = tokio::join!(
            cache.get_or_try_insert("v1", make(1)),
            cache.get_or_try_insert("v1", make(2)),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(cache.len(), 1);
        assert!(cache.get("v1").is_some());
        assert!(cache.get("v2").is_none());
    }

    #[tokio::test]
    async fn test_failure_leaves_cell_empty() {
        let cache = InMemoryPreviewCache::new();

        let failed = cache
            .get_or_try_insert(
                "v1",
                Box::pin(async { Err::<AudioContainer, _>(TtsError::Timeout) }),
            )
            .await;
        assert!(matches!(failed, Err(TtsError::Timeout)));
        assert!(cache.is_empty());

        let retried = cache
            .get_or_try_insert("v1", Box::pin(async { Ok::<_, TtsError>(audio(7)) }))
            .await
            .unwrap();
        assert_eq!(retried.data(), &[7, 0]);
        assert_eq!(cache.len(), 1);
    }
}
