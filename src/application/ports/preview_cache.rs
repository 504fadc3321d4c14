//! Preview Cache Port - 音色试听缓存
//!
//! 按音色 id 缓存试听音频，会话内每个音色最多合成一次

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use super::TtsError;
use crate::domain::audio::AudioContainer;

/// Preview Cache Port
#[async_trait]
pub trait PreviewCachePort: Send + Sync {
    /// 读取缓存；未命中时执行 `init` 并缓存结果
    ///
    /// 同一音色的并发请求共享一次 `init`；失败不缓存，之后可以重试
    async fn get_or_try_insert(
        &self,
        voice_id: &str,
        init: BoxFuture<'_, Result<AudioContainer, TtsError>>,
    ) -> Result<AudioContainer, TtsError>;

    /// 只读缓存
    fn get(&self, voice_id: &str) -> Option<AudioContainer>;

    /// 已缓存的音色数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
