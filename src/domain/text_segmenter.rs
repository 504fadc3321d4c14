//! 文本分割器
//!
//! 按词数预算把长脚本切成若干片段，片段之间以空白分词为界

/// 默认每段最大词数
pub const DEFAULT_WORDS_PER_SEGMENT: usize = 750;

/// 文本分割配置
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// 每段最大词数（0 按 1 处理）
    pub words_per_segment: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            words_per_segment: DEFAULT_WORDS_PER_SEGMENT,
        }
    }
}

impl SegmentConfig {
    pub fn new(words_per_segment: usize) -> Self {
        Self { words_per_segment }
    }
}

/// 对文本进行分段
///
/// 分段策略：
/// 1. 按任意空白切分出词（原始空白不保留）
/// 2. 顺序每 `words_per_segment` 个词组成一段，词之间用单个空格连接
/// 3. 只有最后一段可能不足预算
///
/// 空文本或纯空白返回空列表。
pub fn split_into_segments(text: &str, config: &SegmentConfig) -> Vec<String> {
    let budget = config.words_per_segment.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();

    words.chunks(budget).map(|chunk| chunk.join(" ")).collect()
}

/// 使用默认配置分段（便捷方法）
pub fn split_into_segments_default(text: &str) -> Vec<String> {
    split_into_segments(text, &SegmentConfig::default())
}

/// 统计词数（与分段使用相同的分词规则）
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
