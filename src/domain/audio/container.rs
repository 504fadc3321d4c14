//! Audio Context - WAV 容器
//!
//! 固定 44 字节头的 PCM WAV：
//!
//! ```text
//! 0..4   "RIFF"        4..8   36 + data_len
//! 8..12  "WAVE"        12..16 "fmt "
//! 16..20 16            20..22 1 (PCM)
//! 22..24 channels      24..28 sample_rate
//! 28..32 byte_rate     32..34 block_align
//! 34..36 bits          36..40 "data"
//! 40..44 data_len      44..   samples (s16le)
//! ```

use serde::{Deserialize, Serialize};

use super::AudioError;

/// WAV 头长度
pub const WAV_HEADER_LEN: usize = 44;

const RIFF_SIZE_OFFSET: usize = 4;
const DATA_SIZE_OFFSET: usize = 40;
/// fmt 子块（含 magic 与长度）所在区间，用于格式一致性比较
const FMT_BLOCK: std::ops::Range<usize> = 12..36;

/// PCM 格式参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::pcm16(24000, 1)
    }
}

impl WavFormat {
    /// 16-bit PCM 格式
    pub fn pcm16(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            bits_per_sample: 16,
        }
    }

    /// 溢出 u32 时返回 None
    pub fn byte_rate(&self) -> Option<u32> {
        self.sample_rate
            .checked_mul(self.channels as u32)?
            .checked_mul((self.bits_per_sample / 8) as u32)
    }

    /// 溢出 u16 时返回 None
    pub fn block_align(&self) -> Option<u16> {
        self.channels.checked_mul(self.bits_per_sample / 8)
    }

    /// 校验格式可以写入 WAV 头
    pub fn validate(&self) -> Result<(), AudioError> {
        self.header_rates().map(|_| ())
    }

    fn header_rates(&self) -> Result<(u32, u16), AudioError> {
        if self.sample_rate == 0 || self.channels == 0 || self.bits_per_sample / 8 == 0 {
            return Err(AudioError::InvalidFormat(format!(
                "sample_rate={}, channels={}, bits_per_sample={} must be positive",
                self.sample_rate, self.channels, self.bits_per_sample
            )));
        }
        match (self.byte_rate(), self.block_align()) {
            (Some(byte_rate), Some(block_align)) => Ok((byte_rate, block_align)),
            _ => Err(AudioError::InvalidFormat(format!(
                "sample_rate={} x channels={} overflows the header fields",
                self.sample_rate, self.channels
            ))),
        }
    }
}

/// 解析出的 WAV 头
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    /// 总大小 - 8
    pub riff_size: u32,
    /// 格式码（PCM = 1）
    pub audio_format: u16,
    pub format: WavFormat,
    pub byte_rate: u32,
    pub block_align: u16,
    /// data 子块大小
    pub data_size: u32,
}

/// 一个可播放的 WAV 文件
///
/// 不变量:
/// - 长度至少为 44 字节
/// - 头部 riff_size / data_size 与实际数据区长度一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioContainer {
    bytes: Vec<u8>,
}

impl AudioContainer {
    /// 将原始 PCM 字节编码为 WAV 容器
    ///
    /// 格式字段溢出返回 `InvalidFormat`，数据区超过 `u32::MAX - 36` 字节返回 `TooLarge`。
    pub fn encode(pcm: &[u8], format: WavFormat) -> Result<Self, AudioError> {
        let (riff_size, data_size) = chunk_sizes(pcm.len())?;
        let (byte_rate, block_align) = format.header_rates()?;
        let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());

        // RIFF header
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&riff_size.to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        // fmt chunk
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes());
        wav.extend_from_slice(&format.channels.to_le_bytes());
        wav.extend_from_slice(&format.sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&format.bits_per_sample.to_le_bytes());

        // data chunk
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_size.to_le_bytes());
        wav.extend_from_slice(pcm);

        Ok(Self { bytes: wav })
    }

    /// 16-bit PCM 便捷方法
    pub fn encode_pcm16(
        pcm: &[u8],
        sample_rate: u32,
        channels: u16,
    ) -> Result<Self, AudioError> {
        Self::encode(pcm, WavFormat::pcm16(sample_rate, channels))
    }

    /// 包装已有的 WAV 字节，头部必须可解析
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AudioError> {
        let container = Self { bytes };
        container.header()?;
        Ok(container)
    }

    /// 拼接多个同格式容器
    ///
    /// 取第一个容器的头，依次拼接所有容器的数据区，并重写大小字段。
    /// 不校验各容器格式是否一致：格式不同会得到错误的音频而不是报错，
    /// 需要校验时使用 [`AudioContainer::merge_checked`]。
    pub fn merge(containers: &[AudioContainer]) -> Result<Self, AudioError> {
        let first = containers.first().ok_or(AudioError::EmptyMerge)?;
        ensure_headers(containers)?;

        let total_data: usize = containers.iter().map(|c| c.data().len()).sum();
        let (riff_size, data_size) = chunk_sizes(total_data)?;
        let mut merged = Vec::with_capacity(WAV_HEADER_LEN + total_data);
        merged.extend_from_slice(&first.bytes[..WAV_HEADER_LEN]);
        for container in containers {
            merged.extend_from_slice(container.data());
        }

        write_u32(&mut merged, RIFF_SIZE_OFFSET, riff_size);
        write_u32(&mut merged, DATA_SIZE_OFFSET, data_size);

        Ok(Self { bytes: merged })
    }

    /// 拼接前校验所有容器的 fmt 子块与第一个一致
    pub fn merge_checked(containers: &[AudioContainer]) -> Result<Self, AudioError> {
        let first = containers.first().ok_or(AudioError::EmptyMerge)?;
        ensure_headers(containers)?;
        let reference = &first.bytes[FMT_BLOCK];

        if let Some(index) = containers
            .iter()
            .position(|c| &c.bytes[FMT_BLOCK] != reference)
        {
            return Err(AudioError::FormatMismatch { index });
        }

        Self::merge(containers)
    }

    /// 解析 44 字节固定头
    pub fn header(&self) -> Result<WavHeader, AudioError> {
        let data = &self.bytes;
        if data.len() < WAV_HEADER_LEN {
            return Err(AudioError::Truncated { len: data.len() });
        }

        if &data[0..4] != b"RIFF" {
            return Err(AudioError::InvalidHeader("missing RIFF header".to_string()));
        }
        if &data[8..12] != b"WAVE" {
            return Err(AudioError::InvalidHeader(
                "missing WAVE identifier".to_string(),
            ));
        }
        if &data[12..16] != b"fmt " {
            return Err(AudioError::InvalidHeader("missing fmt chunk".to_string()));
        }
        if read_u32(data, 16) != 16 {
            return Err(AudioError::InvalidHeader(
                "unsupported fmt chunk size".to_string(),
            ));
        }
        if &data[36..40] != b"data" {
            return Err(AudioError::InvalidHeader("missing data chunk".to_string()));
        }

        Ok(WavHeader {
            riff_size: read_u32(data, RIFF_SIZE_OFFSET),
            audio_format: read_u16(data, 20),
            format: WavFormat {
                channels: read_u16(data, 22),
                sample_rate: read_u32(data, 24),
                bits_per_sample: read_u16(data, 34),
            },
            byte_rate: read_u32(data, 28),
            block_align: read_u16(data, 32),
            data_size: read_u32(data, DATA_SIZE_OFFSET),
        })
    }

    /// 数据区（头之后的所有字节）
    pub fn data(&self) -> &[u8] {
        &self.bytes[WAV_HEADER_LEN.min(self.bytes.len())..]
    }

    /// 播放时长（毫秒），头不可解析或 byte_rate 为 0 时返回 None
    pub fn duration_ms(&self) -> Option<u64> {
        let header = self.header().ok()?;
        if header.byte_rate == 0 {
            return None;
        }
        Some(self.data().len() as u64 * 1000 / header.byte_rate as u64)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }
}

/// (riff_size, data_size)，两者都必须放得进 u32
fn chunk_sizes(data_len: usize) -> Result<(u32, u32), AudioError> {
    u32::try_from(data_len)
        .ok()
        .and_then(|data_size| Some((data_size.checked_add(36)?, data_size)))
        .ok_or(AudioError::TooLarge { len: data_len })
}

fn ensure_headers(containers: &[AudioContainer]) -> Result<(), AudioError> {
    match containers.iter().find(|c| c.bytes.len() < WAV_HEADER_LEN) {
        Some(short) => Err(AudioError::Truncated {
            len: short.bytes.len(),
        }),
        None => Ok(()),
    }
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn write_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
