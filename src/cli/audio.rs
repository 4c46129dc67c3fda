//! # audio 子命令 CLI 定义
//!
//! 音频批处理命令，底层调用 FFmpeg。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/audio.rs`

use super::common::{parse_bitrate, BatchArgs, TimeRange};
use clap::{Args, Subcommand, ValueEnum};

/// audio 主命令参数
#[derive(Args, Debug)]
pub struct AudioArgs {
    #[command(subcommand)]
    pub command: AudioCommands,
}

/// audio 子命令
#[derive(Subcommand, Debug)]
pub enum AudioCommands {
    /// Convert audio files to another format
    Convert(AudioConvertArgs),

    /// Cut a time window out of each audio file
    Trim(AudioTrimArgs),

    /// Loudness-normalize audio (EBU R128)
    Normalize(NormalizeArgs),

    /// Extract the audio track from video files
    Extract(ExtractArgs),
}

/// 支持的音频输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Flac,
    Aac,
    Ogg,
    Opus,
}

impl AudioFormat {
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => ".mp3",
            AudioFormat::Wav => ".wav",
            AudioFormat::Flac => ".flac",
            AudioFormat::Aac => ".aac",
            AudioFormat::Ogg => ".ogg",
            AudioFormat::Opus => ".opus",
        }
    }

    /// 无损格式不接受码率
    pub fn is_lossless(self) -> bool {
        matches!(self, AudioFormat::Wav | AudioFormat::Flac)
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.extension()[1..])
    }
}

/// convert 参数
#[derive(Args, Debug)]
pub struct AudioConvertArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Target format
    #[arg(long, value_enum)]
    pub to: AudioFormat,

    /// Target bitrate for lossy formats (e.g. 192k)
    #[arg(long, value_parser = parse_bitrate)]
    pub bitrate: Option<String>,
}

/// trim 参数
#[derive(Args, Debug)]
pub struct AudioTrimArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    #[command(flatten)]
    pub range: TimeRange,
}

/// normalize 参数
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Integrated loudness target in LUFS
    #[arg(long, default_value_t = -16.0, allow_negative_numbers = true)]
    pub target_lufs: f64,
}

/// extract 参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Output audio format
    #[arg(long, value_enum, default_value_t = AudioFormat::Mp3)]
    pub to: AudioFormat,

    /// Target bitrate for lossy formats (e.g. 192k)
    #[arg(long, value_parser = parse_bitrate)]
    pub bitrate: Option<String>,
}
