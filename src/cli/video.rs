//! # video 子命令 CLI 定义
//!
//! 视频批处理命令，底层调用 FFmpeg。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/video.rs`

use super::common::{BatchArgs, TimeRange};
use clap::{Args, Subcommand, ValueEnum};

/// video 主命令参数
#[derive(Args, Debug)]
pub struct VideoArgs {
    #[command(subcommand)]
    pub command: VideoCommands,
}

/// video 子命令
#[derive(Subcommand, Debug)]
pub enum VideoCommands {
    /// Cut a time window out of each video (stream copy)
    Trim(VideoTrimArgs),

    /// Convert videos to another container
    Convert(VideoConvertArgs),

    /// Re-encode with H.264 at a given CRF
    Compress(VideoCompressArgs),

    /// Scale videos to a given width, keeping aspect ratio
    Scale(ScaleArgs),

    /// Remove audio tracks
    Mute(MuteArgs),
}

/// 支持的视频输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum VideoFormat {
    Mp4,
    Mkv,
    Webm,
    Mov,
    Gif,
}

impl VideoFormat {
    pub fn extension(self) -> &'static str {
        match self {
            VideoFormat::Mp4 => ".mp4",
            VideoFormat::Mkv => ".mkv",
            VideoFormat::Webm => ".webm",
            VideoFormat::Mov => ".mov",
            VideoFormat::Gif => ".gif",
        }
    }
}

impl std::fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.extension()[1..])
    }
}

/// x264 预设
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Preset {
    Ultrafast,
    Veryfast,
    Fast,
    Medium,
    Slow,
    Veryslow,
}

impl Preset {
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Ultrafast => "ultrafast",
            Preset::Veryfast => "veryfast",
            Preset::Fast => "fast",
            Preset::Medium => "medium",
            Preset::Slow => "slow",
            Preset::Veryslow => "veryslow",
        }
    }
}

/// trim 参数
#[derive(Args, Debug)]
pub struct VideoTrimArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    #[command(flatten)]
    pub range: TimeRange,
}

/// convert 参数
#[derive(Args, Debug)]
pub struct VideoConvertArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Target container
    #[arg(long, value_enum)]
    pub to: VideoFormat,
}

/// compress 参数
#[derive(Args, Debug)]
pub struct VideoCompressArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Constant rate factor (0-51, lower is better quality)
    #[arg(long, default_value_t = 28, value_parser = clap::value_parser!(u8).range(0..=51))]
    pub crf: u8,

    /// Encoder speed preset
    #[arg(long, value_enum, default_value_t = Preset::Medium)]
    pub preset: Preset,
}

/// scale 参数
#[derive(Args, Debug)]
pub struct ScaleArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Target width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(2..))]
    pub width: u32,
}

/// mute 参数
#[derive(Args, Debug)]
pub struct MuteArgs {
    #[command(flatten)]
    pub batch: BatchArgs,
}
