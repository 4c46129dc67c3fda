//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `image`: 图像处理（ImageMagick）
//!   - `resize`, `convert`, `compress`, `rotate`, `grayscale`
//! - `video`: 视频处理（FFmpeg）
//!   - `trim`, `convert`, `compress`, `scale`, `mute`
//! - `audio`: 音频处理（FFmpeg）
//!   - `convert`, `trim`, `normalize`, `extract`
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, image, video, audio

pub mod audio;
pub mod common;
pub mod image;
pub mod video;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mediakit - 批量图像 / 音视频处理工具
#[derive(Parser)]
#[command(name = "mediakit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Batch image, video and audio processing on top of ImageMagick and FFmpeg", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub tools: ToolArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 外部工具路径配置
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// ImageMagick executable
    #[arg(long, global = true, env = "MEDIAKIT_MAGICK", default_value = "magick")]
    pub magick_bin: PathBuf,

    /// FFmpeg executable
    #[arg(long, global = true, env = "MEDIAKIT_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg_bin: PathBuf,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Image operations (ImageMagick)
    Image(image::ImageArgs),

    /// Video operations (FFmpeg)
    Video(video::VideoArgs),

    /// Audio operations (FFmpeg)
    Audio(audio::AudioArgs),
}
