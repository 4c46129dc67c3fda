//! # image 子命令 CLI 定义
//!
//! 图像批处理命令，底层调用 ImageMagick。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/image.rs`

use super::common::BatchArgs;
use clap::{ArgGroup, Args, Subcommand, ValueEnum};

/// image 主命令参数
#[derive(Args, Debug)]
pub struct ImageArgs {
    #[command(subcommand)]
    pub command: ImageCommands,
}

/// image 子命令
#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Resize images by width, height or percentage
    Resize(ResizeArgs),

    /// Convert images to another format
    Convert(ImageConvertArgs),

    /// Re-encode images at a lower quality and strip metadata
    Compress(ImageCompressArgs),

    /// Rotate images clockwise
    Rotate(RotateArgs),

    /// Convert images to grayscale
    Grayscale(GrayscaleArgs),
}

/// 支持的图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ImageFormat {
    Jpg,
    Png,
    Webp,
    Avif,
    Tiff,
    Gif,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpg => ".jpg",
            ImageFormat::Png => ".png",
            ImageFormat::Webp => ".webp",
            ImageFormat::Avif => ".avif",
            ImageFormat::Tiff => ".tiff",
            ImageFormat::Gif => ".gif",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.extension()[1..])
    }
}

/// resize 参数
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("size")
        .required(true)
        .multiple(true)
        .args(["width", "height", "percent"])
))]
pub struct ResizeArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Target width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Scale by percentage
    #[arg(long, conflicts_with_all = ["width", "height"])]
    pub percent: Option<u32>,

    /// Ignore aspect ratio and force the exact size
    #[arg(long, default_value_t = false)]
    pub exact: bool,
}

/// convert 参数
#[derive(Args, Debug)]
pub struct ImageConvertArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Target format
    #[arg(long, value_enum)]
    pub to: ImageFormat,

    /// Encoder quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

/// compress 参数
#[derive(Args, Debug)]
pub struct ImageCompressArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Encoder quality (1-100)
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,
}

/// rotate 参数
#[derive(Args, Debug)]
pub struct RotateArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Clockwise angle in degrees (negative for counter-clockwise)
    #[arg(long, allow_negative_numbers = true)]
    pub degrees: f64,
}

/// grayscale 参数
#[derive(Args, Debug)]
pub struct GrayscaleArgs {
    #[command(flatten)]
    pub batch: BatchArgs,
}
