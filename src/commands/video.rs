//! # video 命令实现
//!
//! 视频处理命令的操作定义，参数交给 FFmpeg。
//!
//! ## 依赖关系
//! - 使用 `cli/video.rs` 定义的参数
//! - 使用 `tools/ffmpeg.rs` 组装参数

use super::Operation;
use crate::batch::{ExtensionSet, NamingPolicy};
use crate::cli::common::BatchArgs;
use crate::cli::video::{
    MuteArgs, ScaleArgs, VideoCommands, VideoCompressArgs, VideoConvertArgs, VideoFormat,
    VideoTrimArgs,
};
use crate::tools::ffmpeg::{self, opts, VIDEO_EXTENSIONS};
use crate::tools::ToolKind;

use std::ffi::OsString;
use std::path::Path;

/// 子命令到操作定义
pub fn operation(cmd: VideoCommands) -> Box<dyn Operation> {
    match cmd {
        VideoCommands::Trim(args) => Box::new(args),
        VideoCommands::Convert(args) => Box::new(args),
        VideoCommands::Compress(args) => Box::new(args),
        VideoCommands::Scale(args) => Box::new(args),
        VideoCommands::Mute(args) => Box::new(args),
    }
}

fn video_extensions() -> ExtensionSet {
    ExtensionSet::new(VIDEO_EXTENSIONS)
}

impl Operation for VideoTrimArgs {
    fn title(&self) -> String {
        "Trimming videos".to_string()
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Ffmpeg
    }

    fn extensions(&self) -> ExtensionSet {
        video_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_suffix("-trimmed")
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut options = ffmpeg::time_window(
            &self.range.start,
            self.range.end.as_deref(),
            self.range.duration.as_deref(),
        );
        options.extend(opts(["-c", "copy"]));
        ffmpeg::build_args(input, options, output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for VideoConvertArgs {
    fn title(&self) -> String {
        format!("Converting videos to {}", self.to)
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Ffmpeg
    }

    fn extensions(&self) -> ExtensionSet {
        video_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_extension(self.to.extension())
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let options = match self.to {
            VideoFormat::Mp4 | VideoFormat::Mov => opts(["-c:v", "libx264", "-c:a", "aac"]),
            VideoFormat::Webm => opts(["-c:v", "libvpx-vp9", "-c:a", "libopus"]),
            VideoFormat::Mkv => opts(["-c", "copy"]),
            VideoFormat::Gif => opts(["-vf", "fps=12,scale=480:-1:flags=lanczos", "-an"]),
        };
        ffmpeg::build_args(input, options, output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for VideoCompressArgs {
    fn title(&self) -> String {
        format!("Compressing videos (crf {}, {})", self.crf, self.preset.as_str())
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Ffmpeg
    }

    fn extensions(&self) -> ExtensionSet {
        video_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_suffix("-compressed")
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let crf = self.crf.to_string();
        let options = opts([
            "-c:v",
            "libx264",
            "-crf",
            crf.as_str(),
            "-preset",
            self.preset.as_str(),
            "-c:a",
            "copy",
        ]);
        ffmpeg::build_args(input, options, output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for ScaleArgs {
    fn title(&self) -> String {
        format!("Scaling videos to {}px wide", self.width)
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Ffmpeg
    }

    fn extensions(&self) -> ExtensionSet {
        video_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_suffix("-scaled")
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        // -2 保持比例且高度为偶数
        let filter = format!("scale={}:-2", self.width);
        let options = opts(["-vf", filter.as_str(), "-c:a", "copy"]);
        ffmpeg::build_args(input, options, output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for MuteArgs {
    fn title(&self) -> String {
        "Removing audio from videos".to_string()
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Ffmpeg
    }

    fn extensions(&self) -> ExtensionSet {
        video_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_suffix("-muted")
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        ffmpeg::build_args(input, opts(["-an", "-c:v", "copy"]), output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}
