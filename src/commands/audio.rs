//! # audio 命令实现
//!
//! 音频处理命令的操作定义，参数交给 FFmpeg。
//! `extract` 的输入是视频文件，输出是音频。
//!
//! ## 依赖关系
//! - 使用 `cli/audio.rs` 定义的参数
//! - 使用 `tools/ffmpeg.rs` 组装参数

use super::Operation;
use crate::batch::{ExtensionSet, NamingPolicy};
use crate::cli::audio::{
    AudioCommands, AudioConvertArgs, AudioFormat, AudioTrimArgs, ExtractArgs, NormalizeArgs,
};
use crate::cli::common::BatchArgs;
use crate::tools::ffmpeg::{self, opts, AUDIO_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::tools::ToolKind;

use std::ffi::OsString;
use std::path::Path;

/// 子命令到操作定义
pub fn operation(cmd: AudioCommands) -> Box<dyn Operation> {
    match cmd {
        AudioCommands::Convert(args) => Box::new(args),
        AudioCommands::Trim(args) => Box::new(args),
        AudioCommands::Normalize(args) => Box::new(args),
        AudioCommands::Extract(args) => Box::new(args),
    }
}

fn audio_extensions() -> ExtensionSet {
    ExtensionSet::new(AUDIO_EXTENSIONS)
}

/// 编码选项：有损格式可指定码率
fn encode_options(format: AudioFormat, bitrate: Option<&str>) -> Vec<OsString> {
    let mut options = opts(["-vn"]);
    if let (Some(bitrate), false) = (bitrate, format.is_lossless()) {
        options.extend(opts(["-b:a", bitrate]));
    }
    options
}

impl Operation for AudioConvertArgs {
    fn title(&self) -> String {
        format!("Converting audio to {}", self.to)
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Ffmpeg
    }

    fn extensions(&self) -> ExtensionSet {
        audio_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_extension(self.to.extension())
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        ffmpeg::build_args(input, encode_options(self.to, self.bitrate.as_deref()), output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for AudioTrimArgs {
    fn title(&self) -> String {
        "Trimming audio".to_string()
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Ffmpeg
    }

    fn extensions(&self) -> ExtensionSet {
        audio_extensions()
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

impl Operation for NormalizeArgs {
    fn title(&self) -> String {
        format!("Normalizing audio to {} LUFS", self.target_lufs)
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Ffmpeg
    }

    fn extensions(&self) -> ExtensionSet {
        audio_extensions()
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_suffix("-normalized")
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let filter = format!("loudnorm=I={}:TP=-1.5:LRA=11", self.target_lufs);
        ffmpeg::build_args(input, opts(["-af", filter.as_str()]), output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}

impl Operation for ExtractArgs {
    fn title(&self) -> String {
        format!("Extracting {} audio from videos", self.to)
    }

    fn tool(&self) -> ToolKind {
        ToolKind::Ffmpeg
    }

    fn extensions(&self) -> ExtensionSet {
        ExtensionSet::new(VIDEO_EXTENSIONS)
    }

    fn naming(&self) -> NamingPolicy {
        NamingPolicy::default().with_extension(self.to.extension())
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        ffmpeg::build_args(input, encode_options(self.to, self.bitrate.as_deref()), output)
    }

    fn batch(&self) -> &BatchArgs {
        &self.batch
    }
}
