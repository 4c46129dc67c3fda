//! # 公共参数定义
//!
//! 每个处理命令都会展开 `BatchArgs`：输入、输出、递归、dry-run 等。
//! 时间窗口参数由音视频的 trim 命令共用。
//!
//! ## 依赖关系
//! - 被 `cli/image.rs`, `cli/video.rs`, `cli/audio.rs` 使用
//! - 参数传递给 `commands/pipeline.rs`

use crate::batch::{CollisionPolicy, NamingPolicy, OutputDefault, ResolveOptions};

use clap::{Args, ValueEnum};
use regex::Regex;
use std::path::PathBuf;

/// 输出冲突处理方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OnCollision {
    /// Abort before processing and list the colliding inputs
    #[default]
    Fail,
    /// Append -2, -3, ... to later inputs
    Rename,
}

impl From<OnCollision> for CollisionPolicy {
    fn from(value: OnCollision) -> Self {
        match value {
            OnCollision::Fail => CollisionPolicy::Fail,
            OnCollision::Rename => CollisionPolicy::Rename,
        }
    }
}

/// 批处理公共参数
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Input file, comma-separated list, directory or glob pattern
    pub input: String,

    /// Output file (single input only) or directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Directory used when -o is absent (default: beside each input)
    #[arg(long, env = "MEDIAKIT_OUTPUT_DIR", value_name = "DIR")]
    pub default_output_dir: Option<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Print the resolved input -> output mapping without processing
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Put every output directly in the output directory
    #[arg(long, default_value_t = false)]
    pub flatten: bool,

    /// Override the suffix inserted before the extension (empty to disable)
    #[arg(long)]
    pub suffix: Option<String>,

    /// What to do when two inputs map to the same output
    #[arg(long, value_enum, default_value_t = OnCollision::Fail)]
    pub on_collision: OnCollision,

    /// Write a CSV report of every processed file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print the external command for each file
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl BatchArgs {
    /// 在命令默认命名策略上叠加用户选项
    pub fn naming(&self, mut policy: NamingPolicy) -> NamingPolicy {
        if let Some(suffix) = &self.suffix {
            policy.suffix = if suffix.is_empty() {
                None
            } else {
                Some(suffix.clone())
            };
        }
        policy
            .preserve_structure(!self.flatten)
            .on_collision(self.on_collision.into())
    }

    /// 输出解析选项；dry-run 时不创建目录
    pub fn resolve_options(&self) -> ResolveOptions {
        let default = match &self.default_output_dir {
            Some(dir) => OutputDefault::Directory(dir.clone()),
            None => OutputDefault::BesideInput,
        };
        ResolveOptions {
            default,
            create_dirs: !self.dry_run,
        }
    }
}

/// 时间窗口参数
#[derive(Args, Debug, Clone)]
pub struct TimeRange {
    /// Start time (SS[.fff], MM:SS or HH:MM:SS[.fff])
    #[arg(long, default_value = "0", value_parser = parse_timestamp)]
    pub start: String,

    /// End time
    #[arg(long, value_parser = parse_timestamp, conflicts_with = "duration")]
    pub end: Option<String>,

    /// Duration from start
    #[arg(long, value_parser = parse_timestamp)]
    pub duration: Option<String>,
}

/// 校验时间戳格式
pub fn parse_timestamp(input: &str) -> Result<String, String> {
    let pattern = Regex::new(r"^(\d+(\.\d+)?|\d{1,2}:\d{2}(\.\d+)?|\d+:\d{2}:\d{2}(\.\d+)?)$")
        .map_err(|e| e.to_string())?;
    let input = input.trim();
    if pattern.is_match(input) {
        Ok(input.to_string())
    } else {
        Err(format!(
            "invalid timestamp '{}': expected SS[.fff], MM:SS or HH:MM:SS[.fff]",
            input
        ))
    }
}

/// 校验码率格式（如 `192k`）
pub fn parse_bitrate(input: &str) -> Result<String, String> {
    let pattern = Regex::new(r"^\d+[kKmM]?$").map_err(|e| e.to_string())?;
    let input = input.trim();
    if pattern.is_match(input) {
        Ok(input.to_string())
    } else {
        Err(format!("invalid bitrate '{}': expected e.g. 128k or 2M", input))
    }
}
