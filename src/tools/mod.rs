//! # 外部工具模块
//!
//! 图像、音视频处理全部交给外部程序完成，这里只负责：
//! - 启动前探测工具是否可用
//! - 组装参数并调用，收集失败信息
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: magick (ImageMagick), ffmpeg (FFmpeg)

pub mod ffmpeg;
pub mod magick;

use crate::batch::{ErrorKind, ValidationError};
use crate::cli::ToolArgs;
use crate::error::{MediakitError, Result};

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// 外部工具种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Magick,
    Ffmpeg,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Magick => "ImageMagick",
            ToolKind::Ffmpeg => "FFmpeg",
        }
    }
}

/// 一个可调用的外部程序
#[derive(Debug, Clone)]
pub struct ExternalTool {
    kind: ToolKind,
    binary: PathBuf,
}

impl ExternalTool {
    pub fn new(kind: ToolKind, binary: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            binary: binary.into(),
        }
    }

    /// 按命令行配置选择可执行文件
    pub fn from_args(kind: ToolKind, args: &ToolArgs) -> Self {
        let binary = match kind {
            ToolKind::Magick => args.magick_bin.clone(),
            ToolKind::Ffmpeg => args.ffmpeg_bin.clone(),
        };
        Self::new(kind, binary)
    }

    /// 运行 `<binary> -version` 探测是否可用
    pub fn check(&self) -> std::result::Result<(), ValidationError> {
        let status = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(s) if s.success() => Ok(()),
            Ok(s) => Err(
                ValidationError::new(&self.binary, ErrorKind::ExternalToolUnavailable)
                    .with_detail(format!("{} probe exited with {}", self.kind.name(), s)),
            ),
            Err(e) => Err(
                ValidationError::new(&self.binary, ErrorKind::ExternalToolUnavailable)
                    .with_detail(format!("{} could not be started: {}", self.kind.name(), e)),
            ),
        }
    }

    /// 调用工具，非零退出码视为失败
    pub fn run(&self, args: &[OsString]) -> Result<()> {
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|_| MediakitError::ToolUnavailable {
                tool: self.kind.name().to_string(),
                binary: self.binary.display().to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(MediakitError::ToolFailed {
                command: self.command_line(args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// 用于展示的完整命令行
    pub fn command_line(&self, args: &[OsString]) -> String {
        std::iter::once(self.binary.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(|a| {
                let a = a.to_string_lossy();
                if a.is_empty() || a.contains(char::is_whitespace) {
                    format!("\"{}\"", a)
                } else {
                    a.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_unavailable() {
        let tool = ExternalTool::new(ToolKind::Ffmpeg, "/definitely/not/here/ffmpeg");
        let err = tool.check().unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalToolUnavailable);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_command_line_quotes_spaces() {
        let tool = ExternalTool::new(ToolKind::Magick, "magick");
        let args: Vec<OsString> = vec!["my photo.jpg".into(), "-resize".into(), "50%".into()];
        assert_eq!(
            tool.command_line(&args),
            "magick \"my photo.jpg\" -resize 50%"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_failure() {
        let tool = ExternalTool::new(ToolKind::Ffmpeg, "false");
        match tool.run(&[]) {
            Err(MediakitError::ToolFailed { command, .. }) => assert_eq!(command, "false"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(ExternalTool::new(ToolKind::Ffmpeg, "true").run(&[]).is_ok());
    }
}
