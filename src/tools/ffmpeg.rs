//! # FFmpeg 参数组装
//!
//! 调用形式：
//! `ffmpeg -hide_banner -loglevel error -y -i <input> <options...> <output>`
//!
//! `-y` 总是带上：是否覆盖已有输出在调用前就已决定。

use std::ffi::OsString;
use std::path::Path;

/// 默认接受的视频扩展名
pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".mov", ".mkv", ".avi", ".webm", ".m4v", ".flv", ".wmv",
];

/// 默认接受的音频扩展名
pub const AUDIO_EXTENSIONS: &[&str] = &[
    ".mp3", ".wav", ".flac", ".aac", ".m4a", ".ogg", ".opus",
];

/// 组装完整参数列表
pub fn build_args(input: &Path, options: Vec<OsString>, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y", "-i"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_os_string());
    args.extend(options);
    args.push(output.as_os_str().to_os_string());
    args
}

/// 时间窗口选项（`-ss` / `-to` / `-t`）
pub fn time_window(start: &str, end: Option<&str>, duration: Option<&str>) -> Vec<OsString> {
    let mut opts: Vec<OsString> = vec!["-ss".into(), start.into()];
    if let Some(end) = end {
        opts.push("-to".into());
        opts.push(end.into());
    } else if let Some(duration) = duration {
        opts.push("-t".into());
        opts.push(duration.into());
    }
    opts
}

/// 把字符串列表转为参数
pub fn opts<const N: usize>(items: [&str; N]) -> Vec<OsString> {
    items.iter().map(OsString::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_build_args_layout() {
        let args = build_args(Path::new("in.mp4"), opts(["-an", "-c:v", "copy"]), Path::new("out.mp4"));
        assert_eq!(
            strings(&args),
            vec![
                "-hide_banner", "-loglevel", "error", "-y", "-i", "in.mp4", "-an", "-c:v", "copy",
                "out.mp4"
            ]
        );
    }

    #[test]
    fn test_time_window() {
        assert_eq!(strings(&time_window("5", Some("00:01:00"), None)), vec!["-ss", "5", "-to", "00:01:00"]);
        assert_eq!(strings(&time_window("0", None, Some("30"))), vec!["-ss", "0", "-t", "30"]);
        assert_eq!(strings(&time_window("1:30", None, None)), vec!["-ss", "1:30"]);
    }
}
