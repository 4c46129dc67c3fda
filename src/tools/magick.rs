//! # ImageMagick 参数组装
//!
//! 调用形式：`magick <input> <operations...> <output>`，
//! 输出格式由输出文件扩展名决定。

use std::ffi::OsString;
use std::path::Path;

/// 默认接受的图像扩展名
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".webp", ".gif", ".bmp", ".tif", ".tiff", ".heic", ".avif",
];

/// 组装完整参数列表
pub fn build_args(input: &Path, operations: Vec<OsString>, output: &Path) -> Vec<OsString> {
    let mut args = Vec::with_capacity(operations.len() + 2);
    args.push(input.as_os_str().to_os_string());
    args.extend(operations);
    args.push(output.as_os_str().to_os_string());
    args
}

/// 缩放几何描述
///
/// - 宽高都给：在 WxH 框内等比缩放，`exact` 时强制拉伸
/// - 只给宽或高：另一边按比例
/// - 百分比：`P%`
pub fn resize_geometry(
    width: Option<u32>,
    height: Option<u32>,
    percent: Option<u32>,
    exact: bool,
) -> Option<String> {
    let geometry = match (width, height, percent) {
        (_, _, Some(p)) => return Some(format!("{}%", p)),
        (Some(w), Some(h), None) => format!("{}x{}", w, h),
        (Some(w), None, None) => w.to_string(),
        (None, Some(h), None) => format!("x{}", h),
        (None, None, None) => return None,
    };
    Some(if exact { format!("{}!", geometry) } else { geometry })
}
