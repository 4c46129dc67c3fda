//! # 输出文件命名规则
//!
//! 由输入文件名按命名策略推导输出文件名（插入后缀、替换扩展名）。
//! 所有命令共用这一处逻辑。
//!
//! ## 依赖关系
//! - 被 `batch/resolver.rs` 调用
//! - 使用 `batch/filter.rs` 规范化扩展名

use super::filter::normalize_extension;

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// 多个输入落到同一输出时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// 报告致命的 OutputCollision
    #[default]
    Fail,
    /// 后出现者追加 `-2`, `-3`, ...
    Rename,
}

/// 命名策略
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingPolicy {
    /// 插入在最后一个扩展名之前，如 `-resized`
    pub suffix: Option<String>,
    /// 替换扩展名，如 `.webp`
    pub new_extension: Option<String>,
    /// 是否在输出目录下保留输入的子目录结构
    pub preserve_structure: bool,
    pub on_collision: CollisionPolicy,
}

impl NamingPolicy {
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.new_extension = Some(normalize_extension(extension));
        self
    }

    pub fn preserve_structure(mut self, preserve: bool) -> Self {
        self.preserve_structure = preserve;
        self
    }

    pub fn on_collision(mut self, policy: CollisionPolicy) -> Self {
        self.on_collision = policy;
        self
    }

    /// 是否会改变文件名
    pub fn renames(&self) -> bool {
        self.suffix.as_deref().is_some_and(|s| !s.is_empty()) || self.new_extension.is_some()
    }
}

/// 按策略推导输出文件名
pub fn derive_file_name(file_name: &OsStr, policy: &NamingPolicy) -> OsString {
    let path = Path::new(file_name);
    let stem = path.file_stem().unwrap_or(file_name);

    let mut name = stem.to_os_string();
    if let Some(suffix) = &policy.suffix {
        name.push(suffix);
    }

    match (&policy.new_extension, path.extension()) {
        (Some(ext), _) => name.push(normalize_extension(ext)),
        (None, Some(ext)) => {
            name.push(".");
            name.push(ext);
        }
        (None, None) => {}
    }

    name
}

/// 在最后一个扩展名之前插入 `-n`
pub fn numbered_file_name(file_name: &OsStr, n: usize) -> OsString {
    let path = Path::new(file_name);
    let stem = path.file_stem().unwrap_or(file_name);

    let mut name = stem.to_os_string();
    name.push(format!("-{}", n));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(name: &str, policy: &NamingPolicy) -> String {
        derive_file_name(OsStr::new(name), policy)
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_suffix_before_extension() {
        let policy = NamingPolicy::default().with_suffix("-resized");
        assert_eq!(derive("a.jpg", &policy), "a-resized.jpg");
        assert_eq!(derive("archive.tar.gz", &policy), "archive.tar-resized.gz");
        assert_eq!(derive("README", &policy), "README-resized");
    }

    #[test]
    fn test_replace_extension() {
        let policy = NamingPolicy::default().with_extension("WEBP");
        assert_eq!(derive("a.jpg", &policy), "a.webp");
        assert_eq!(derive("noext", &policy), "noext.webp");
    }

    #[test]
    fn test_suffix_and_extension() {
        let policy = NamingPolicy::default()
            .with_suffix("-small")
            .with_extension(".png");
        assert_eq!(derive("photo.JPG", &policy), "photo-small.png");
    }

    #[test]
    fn test_no_rule_keeps_name() {
        let policy = NamingPolicy::default();
        assert!(!policy.renames());
        assert_eq!(derive("clip.mp4", &policy), "clip.mp4");
    }

    #[test]
    fn test_numbered_file_name() {
        let name = numbered_file_name(OsStr::new("x-opt.jpg"), 2);
        assert_eq!(name, OsString::from("x-opt-2.jpg"));
        let name = numbered_file_name(OsStr::new("x"), 3);
        assert_eq!(name, OsString::from("x-3"));
    }
}
