//! # 扩展名过滤
//!
//! 判断文件扩展名是否属于允许集合（大小写不敏感）。
//!
//! ## 依赖关系
//! - 被 `batch/walker.rs`, `batch/expander.rs` 调用
//! - 无外部模块依赖

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// 允许的扩展名集合，统一存为小写且带前导点（如 `.jpg`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    /// 从扩展名列表创建，`jpg` / `.JPG` 均可
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| ext.len() > 1)
            .collect();
        Self { extensions }
    }

    /// 路径扩展名是否在集合中
    pub fn matches(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.contains(&normalize_extension(ext)),
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(", ");
        write!(f, "{}", joined)
    }
}

/// 规范化为小写并补齐前导点
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_case_insensitive() {
        let set = ExtensionSet::new([".jpg", "png"]);
        assert!(set.matches(Path::new("photos/a.jpg")));
        assert!(set.matches(Path::new("photos/A.JPG")));
        assert!(set.matches(Path::new("b.Png")));
        assert!(!set.matches(Path::new("c.gif")));
    }

    #[test]
    fn test_no_extension_never_matches() {
        let set = ExtensionSet::new(["jpg"]);
        assert!(!set.matches(Path::new("README")));
        assert!(!set.matches(Path::new(".jpg")));
    }

    #[test]
    fn test_only_final_extension_counts() {
        let set = ExtensionSet::new(["gz"]);
        assert!(set.matches(Path::new("archive.tar.gz")));
        assert!(!ExtensionSet::new(["tar"]).matches(Path::new("archive.tar.gz")));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("JPG"), ".jpg");
        assert_eq!(normalize_extension(".Png"), ".png");
        assert!(ExtensionSet::new(["", "."]).is_empty());
    }
}
