//! # 目录遍历
//!
//! 枚举目录下匹配扩展名的文件，可选递归。
//!
//! ## 功能
//! - 使用显式工作栈代替函数递归，深层目录不会撑爆调用栈
//! - 按规范路径记录已访问目录，符号链接成环时每个目录只遍历一次
//! - 同一目录经多个名字可达时，按名字排序最先遇到的那个生效
//! - 结果按相对路径排序，同一棵树重复运行顺序一致
//!
//! ## 依赖关系
//! - 被 `batch/expander.rs` 调用
//! - 使用 `batch/filter.rs` 过滤扩展名
//! - 使用 `walkdir` 读取单层目录项

use super::filter::ExtensionSet;
use super::report::{ErrorKind, ValidationError};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 待处理的输入文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// 绝对路径
    pub absolute_path: PathBuf,
    /// 相对于展开根目录的路径；单个文件时即文件名
    pub relative_path: PathBuf,
}

impl FileEntry {
    /// 单个文件输入：相对路径取文件名
    pub fn from_file(absolute_path: PathBuf) -> Self {
        let relative_path = absolute_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| absolute_path.clone());
        Self {
            absolute_path,
            relative_path,
        }
    }
}

/// 遍历结果
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub entries: Vec<FileEntry>,
    pub errors: Vec<ValidationError>,
}

/// 遍历 `root` 下匹配 `allowed` 的文件
pub fn walk(root: &Path, allowed: &ExtensionSet, recursive: bool) -> WalkOutcome {
    let mut outcome = WalkOutcome::default();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut pending: Vec<(PathBuf, PathBuf)> = vec![(root.to_path_buf(), PathBuf::new())];

    while let Some((dir, prefix)) = pending.pop() {
        let key = fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
        if !visited.insert(key) {
            continue;
        }

        let listing = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        let mut subdirs = Vec::new();

        for item in listing {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    // 成环的链接由 visited 处理；悬空链接直接忽略
                    if err.loop_ancestor().is_some() {
                        continue;
                    }
                    if let Some(io) = err.io_error() {
                        if io.kind() != std::io::ErrorKind::NotFound {
                            let path = err.path().unwrap_or(dir.as_path());
                            outcome.errors.push(ValidationError::from_io(
                                path,
                                io,
                                ErrorKind::PermissionDenied,
                            ));
                        }
                    }
                    continue;
                }
            };

            let relative_path = prefix.join(entry.file_name());
            let file_type = entry.file_type();

            if file_type.is_dir() {
                if recursive {
                    subdirs.push((entry.path().to_path_buf(), relative_path));
                }
            } else if file_type.is_file() && allowed.matches(entry.path()) {
                outcome.entries.push(FileEntry {
                    absolute_path: entry.path().to_path_buf(),
                    relative_path,
                });
            }
        }

        // 逆序入栈，名字最小的子目录先出栈
        pending.extend(subdirs.into_iter().rev());
    }

    outcome
        .entries
        .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    if outcome.entries.is_empty() {
        outcome.errors.push(
            ValidationError::new(root, ErrorKind::EmptyDirectory)
                .with_detail(format!("looked for: {}", allowed)),
        );
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn relatives(outcome: &WalkOutcome) -> Vec<String> {
        outcome
            .entries
            .iter()
            .map(|e| e.relative_path.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_recursion_boundary() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.jpg");
        touch(tmp.path(), "b.png");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "sub/c.jpg");
        touch(tmp.path(), "sub/deeper/d.png");
        let allowed = ExtensionSet::new(["jpg", "png"]);

        let flat = walk(tmp.path(), &allowed, false);
        assert_eq!(relatives(&flat), vec!["a.jpg", "b.png"]);
        assert!(flat.errors.is_empty());

        let deep = walk(tmp.path(), &allowed, true);
        assert_eq!(
            relatives(&deep),
            vec!["a.jpg", "b.png", "sub/c.jpg", "sub/deeper/d.png"]
        );
    }

    #[test]
    fn test_order_is_stable() {
        let tmp = TempDir::new().unwrap();
        for name in ["z.jpg", "m.jpg", "a.jpg", "k/b.jpg"] {
            touch(tmp.path(), name);
        }
        let allowed = ExtensionSet::new(["jpg"]);

        let first = relatives(&walk(tmp.path(), &allowed, true));
        let second = relatives(&walk(tmp.path(), &allowed, true));
        assert_eq!(first, second);
        assert_eq!(first, vec!["a.jpg", "k/b.jpg", "m.jpg", "z.jpg"]);
    }

    #[test]
    fn test_empty_directory_is_warning() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "readme.md");

        let outcome = walk(tmp.path(), &ExtensionSet::new(["jpg"]), true);
        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].kind, ErrorKind::EmptyDirectory);
        assert!(!outcome.errors[0].is_fatal());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_walked_once() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.jpg");
        touch(tmp.path(), "sub/b.jpg");
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("sub/loop")).unwrap();

        let outcome = walk(tmp.path(), &ExtensionSet::new(["jpg"]), true);
        assert_eq!(relatives(&outcome), vec!["a.jpg", "sub/b.jpg"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_linked_directory_resolved_by_name_order() {
        let tmp = TempDir::new().unwrap();
        let allowed = ExtensionSet::new(["jpg"]);

        let first = tmp.path().join("first");
        touch(&first, "a_real/x.jpg");
        std::os::unix::fs::symlink(first.join("a_real"), first.join("b_link")).unwrap();
        assert_eq!(relatives(&walk(&first, &allowed, true)), vec!["a_real/x.jpg"]);

        let second = tmp.path().join("second");
        touch(&second, "b_real/x.jpg");
        std::os::unix::fs::symlink(second.join("b_real"), second.join("a_link")).unwrap();
        assert_eq!(relatives(&walk(&second, &allowed, true)), vec!["a_link/x.jpg"]);
    }

    #[test]
    fn test_file_entry_from_file() {
        let entry = FileEntry::from_file(PathBuf::from("/data/photo.jpg"));
        assert_eq!(entry.relative_path, PathBuf::from("photo.jpg"));
    }
}
