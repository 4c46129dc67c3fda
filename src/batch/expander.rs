//! # 输入路径展开
//!
//! 把用户给出的一个输入参数展开为去重后的绝对路径文件列表。
//!
//! ## 功能
//! - 支持单文件、逗号分隔的多路径、目录
//! - 含 `*` `?` `[` 的片段按 glob 模式展开
//! - 所有片段都会处理完，问题统一收集后返回
//! - 按规范路径去重，保留首次出现的顺序
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs` 调用
//! - 使用 `batch/walker.rs` 遍历目录
//! - 使用 `glob` 展开通配符

use super::filter::ExtensionSet;
use super::report::{ErrorKind, ValidationError};
use super::walker::{self, FileEntry};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// 展开选项
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    pub allowed: ExtensionSet,
    pub recursive: bool,
}

/// 展开结果
#[derive(Debug, Default)]
pub struct Expansion {
    pub files: Vec<FileEntry>,
    pub errors: Vec<ValidationError>,
}

impl Expansion {
    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(ValidationError::is_fatal)
    }
}

/// 展开输入参数
pub fn expand(specifier: &str, options: &ExpandOptions) -> Expansion {
    let mut expansion = Expansion::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for token in specifier.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let mut found = Vec::new();

        if is_pattern(token) {
            expand_pattern(token, &options.allowed, &mut found, &mut expansion.errors);
        } else {
            expand_path(token, options, &mut found, &mut expansion.errors);
        }

        for entry in found {
            let key = fs::canonicalize(&entry.absolute_path)
                .unwrap_or_else(|_| entry.absolute_path.clone());
            if seen.insert(key) {
                expansion.files.push(entry);
            }
        }
    }

    expansion
}

fn is_pattern(token: &str) -> bool {
    token.contains(['*', '?', '['])
}

/// 相对路径按当前工作目录转为绝对路径
fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn expand_path(
    token: &str,
    options: &ExpandOptions,
    found: &mut Vec<FileEntry>,
    errors: &mut Vec<ValidationError>,
) {
    let path = absolutize(Path::new(token));

    let metadata = match fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) => {
            errors.push(ValidationError::from_io(Path::new(token), &e, ErrorKind::NotFound));
            return;
        }
    };

    if metadata.is_dir() {
        let outcome = walker::walk(&path, &options.allowed, options.recursive);
        found.extend(outcome.entries);
        errors.extend(outcome.errors);
    } else if options.allowed.matches(&path) {
        found.push(FileEntry::from_file(path));
    } else {
        errors.push(
            ValidationError::new(token, ErrorKind::UnsupportedExtension)
                .with_detail(format!("allowed: {}", options.allowed)),
        );
    }
}

fn expand_pattern(
    token: &str,
    allowed: &ExtensionSet,
    found: &mut Vec<FileEntry>,
    errors: &mut Vec<ValidationError>,
) {
    let paths = match glob::glob(token) {
        Ok(paths) => paths,
        Err(e) => {
            errors.push(ValidationError::new(token, ErrorKind::InvalidPattern).with_detail(e.msg));
            return;
        }
    };

    let mut matched_any = false;
    let mut matches: Vec<PathBuf> = Vec::new();
    for item in paths {
        match item {
            Ok(path) => {
                matched_any = true;
                if path.is_file() && allowed.matches(&path) {
                    matches.push(absolutize(&path));
                }
            }
            Err(e) => {
                errors.push(ValidationError::from_io(
                    e.path(),
                    e.error(),
                    ErrorKind::PermissionDenied,
                ));
            }
        }
    }

    if !matched_any {
        errors.push(ValidationError::new(token, ErrorKind::NotFound));
        return;
    }
    if matches.is_empty() {
        errors.push(
            ValidationError::new(token, ErrorKind::EmptyPattern)
                .with_detail(format!("looked for: {}", allowed)),
        );
        return;
    }

    matches.sort();
    found.extend(matches.into_iter().map(FileEntry::from_file));
}
