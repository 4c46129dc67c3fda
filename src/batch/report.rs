//! # 校验报告
//!
//! 路径展开与输出解析阶段的问题都不会立即中断，而是作为
//! `ValidationError` 收集起来，最后由 `ValidationReport` 汇总为
//! 致命错误和警告两组。
//!
//! ## 依赖关系
//! - 被 `batch/` 下所有阶段使用
//! - 被 `commands/pipeline.rs` 用于决定是否中止

use std::fmt;
use std::path::{Path, PathBuf};

/// 问题分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 指定路径不存在
    NotFound,
    /// 文件扩展名不在允许集合中
    UnsupportedExtension,
    /// 目录中没有匹配文件（警告）
    EmptyDirectory,
    /// 通配符匹配到的文件全部被过滤（警告）
    EmptyPattern,
    /// 通配符本身无效
    InvalidPattern,
    /// 多个输入解析到同一输出
    OutputCollision,
    /// 输出目标与输入数量或磁盘状态不符
    InvalidOutputTarget,
    /// 创建目录或读取目录被拒绝
    PermissionDenied,
    /// 外部处理工具无法调用
    ExternalToolUnavailable,
}

impl ErrorKind {
    /// 是否为致命错误
    pub fn is_fatal(self) -> bool {
        !matches!(self, ErrorKind::EmptyDirectory | ErrorKind::EmptyPattern)
    }

    fn label(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::UnsupportedExtension => "unsupported extension",
            ErrorKind::EmptyDirectory => "no matching files in directory",
            ErrorKind::EmptyPattern => "pattern matched no supported files",
            ErrorKind::InvalidPattern => "invalid pattern",
            ErrorKind::OutputCollision => "output collision",
            ErrorKind::InvalidOutputTarget => "invalid output target",
            ErrorKind::PermissionDenied => "permission denied",
            ErrorKind::ExternalToolUnavailable => "external tool unavailable",
        }
    }
}

/// 单条校验问题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub detail: Option<String>,
}

impl ValidationError {
    pub fn new(path: impl Into<PathBuf>, kind: ErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }

    /// 从 I/O 错误构造（权限问题单独归类）
    pub fn from_io(path: &Path, err: &std::io::Error, fallback: ErrorKind) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            _ => fallback,
        };
        Self::new(path, kind).with_detail(err.to_string())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.kind.label())?;
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

/// 汇总后的校验报告
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    pub fatal: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl ValidationReport {
    /// 合并任意多组问题列表，保持出现顺序
    pub fn merge<I, L>(lists: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = ValidationError>,
    {
        let mut report = Self::default();
        for list in lists {
            report.extend(list);
        }
        report
    }

    pub fn push(&mut self, error: ValidationError) {
        if error.is_fatal() {
            self.fatal.push(error);
        } else {
            self.warnings.push(error);
        }
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        for error in errors {
            self.push(error);
        }
    }

    pub fn has_fatal(&self) -> bool {
        !self.fatal.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fatal.is_empty() && self.warnings.is_empty()
    }
}
