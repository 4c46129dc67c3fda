//! # 统一错误处理模块
//!
//! 定义 mediakit 的命令级错误类型，使用 `thiserror` 派生。
//!
//! 注意：单个路径的校验问题不走这里，而是收集为
//! `batch::report::ValidationError` 列表，一次性报告。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// mediakit 统一错误类型
#[derive(Error, Debug)]
pub enum MediakitError {
    // ─────────────────────────────────────────────────────────────
    // 外部工具错误
    // ─────────────────────────────────────────────────────────────
    #[error("External tool '{tool}' is not available (tried '{binary}')")]
    ToolUnavailable { tool: String, binary: String },

    #[error("External tool failed: {command}\n{stderr}")]
    ToolFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 批处理错误
    // ─────────────────────────────────────────────────────────────
    #[error("Validation failed with {fatal} error(s); no file was processed")]
    ValidationFailed { fatal: usize },

    #[error("All {failed} file(s) failed to process")]
    BatchFailed { failed: usize },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MediakitError>;
