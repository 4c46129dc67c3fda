//! # 运行报告导出
//!
//! 把每一对输入输出的处理结果写成 CSV，按输入顺序排列。
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs` 调用
//! - 使用 `batch/runner.rs` 的 BatchResult
//! - 使用 `csv` + `serde` 写入

use crate::batch::BatchResult;
use crate::error::{MediakitError, Result};

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    input: String,
    output: String,
    status: &'a str,
    message: &'a str,
}

/// 导出批处理结果
pub fn write_report(result: &BatchResult, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for outcome in &result.outcomes {
        wtr.serialize(ReportRow {
            input: outcome.input.display().to_string(),
            output: outcome.output.display().to_string(),
            status: outcome.result.status(),
            message: outcome.result.message(),
        })?;
    }

    wtr.flush().map_err(|e| MediakitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
