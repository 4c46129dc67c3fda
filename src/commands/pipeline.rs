//! # 批处理流程
//!
//! 所有处理命令共用的执行流程：
//!
//! ```text
//! 工具探测 → 展开输入 → 校验 → 解析输出 → {逐文件处理 | dry-run 打印}
//! ```
//!
//! 校验阶段出现任何致命错误时，全部打印后退出，不处理任何文件。
//! 逐文件处理阶段单个失败只计数，不影响其余文件。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 调用
//! - 使用 `batch/` 完成展开、解析、执行
//! - 使用 `utils/output.rs`, `utils/export.rs`
//! - 使用 `tabled` 打印 dry-run 映射表

use super::Operation;
use crate::batch::{
    expand, resolve, BatchResult, BatchRunner, ExpandOptions, NamingPolicy,
    OutputMapping, OutputTarget, ProcessResult, ResolveOptions, ValidationReport,
};
use crate::error::{MediakitError, Result};
use crate::tools::ExternalTool;
use crate::utils::{export, output};

use std::path::Path;
use tabled::{Table, Tabled};

/// 处理前的准备结果
#[derive(Debug, Default)]
pub struct Plan {
    /// 有致命错误时为空
    pub mapping: OutputMapping,
    pub report: ValidationReport,
}

/// 展开输入并解析输出，不触碰任何输入文件
pub fn plan(
    specifier: &str,
    expand_options: &ExpandOptions,
    target: Option<&str>,
    policy: &NamingPolicy,
    resolve_options: &ResolveOptions,
) -> Plan {
    let expansion = expand(specifier, expand_options);
    if expansion.has_fatal() {
        return Plan {
            mapping: OutputMapping::default(),
            report: ValidationReport::merge([expansion.errors]),
        };
    }

    let target = target.map(OutputTarget::classify);
    let resolution = resolve(&expansion.files, target.as_ref(), policy, resolve_options);

    let report = ValidationReport::merge([expansion.errors, resolution.errors]);
    let mapping = if report.has_fatal() {
        OutputMapping::default()
    } else {
        resolution.mapping
    };

    Plan { mapping, report }
}

/// 执行一个处理命令
pub fn execute(op: &dyn Operation, tool: &ExternalTool) -> Result<()> {
    let batch = op.batch();
    output::print_header(&op.title());

    if !batch.dry_run {
        if let Err(unavailable) = tool.check() {
            let report = ValidationReport::merge([vec![unavailable]]);
            print_report(&report);
            return Err(MediakitError::ValidationFailed {
                fatal: report.fatal.len(),
            });
        }
    }

    let expand_options = ExpandOptions {
        allowed: op.extensions(),
        recursive: batch.recursive,
    };
    let policy = batch.naming(op.naming());
    let plan = plan(
        &batch.input,
        &expand_options,
        batch.output.as_deref(),
        &policy,
        &batch.resolve_options(),
    );

    print_report(&plan.report);
    if plan.report.has_fatal() {
        return Err(MediakitError::ValidationFailed {
            fatal: plan.report.fatal.len(),
        });
    }

    if plan.mapping.is_empty() {
        output::print_warning("No input files to process");
        return Ok(());
    }

    output::print_info(&format!("Resolved {} file(s)", plan.mapping.len()));

    if batch.dry_run {
        print_dry_run(&plan.mapping);
        output::print_done("Dry run, nothing was processed");
        return Ok(());
    }

    if batch.verbose {
        for (input, out) in plan.mapping.iter() {
            output::print_info(&tool.command_line(&op.build_args(input, out)));
        }
    }

    let runner = BatchRunner::new(batch.jobs);
    let result = runner.run(&plan.mapping, |input, out| {
        process_pair(op, tool, input, out, batch.overwrite)
    })?;

    print_summary(&result, batch.verbose);

    if let Some(report_path) = &batch.report {
        export::write_report(&result, report_path)?;
        output::print_info(&format!("Report written to '{}'", report_path.display()));
    }

    if result.all_failed() {
        return Err(MediakitError::BatchFailed {
            failed: result.failed,
        });
    }

    Ok(())
}

/// 处理一对文件
fn process_pair(
    op: &dyn Operation,
    tool: &ExternalTool,
    input: &Path,
    out: &Path,
    overwrite: bool,
) -> ProcessResult {
    if out.exists() && !overwrite {
        return ProcessResult::Skipped(format!("Output exists, skipping: {}", out.display()));
    }

    let args = op.build_args(input, out);
    match tool.run(&args) {
        Ok(()) => ProcessResult::Success(format!("{} -> {}", input.display(), out.display())),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 打印校验报告：先警告，后致命错误
fn print_report(report: &ValidationReport) {
    for warning in &report.warnings {
        output::print_warning(&warning.to_string());
    }
    for fatal in &report.fatal {
        output::print_error(&fatal.to_string());
    }
}

#[derive(Tabled)]
struct MappingRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Input")]
    input: String,
    #[tabled(rename = "Output")]
    output: String,
}

fn print_dry_run(mapping: &OutputMapping) {
    let rows: Vec<MappingRow> = mapping
        .iter()
        .enumerate()
        .map(|(i, (input, out))| MappingRow {
            index: i + 1,
            input: input.display().to_string(),
            output: out.display().to_string(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

fn print_summary(result: &BatchResult, verbose: bool) {
    output::print_separator();

    if verbose {
        for outcome in &result.outcomes {
            match &outcome.result {
                ProcessResult::Success(_) => output::print_mapping(
                    &outcome.input.display().to_string(),
                    &outcome.output.display().to_string(),
                ),
                ProcessResult::Skipped(msg) => output::print_skip(msg),
                ProcessResult::Failed(_, _) => {}
            }
        }
    }

    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }
}
