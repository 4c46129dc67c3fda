//! # 批量执行器
//!
//! 按输出映射逐对调用外部工具。
//!
//! ## 功能
//! - 基于 rayon 的线程池，`jobs = 1` 时严格顺序执行
//! - 单个文件失败只记录，不影响其余文件；失败列表由调用方在汇总时打印
//! - 结果按输入顺序汇总，与调度顺序无关
//! - 进度条显示
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行处理

use super::resolver::OutputMapping;
use crate::error::{MediakitError, Result};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如文件已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

impl ProcessResult {
    pub fn status(&self) -> &'static str {
        match self {
            ProcessResult::Success(_) => "success",
            ProcessResult::Skipped(_) => "skipped",
            ProcessResult::Failed(_, _) => "failed",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ProcessResult::Success(msg) | ProcessResult::Skipped(msg) => msg,
            ProcessResult::Failed(_, err) => err,
        }
    }
}

/// 一对输入输出及其结果
#[derive(Debug, Clone)]
pub struct PairOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: ProcessResult,
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
    /// 按输入顺序的逐项结果
    pub outcomes: Vec<PairOutcome>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, outcome: PairOutcome) {
        match &outcome.result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path.clone(), err.clone()));
            }
        }
        self.outcomes.push(outcome);
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }

    /// 有文件参与且全部失败
    pub fn all_failed(&self) -> bool {
        self.failed > 0 && self.failed == self.total()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs = 0` 表示按 CPU 数
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 处理映射中的每一对文件
    pub fn run<F>(&self, mapping: &OutputMapping, processor: F) -> Result<BatchResult>
    where
        F: Fn(&Path, &Path) -> ProcessResult + Sync + Send,
    {
        let total = mapping.len();
        let pb = progress::create_progress_bar(total as u64, "Processing");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| MediakitError::ThreadPool(e.to_string()))?;

        let outcomes: Vec<PairOutcome> = pool.install(|| {
            mapping
                .pairs()
                .par_iter()
                .map(|(input, output)| {
                    let result = processor(input, output);
                    pb.inc(1);
                    PairOutcome {
                        input: input.clone(),
                        output: output.clone(),
                        result,
                    }
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for outcome in outcomes {
            batch_result.merge(outcome);
        }

        Ok(batch_result)
    }
}
