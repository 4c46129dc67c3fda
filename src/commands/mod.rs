//! # 命令执行模块
//!
//! 每个处理命令只声明自己的“操作定义”：用哪个外部工具、接受哪些扩展名、
//! 默认命名规则、以及单个文件的参数怎么拼。其余流程统一由
//! `pipeline.rs` 完成。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `tools/`, `utils/`
//! - 子模块: pipeline, image, video, audio

pub mod audio;
pub mod image;
pub mod pipeline;
pub mod video;

use crate::batch::{ExtensionSet, NamingPolicy};
use crate::cli::common::BatchArgs;
use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::tools::{ExternalTool, ToolKind};

use std::ffi::OsString;
use std::path::Path;

/// 单个处理命令的声明
pub trait Operation: Sync {
    /// 标题栏文字
    fn title(&self) -> String;

    /// 使用的外部工具
    fn tool(&self) -> ToolKind;

    /// 接受的输入扩展名
    fn extensions(&self) -> ExtensionSet;

    /// 默认命名规则（后缀 / 新扩展名），结构保留与冲突策略由批处理参数决定
    fn naming(&self) -> NamingPolicy;

    /// 单个文件的工具参数
    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString>;

    /// 批处理参数
    fn batch(&self) -> &BatchArgs;
}

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let tools = cli.tools;
    match cli.command {
        Commands::Image(args) => {
            let op = image::operation(args.command);
            let tool = ExternalTool::from_args(op.tool(), &tools);
            pipeline::execute(op.as_ref(), &tool)
        }
        Commands::Video(args) => {
            let op = video::operation(args.command);
            let tool = ExternalTool::from_args(op.tool(), &tools);
            pipeline::execute(op.as_ref(), &tool)
        }
        Commands::Audio(args) => {
            let op = audio::operation(args.command);
            let tool = ExternalTool::from_args(op.tool(), &tools);
            pipeline::execute(op.as_ref(), &tool)
        }
    }
}
