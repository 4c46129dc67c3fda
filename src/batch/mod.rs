//! # 批量路径解析模块
//!
//! 把一个输入参数变成经过校验、顺序确定的（输入 → 输出）文件对，
//! 再逐对交给外部工具处理。所有命令共用。
//!
//! ## 流程
//! ```text
//! expand (filter + walker) → report → resolve (naming) → runner
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs` 使用
//! - 使用 `walkdir`, `glob` 枚举文件
//! - 使用 `rayon` 进行并行处理

pub mod expander;
pub mod filter;
pub mod naming;
pub mod report;
pub mod resolver;
pub mod runner;
pub mod walker;

pub use expander::{expand, ExpandOptions};
pub use filter::ExtensionSet;
pub use naming::{CollisionPolicy, NamingPolicy};
pub use report::{ErrorKind, ValidationError, ValidationReport};
pub use resolver::{resolve, OutputDefault, OutputMapping, OutputTarget, ResolveOptions};
pub use runner::{BatchResult, BatchRunner, PairOutcome, ProcessResult};
