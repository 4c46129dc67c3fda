//! # mediakit - 批量图像 / 音视频处理工具
//!
//! 每次调用执行一个操作（缩放、裁剪、转换……），实际处理交给
//! ImageMagick 与 FFmpeg。本程序负责把一个输入参数变成确定的
//! （输入 → 输出）文件对，并逐对调用外部工具。
//!
//! ## 子命令
//! - `image` - 图像处理 (resize, convert, compress, rotate, grayscale)
//! - `video` - 视频处理 (trim, convert, compress, scale, mute)
//! - `audio` - 音频处理 (convert, trim, normalize, extract)
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/  (路径展开、输出解析、批量执行)
//!   │     └── tools/  (外部工具调用)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod tools;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
