//! # orcatools - ORCA 量子化学程序辅助工具
//!
//! 生成 ORCA 输入、调用运行脚本、从输出文件提取结果，并在几何结构之间插值。
//!
//! ## 子命令
//! - `parse`       - 提取最终能量、结构、运行时间及附加性质
//! - `interpolate` - 两个几何结构之间的线性插值
//! - `input`       - 生成 .inp 输入文件
//! - `run`         - 通过 orca_run 执行计算
//! - `spectrum`    - 吸收光谱提取、展宽与绘图
//! - `summary`     - 批量汇总目录中的输出文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/          (命令行参数定义)
//!   ├── commands/     (命令执行逻辑)
//!   │     ├── parsers/      (ORCA 输出/输入, XYZ)
//!   │     ├── interpolate/  (几何插值)
//!   │     ├── spectrum/     (光谱展宽与绘图)
//!   │     ├── batch/        (并行批处理)
//!   │     └── models/       (数据模型)
//!   ├── utils/        (输出、进度条、ORCA 调用)
//!   └── error.rs      (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod interpolate;
mod models;
mod parsers;
mod spectrum;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
