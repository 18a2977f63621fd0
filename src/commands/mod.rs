//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `models/`, `interpolate/`, `spectrum/`, `batch/`, `utils/`
//! - 子模块: parse, interpolate, input, run, spectrum, summary

pub mod input;
pub mod interpolate;
pub mod parse;
pub mod run;
pub mod spectrum;
pub mod summary;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Parse(args) => parse::execute(args),
        Commands::Interpolate(args) => interpolate::execute(args),
        Commands::Input(args) => input::execute(args),
        Commands::Run(args) => run::execute(args),
        Commands::Spectrum(args) => spectrum::execute(args),
        Commands::Summary(args) => summary::execute(args),
    }
}
