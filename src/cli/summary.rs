//! # summary 子命令 CLI 定义
//!
//! 批量解析目录中的 ORCA 输出文件并汇总。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/summary.rs`

use clap::Args;
use std::path::PathBuf;

/// summary 子命令参数
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Directory containing ORCA output files
    pub dir: PathBuf,

    /// Glob pattern(s) for output files, comma-separated
    #[arg(short, long, default_value = "*.out")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Save the summary as CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
