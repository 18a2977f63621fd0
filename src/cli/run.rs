//! # run 子命令 CLI 定义
//!
//! 通过 ORCA 运行脚本执行输入文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// ORCA input file
    pub input: PathBuf,

    /// ORCA runner executable
    #[arg(long, env = "ORCA_RUN")]
    pub orca_run: PathBuf,

    /// Number of parallel processes
    #[arg(short, long)]
    pub nprocs: Option<u32>,

    /// Memory per core in MB
    #[arg(short, long)]
    pub maxcore: Option<u32>,

    /// ORCA output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extra files copied along with the input (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub extra: Vec<PathBuf>,

    /// Working directory for the run
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// Print the command without running it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
