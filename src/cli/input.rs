//! # input 子命令 CLI 定义
//!
//! 生成 ORCA 输入文件 (.inp)。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/input.rs`

use clap::Args;
use std::path::PathBuf;

/// input 子命令参数
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Geometry: .xyz file or inline "label x y z" lines
    #[arg(long)]
    pub xyz: String,

    /// Simple input keywords (e.g. "B3LYP def2-SVP Opt") or a file containing them
    #[arg(short, long)]
    pub keywords: String,

    /// Block input (e.g. "%pal nprocs 4 end") or a file containing it
    #[arg(short, long, default_value = "")]
    pub blocks: String,

    /// Total charge
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    pub charge: i32,

    /// Spin multiplicity
    #[arg(short, long, default_value_t = 1)]
    pub mult: u32,

    /// Initial guess orbitals (.gbw), adds !MORead
    #[arg(short, long)]
    pub guess: Option<PathBuf>,

    /// Output input file
    #[arg(short, long, default_value = "orca.inp")]
    pub output: PathBuf,
}
