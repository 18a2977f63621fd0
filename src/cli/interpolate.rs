//! # interpolate 子命令 CLI 定义
//!
//! 在两个几何结构之间线性插值，生成势能面扫描的结构序列。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/interpolate.rs`

use clap::Args;
use std::path::PathBuf;

/// interpolate 子命令参数
#[derive(Args, Debug)]
pub struct InterpolateArgs {
    /// First geometry: .xyz file or inline "label x y z" lines
    pub first: String,

    /// Second geometry: .xyz file or inline "label x y z" lines
    pub second: String,

    /// Number of points, endpoints included
    #[arg(short = 'n', long, default_value_t = 10)]
    pub points: usize,

    /// Directory for the numbered .xyz files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// File name prefix for the numbered .xyz files
    #[arg(short, long, default_value = "pes")]
    pub prefix: String,

    /// Write a single multi-frame trajectory file instead
    #[arg(short, long)]
    pub trajectory: Option<PathBuf>,
}
