//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `parse`: 解析单个 ORCA 输出文件
//! - `interpolate`: 几何结构线性插值
//! - `input`: 生成 ORCA 输入文件
//! - `run`: 调用 ORCA 运行脚本
//! - `spectrum`: 吸收光谱提取与绘图
//! - `summary`: 批量汇总输出文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: parse, interpolate, input, run, spectrum, summary

pub mod input;
pub mod interpolate;
pub mod parse;
pub mod run;
pub mod spectrum;
pub mod summary;

use clap::{Parser, Subcommand};

/// orcatools - ORCA 输入生成、运行与结果提取
#[derive(Parser)]
#[command(name = "orcatools")]
#[command(author = "Gabriel L. S. Rodrigues")]
#[command(version)]
#[command(about = "Build ORCA inputs, run ORCA and extract results from its output", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract energy, geometry and properties from an ORCA output file
    Parse(parse::ParseArgs),

    /// Linearly interpolate between two geometries (PES scan)
    Interpolate(interpolate::InterpolateArgs),

    /// Write an ORCA input file
    Input(input::InputArgs),

    /// Run ORCA through its runner script
    Run(run::RunArgs),

    /// Extract, broaden and plot the UV/vis absorption spectrum
    Spectrum(spectrum::SpectrumArgs),

    /// Summarize all ORCA output files in a directory
    Summary(summary::SummaryArgs),
}
