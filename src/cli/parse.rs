//! # parse 子命令 CLI 定义
//!
//! 读取单个 ORCA 输出文件并打印结果，可选提取附加性质。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/parse.rs`

use clap::Args;
use std::path::PathBuf;

/// parse 子命令参数
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// ORCA output file
    pub log: PathBuf,

    /// Thermochemistry corrections (frequency calculations)
    #[arg(long, default_value_t = false)]
    pub thermo: bool,

    /// Extrapolated CBS correlation energy
    #[arg(long, default_value_t = false)]
    pub cbs: bool,

    /// Fractional occupation density number N_FOD
    #[arg(long, default_value_t = false)]
    pub fod: bool,

    /// Coupled cluster energies and T1 diagnostic
    #[arg(long, default_value_t = false)]
    pub cc: bool,

    /// Read the CC block after the basis set extrapolation (with --cc)
    #[arg(long, default_value_t = false, requires = "cc")]
    pub extrapolated: bool,

    /// CASSCF energy and correlation energy
    #[arg(long, default_value_t = false)]
    pub mcscf: bool,

    /// Also read MRCI Davidson corrections and MR-MP2 energies (with --mcscf)
    #[arg(long, default_value_t = false, requires = "mcscf")]
    pub mrci: bool,

    /// CASSCF active space
    #[arg(long, default_value_t = false)]
    pub active_space: bool,

    /// CASSCF natural orbital occupation numbers of the active space
    #[arg(long, default_value_t = false)]
    pub occupations: bool,

    /// Save the final geometry to an .xyz file
    #[arg(long)]
    pub save_xyz: Option<PathBuf>,
}
