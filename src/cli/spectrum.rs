//! # spectrum 子命令 CLI 定义
//!
//! 提取 UV/vis 吸收光谱，可选展宽，导出为 CSV 或绘图。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/spectrum.rs`

use crate::models::SpectrumUnit;
use crate::spectrum::LineShape;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 激发能单位
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitArg {
    /// Wavenumber (cm⁻¹)
    Cm,
    /// Wavelength (nm)
    Nm,
    /// Electron volt
    Ev,
}

impl From<UnitArg> for SpectrumUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Cm => SpectrumUnit::Wavenumber,
            UnitArg::Nm => SpectrumUnit::Wavelength,
            UnitArg::Ev => SpectrumUnit::ElectronVolt,
        }
    }
}

/// 展宽类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum BroadeningType {
    /// No broadening (stick spectrum)
    #[default]
    None,
    /// Gaussian broadening
    Gaussian,
    /// Lorentzian broadening
    Lorentzian,
}

impl BroadeningType {
    pub fn line_shape(self) -> Option<LineShape> {
        match self {
            BroadeningType::None => None,
            BroadeningType::Gaussian => Some(LineShape::Gaussian),
            BroadeningType::Lorentzian => Some(LineShape::Lorentzian),
        }
    }
}

/// 光谱输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SpectrumOutputFormat {
    /// CSV data file
    Csv,
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

/// spectrum 子命令参数
#[derive(Args, Debug)]
pub struct SpectrumArgs {
    /// ORCA output file of an excited state calculation
    pub log: PathBuf,

    /// Energy unit
    #[arg(short, long, value_enum, default_value = "ev")]
    pub unit: UnitArg,

    /// Peak broadening type
    #[arg(long, value_enum, default_value = "none")]
    pub broadening: BroadeningType,

    /// Full width at half maximum, in the selected unit (default depends on unit)
    #[arg(long)]
    pub fwhm: Option<f64>,

    /// Grid step for the broadened curve, in the selected unit (default depends on unit)
    #[arg(long)]
    pub step: Option<f64>,

    /// Output file (.csv, .png or .svg)
    #[arg(short, long, default_value = "spectrum.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<SpectrumOutputFormat>,

    /// Plot title (default: log file name)
    #[arg(long)]
    pub title: Option<String>,

    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
