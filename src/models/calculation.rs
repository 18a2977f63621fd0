//! # ORCA 计算结果数据模型
//!
//! `RunResult` 保存从 ORCA 输出文件一次性提取的字段；其余派生性质
//! （热化学、CC 诊断、吸收光谱等）按需从日志重新扫描得到，见
//! `parsers/orca_out.rs`。
//!
//! ## 依赖关系
//! - 被 `parsers/orca_out.rs` 填充
//! - 被 `commands/`, `spectrum/` 使用

use super::Geometry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 计算类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunKind {
    SinglePoint,
    Optimization,
}

impl std::fmt::Display for RunKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunKind::SinglePoint => write!(f, "Single Point Energy"),
            RunKind::Optimization => write!(f, "Geometry Optimization"),
        }
    }
}

/// 单个 ORCA 输出文件的提取结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// 输出文件路径（派生性质从这里重新读取）
    pub path: PathBuf,

    /// 是否正常结束
    pub terminated_normally: bool,

    /// 计算类型
    pub run_kind: RunKind,

    /// 最终单点能 (Hartree)
    pub scf_energy: f64,

    /// 最终几何结构
    pub final_geometry: Geometry,

    /// 总运行时间 (s)，日志未打印 `TOTAL RUN TIME` 时为 `None`
    pub runtime_seconds: Option<f64>,
}

impl RunResult {
    pub fn is_optimization(&self) -> bool {
        self.run_kind == RunKind::Optimization
    }
}

/// 热化学校正 (Hartree)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalCorrections {
    /// 零点能
    pub zpe: f64,
    /// 内能校正
    pub u: f64,
    /// 焓校正 (U + kT)
    pub h: f64,
    /// 熵项 T*S
    pub s: f64,
    /// Gibbs 自由能校正 G - E(el)
    pub g: f64,
}

/// 耦合簇诊断
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CcDiagnostic {
    /// 相关能
    pub corr: f64,
    /// T1 诊断
    pub t1: f64,
    /// E(CCSD)
    pub ccsd: f64,
    /// E(CCSD(T))，仅在计算了三重激发时存在
    pub ccsdt: Option<f64>,
}

/// 多参考相关能
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McscfCorrelation {
    /// 最终 CASSCF 能量
    pub casscf: f64,
    /// 最终单点能 - CASSCF 能量
    pub corr: f64,
    /// MRCI 能量（即最终单点能）
    pub mrci: Option<f64>,
    /// 各根的 Davidson 校正
    pub mrci_davidson: Vec<f64>,
    /// 各根的 MR-MP2 能量
    pub mrci_mp2: Vec<f64>,
}

/// 激发能单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectrumUnit {
    /// 波数 cm⁻¹
    Wavenumber,
    /// 波长 nm
    Wavelength,
    /// 电子伏特 eV
    ElectronVolt,
}

impl SpectrumUnit {
    /// 坐标轴标签
    pub fn axis_label(&self) -> &'static str {
        match self {
            SpectrumUnit::Wavenumber => "Energy (cm⁻¹)",
            SpectrumUnit::Wavelength => "Wavelength (nm)",
            SpectrumUnit::ElectronVolt => "Energy (eV)",
        }
    }
}

impl std::fmt::Display for SpectrumUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectrumUnit::Wavenumber => write!(f, "cm-1"),
            SpectrumUnit::Wavelength => write!(f, "nm"),
            SpectrumUnit::ElectronVolt => write!(f, "eV"),
        }
    }
}

/// UV/vis 吸收光谱（平行数组）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsorptionSpectrum {
    pub unit: SpectrumUnit,
    /// 激发能（单位见 `unit`）
    pub energies: Vec<f64>,
    /// 振子强度
    pub oscillator_strengths: Vec<f64>,
}

impl AbsorptionSpectrum {
    /// 跃迁数
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// (能量, 振子强度) 迭代
    pub fn transitions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies
            .iter()
            .copied()
            .zip(self.oscillator_strengths.iter().copied())
    }
}

/// CASSCF 活性空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSpace {
    /// 活性电子数
    pub electrons: usize,
    /// 活性轨道数
    pub orbitals: usize,
    /// 第一个活性轨道编号（含）
    pub first_orbital: usize,
    /// 最后一个活性轨道编号（含）
    pub last_orbital: usize,
}

impl ActiveSpace {
    /// 轨道编号是否在活性空间内
    pub fn contains(&self, orbital: usize) -> bool {
        (self.first_orbital..=self.last_orbital).contains(&orbital)
    }
}
