//! # 数据模型模块
//!
//! 定义分子几何结构与 ORCA 计算结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `interpolate/`, `spectrum/` 和 `commands/` 使用
//! - 子模块: geometry, calculation

pub mod calculation;
pub mod geometry;

pub use calculation::{
    AbsorptionSpectrum, ActiveSpace, CcDiagnostic, McscfCorrelation, RunKind, RunResult,
    SpectrumUnit, ThermalCorrections,
};
pub use geometry::{Atom, Geometry};
