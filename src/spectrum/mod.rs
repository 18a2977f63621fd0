//! # 吸收光谱后处理模块
//!
//! 对 `AbsorptionSpectrum` 的跃迁进行线型展宽、导出和绘图。
//!
//! ## 子模块
//! - `broadening`: Gaussian / Lorentzian 展宽
//! - `export`: CSV 导出
//! - `plot`: PNG / SVG 图表
//!
//! ## 依赖关系
//! - 被 `commands/spectrum.rs` 使用
//! - 使用 `models/calculation.rs` 的 AbsorptionSpectrum

pub mod broadening;
pub mod export;
pub mod plot;

pub use broadening::{apply_broadening, LineShape};
