//! # 跃迁线型展宽
//!
//! 将离散跃迁 (能量, 振子强度) 展宽为规则网格上的连续曲线。
//!
//! - Gaussian: `f * exp(-Δ² / 2σ²)`, `σ = FWHM / (2√(2 ln 2))`
//! - Lorentzian: `f * γ² / (Δ² + γ²)`, `γ = FWHM / 2`
//!
//! 网格覆盖 `[E_min - 5·FWHM, E_max + 5·FWHM]`（下限不小于 0），
//! 结果缩放到最大值等于最强振子强度。

use crate::error::{OrcaToolsError, Result};
use crate::models::AbsorptionSpectrum;

/// 网格两端相对于最外侧跃迁的延伸（FWHM 的倍数）
const GRID_PADDING: f64 = 5.0;

/// 展宽网格点数上限
const MAX_GRID_POINTS: f64 = 1_000_000.0;

/// 展宽线型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    Gaussian,
    Lorentzian,
}

impl std::fmt::Display for LineShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineShape::Gaussian => write!(f, "gaussian"),
            LineShape::Lorentzian => write!(f, "lorentzian"),
        }
    }
}

/// 应用展宽，返回 (能量, 强度) 网格
pub fn apply_broadening(
    spectrum: &AbsorptionSpectrum,
    shape: LineShape,
    fwhm: f64,
    step: f64,
) -> Result<Vec<(f64, f64)>> {
    if !(fwhm > 0.0) {
        return Err(OrcaToolsError::InvalidArgument(format!(
            "FWHM must be positive, got {}",
            fwhm
        )));
    }
    if !(step > 0.0) {
        return Err(OrcaToolsError::InvalidArgument(format!(
            "Grid step must be positive, got {}",
            step
        )));
    }
    if spectrum.is_empty() {
        return Err(OrcaToolsError::InvalidArgument(
            "Spectrum has no transitions to broaden".to_string(),
        ));
    }

    let e_min = spectrum.energies.iter().copied().fold(f64::INFINITY, f64::min);
    let e_max = spectrum
        .energies
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let start = (e_min - GRID_PADDING * fwhm).max(0.0);
    let end = e_max + GRID_PADDING * fwhm;

    let intervals = ((end - start) / step).ceil();
    if intervals + 1.0 > MAX_GRID_POINTS {
        return Err(OrcaToolsError::InvalidArgument(format!(
            "Step {} gives {} grid points over {:.4}..{:.4}; the limit is {}",
            step,
            intervals + 1.0,
            start,
            end,
            MAX_GRID_POINTS
        )));
    }
    let n_points = intervals as usize + 1;
    let mut curve: Vec<(f64, f64)> = (0..n_points)
        .map(|i| (start + i as f64 * step, 0.0))
        .collect();

    let sigma = fwhm / (2.0 * (2.0 * 2.0_f64.ln()).sqrt());
    let gamma = fwhm / 2.0;

    for (center, strength) in spectrum.transitions() {
        for (energy, intensity) in curve.iter_mut() {
            let delta = *energy - center;
            *intensity += match shape {
                LineShape::Gaussian => strength * (-delta * delta / (2.0 * sigma * sigma)).exp(),
                LineShape::Lorentzian => strength * gamma * gamma / (delta * delta + gamma * gamma),
            };
        }
    }

    let max_strength = spectrum
        .oscillator_strengths
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    let max_intensity = curve.iter().map(|(_, i)| *i).fold(0.0_f64, f64::max);
    if max_intensity > 0.0 {
        for (_, intensity) in curve.iter_mut() {
            *intensity = *intensity * max_strength / max_intensity;
        }
    }

    Ok(curve)
}
