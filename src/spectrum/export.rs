//! # 光谱数据导出
//!
//! ## 支持格式
//! - CSV（跃迁）: energy, fosc
//! - CSV（展宽）: energy, intensity
//!
//! 表头中的能量列带单位，例如 `energy_eV`、`wavelength_nm`。
//!
//! ## 依赖关系
//! - 被 `commands/spectrum.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{OrcaToolsError, Result};
use crate::models::{AbsorptionSpectrum, SpectrumUnit};

use std::path::Path;

fn energy_header(unit: SpectrumUnit) -> String {
    match unit {
        SpectrumUnit::Wavelength => "wavelength_nm".to_string(),
        _ => format!("energy_{}", unit),
    }
}

/// 导出跃迁为 CSV（按能量升序）
pub fn transitions_to_csv(spectrum: &AbsorptionSpectrum, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([energy_header(spectrum.unit).as_str(), "fosc"])?;

    let mut transitions: Vec<(f64, f64)> = spectrum.transitions().collect();
    transitions.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (energy, fosc) in transitions {
        wtr.write_record(&[format!("{:.4}", energy), format!("{:.9}", fosc)])?;
    }

    wtr.flush().map_err(|e| OrcaToolsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出展宽曲线为 CSV
pub fn broadened_to_csv(data: &[(f64, f64)], unit: SpectrumUnit, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([energy_header(unit).as_str(), "intensity"])?;

    for (energy, intensity) in data {
        wtr.write_record(&[format!("{:.4}", energy), format!("{:.6}", intensity)])?;
    }

    wtr.flush().map_err(|e| OrcaToolsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_transitions_sorted_by_energy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sticks.csv");
        let spectrum = AbsorptionSpectrum {
            unit: SpectrumUnit::Wavelength,
            energies: vec![285.7, 192.3],
            oscillator_strengths: vec![0.003141593, 0.25],
        };

        transitions_to_csv(&spectrum, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "wavelength_nm,fosc");
        assert_eq!(lines[1], "192.3000,0.250000000");
        assert_eq!(lines[2], "285.7000,0.003141593");
    }

    #[test]
    fn test_broadened_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.csv");

        broadened_to_csv(&[(1.0, 0.5), (1.1, 0.25)], SpectrumUnit::ElectronVolt, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "energy_eV,intensity\n1.0000,0.500000\n1.1000,0.250000\n");
    }
}
