//! # 吸收光谱图表生成
//!
//! 使用 `plotters` 库绘制跃迁棒状图或展宽曲线（叠加跃迁棒）。
//! 支持 PNG 和 SVG 输出。
//!
//! ## 依赖关系
//! - 被 `commands/spectrum.rs` 调用
//! - 使用 `models/calculation.rs` 的 AbsorptionSpectrum
//! - 使用 `plotters` 渲染图表

use crate::error::{OrcaToolsError, Result};
use crate::models::AbsorptionSpectrum;

use plotters::prelude::*;
use std::path::Path;

/// 图表尺寸与标题
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

/// 生成吸收光谱图；`curve` 为 `None` 时只画跃迁棒
pub fn generate_spectrum_plot(
    spectrum: &AbsorptionSpectrum,
    curve: Option<&[(f64, f64)]>,
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_spectrum_chart(&root, spectrum, curve, &options.title)?;
        root.present()
            .map_err(|e| OrcaToolsError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_spectrum_chart(&root, spectrum, curve, &options.title)?;
        root.present()
            .map_err(|e| OrcaToolsError::Other(e.to_string()))?;
    }
    Ok(())
}

/// x 轴范围：展宽曲线的网格，或跃迁能量两侧各留 5%
fn x_range(spectrum: &AbsorptionSpectrum, curve: Option<&[(f64, f64)]>) -> (f64, f64) {
    if let Some(data) = curve {
        if let (Some(first), Some(last)) = (data.first(), data.last()) {
            return (first.0, last.0);
        }
    }

    let min = spectrum.energies.iter().copied().fold(f64::INFINITY, f64::min);
    let max = spectrum
        .energies
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let pad = ((max - min) * 0.05).max(max.abs() * 0.05).max(1e-3);
    ((min - pad).max(0.0), max + pad)
}

/// 绘制图表的核心逻辑
fn draw_spectrum_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spectrum: &AbsorptionSpectrum,
    curve: Option<&[(f64, f64)]>,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| OrcaToolsError::Other(format!("{:?}", e)))?;

    let (x_min, x_max) = x_range(spectrum, curve);
    let y_max = spectrum
        .oscillator_strengths
        .iter()
        .copied()
        .fold(0.0_f64, f64::max)
        .max(1e-6)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| OrcaToolsError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc(spectrum.unit.axis_label())
        .y_desc("Oscillator Strength")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| OrcaToolsError::Other(format!("{:?}", e)))?;

    if let Some(data) = curve {
        let line_color = RGBColor(0, 102, 204);
        chart
            .draw_series(AreaSeries::new(
                data.iter().map(|(x, y)| (*x, *y)),
                0.0,
                line_color.mix(0.2),
            ))
            .map_err(|e| OrcaToolsError::Other(format!("{:?}", e)))?;
        chart
            .draw_series(LineSeries::new(
                data.iter().map(|(x, y)| (*x, *y)),
                line_color.stroke_width(2),
            ))
            .map_err(|e| OrcaToolsError::Other(format!("{:?}", e)))?;
    }

    let stick_color = RGBColor(204, 51, 0);
    for (energy, fosc) in spectrum.transitions() {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(energy, 0.0), (energy, fosc)],
                stick_color.stroke_width(2),
            )))
            .map_err(|e| OrcaToolsError::Other(format!("{:?}", e)))?;
    }

    Ok(())
}
