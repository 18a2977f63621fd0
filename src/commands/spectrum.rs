//! # spectrum 子命令实现
//!
//! 从激发态计算的输出中提取吸收光谱，可选展宽，导出 CSV 或绘制 PNG/SVG。
//!
//! ## 依赖关系
//! - 使用 `cli/spectrum.rs` 定义的参数
//! - 使用 `parsers/orca_out.rs`, `spectrum/`

use crate::cli::spectrum::{SpectrumArgs, SpectrumOutputFormat};
use crate::error::{OrcaToolsError, Result};
use crate::models::{AbsorptionSpectrum, SpectrumUnit};
use crate::parsers::orca_out;
use crate::spectrum::{self, plot::PlotOptions};
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 每种单位的默认 (FWHM, 网格步长)
fn default_broadening(unit: SpectrumUnit) -> (f64, f64) {
    match unit {
        SpectrumUnit::Wavenumber => (2000.0, 10.0),
        SpectrumUnit::Wavelength => (10.0, 0.1),
        SpectrumUnit::ElectronVolt => (0.25, 0.002),
    }
}

/// 执行 spectrum
pub fn execute(args: SpectrumArgs) -> Result<()> {
    output::print_header("UV/vis Absorption Spectrum");

    if !args.log.is_file() {
        return Err(OrcaToolsError::FileNotFound {
            path: args.log.display().to_string(),
        });
    }

    let unit = SpectrumUnit::from(args.unit);
    let run = orca_out::load_run(&args.log)?;
    let absorption = run.absorption_spectrum(unit)?;
    output::print_success(&format!("Found {} transitions", absorption.len()));
    print_transition_table(&absorption, 15);

    let curve = match args.broadening.line_shape() {
        Some(shape) => {
            let (default_fwhm, default_step) = default_broadening(unit);
            let fwhm = args.fwhm.unwrap_or(default_fwhm);
            let step = args.step.unwrap_or(default_step);
            output::print_info(&format!(
                "Applying {} broadening (FWHM = {} {})",
                shape, fwhm, unit
            ));
            Some(spectrum::apply_broadening(&absorption, shape, fwhm, step)?)
        }
        None => None,
    };

    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));

    match format {
        SpectrumOutputFormat::Csv => match &curve {
            Some(data) => spectrum::export::broadened_to_csv(data, unit, &args.output)?,
            None => spectrum::export::transitions_to_csv(&absorption, &args.output)?,
        },
        SpectrumOutputFormat::Png | SpectrumOutputFormat::Svg => {
            let title = args.title.clone().unwrap_or_else(|| {
                args.log
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("spectrum")
                    .to_string()
            });
            let options = PlotOptions {
                title,
                width: args.width,
                height: args.height,
                use_svg: format == SpectrumOutputFormat::Svg,
            };
            spectrum::plot::generate_spectrum_plot(
                &absorption,
                curve.as_deref(),
                &args.output,
                &options,
            )?;
        }
    }

    output::print_written("Spectrum", &args.output);
    Ok(())
}

/// 从文件扩展名推断输出格式
fn guess_format_from_extension(path: &Path) -> SpectrumOutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("csv") => SpectrumOutputFormat::Csv,
        Some("svg") => SpectrumOutputFormat::Svg,
        _ => SpectrumOutputFormat::Png,
    }
}

/// 打印最强的跃迁
fn print_transition_table(spectrum: &AbsorptionSpectrum, count: usize) {
    #[derive(Tabled)]
    struct TransitionRow {
        #[tabled(rename = "State")]
        state: usize,
        #[tabled(rename = "Energy")]
        energy: String,
        #[tabled(rename = "fosc")]
        fosc: String,
    }

    let mut rows: Vec<(usize, f64, f64)> = spectrum
        .transitions()
        .enumerate()
        .map(|(i, (e, f))| (i + 1, e, f))
        .collect();
    rows.sort_by(|a, b| b.2.total_cmp(&a.2));

    let rows: Vec<TransitionRow> = rows
        .into_iter()
        .take(count)
        .map(|(state, energy, fosc)| TransitionRow {
            state,
            energy: format!("{:.4} {}", energy, spectrum.unit),
            fosc: format!("{:.6}", fosc),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Strongest {} Transitions", rows.len()));
        println!("{}", Table::new(&rows));
    }
}
