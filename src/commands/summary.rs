//! # summary 子命令实现
//!
//! 并行解析目录中的所有 ORCA 输出文件，打印汇总表并可选保存 CSV。
//! 未正常结束或缺少必需标记的文件列为失败，不影响其他文件。
//!
//! ## 依赖关系
//! - 使用 `cli/summary.rs` 定义的参数
//! - 使用 `batch/` 收集和并行处理文件
//! - 使用 `parsers/orca_out.rs`
//! - 使用 `csv` + `serde` 写出汇总

use crate::batch::{BatchRunner, FileCollector};
use crate::cli::summary::SummaryArgs;
use crate::error::{OrcaToolsError, Result};
use crate::models::RunResult;
use crate::parsers::orca_out;
use crate::utils::output;

use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Calculation")]
    calculation: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "Energy (Eh)")]
    energy: String,
    #[tabled(rename = "Run time (s)")]
    runtime: String,
}

/// CSV 记录
#[derive(Debug, Clone, Serialize)]
struct SummaryRecord {
    file: String,
    calculation: String,
    formula: String,
    atoms: usize,
    energy_eh: f64,
    runtime_s: Option<f64>,
}

impl From<&RunResult> for SummaryRecord {
    fn from(run: &RunResult) -> Self {
        SummaryRecord {
            file: run.path.display().to_string(),
            calculation: run.run_kind.to_string(),
            formula: run.final_geometry.formula(),
            atoms: run.final_geometry.len(),
            energy_eh: run.scf_energy,
            runtime_s: run.runtime_seconds,
        }
    }
}

/// 执行 summary
pub fn execute(args: SummaryArgs) -> Result<()> {
    output::print_header("ORCA Output Summary");

    let files = FileCollector::new(args.dir.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No files matching '{}' in '{}'",
            args.pattern,
            args.dir.display()
        ));
        return Ok(());
    }

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!(
        "Parsing {} files with {} jobs",
        files.len(),
        runner.jobs()
    ));

    let result = runner.run(files, orca_out::load_run)?;

    if !result.succeeded.is_empty() {
        let rows: Vec<SummaryRow> = result
            .succeeded
            .iter()
            .map(|run| SummaryRow {
                file: run
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                calculation: run.run_kind.to_string(),
                formula: run.final_geometry.formula(),
                energy: format!("{:.9}", run.scf_energy),
                runtime: run
                    .runtime_seconds
                    .map(|t| format!("{:.1}", t))
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect();
        println!("{}", Table::new(&rows));
    }

    if let Some(path) = &args.output {
        save_summary_csv(&result.succeeded, path)?;
        output::print_written("Summary", path);
    }

    output::print_separator();
    output::print_done(&format!(
        "{} of {} files parsed, {} failed",
        result.success(),
        result.total(),
        result.failed()
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 保存汇总到 CSV
fn save_summary_csv(runs: &[RunResult], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for run in runs {
        wtr.serialize(SummaryRecord::from(run))?;
    }

    wtr.flush().map_err(|e| OrcaToolsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
