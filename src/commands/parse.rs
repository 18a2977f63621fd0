//! # parse 子命令实现
//!
//! 读取单个 ORCA 输出文件，打印计算类型、最终能量、运行时间和最终结构，
//! 并按参数附加热化学、CBS、FOD、CC、CASSCF/MRCI 等性质表格。
//! 任何请求的性质缺失都会以错误结束，不打印占位值。
//!
//! ## 依赖关系
//! - 使用 `cli/parse.rs` 定义的参数
//! - 使用 `parsers/orca_out.rs`, `parsers/xyz.rs`
//! - 使用 `utils/output.rs`

use crate::cli::parse::ParseArgs;
use crate::error::{OrcaToolsError, Result};
use crate::models::{Geometry, RunResult};
use crate::parsers::{orca_out, xyz};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 性质表格的一行
#[derive(Debug, Clone, Tabled)]
struct PropertyRow {
    #[tabled(rename = "Property")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl PropertyRow {
    fn new(name: &str, value: String) -> Self {
        PropertyRow {
            name: name.to_string(),
            value,
        }
    }
}

/// 原子坐标表格的一行
#[derive(Debug, Clone, Tabled)]
struct AtomRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Atom")]
    label: String,
    #[tabled(rename = "X (Å)")]
    x: String,
    #[tabled(rename = "Y (Å)")]
    y: String,
    #[tabled(rename = "Z (Å)")]
    z: String,
}

/// 执行 parse
pub fn execute(args: ParseArgs) -> Result<()> {
    output::print_header("ORCA Output");

    if !args.log.is_file() {
        return Err(OrcaToolsError::FileNotFound {
            path: args.log.display().to_string(),
        });
    }

    let run = orca_out::load_run(&args.log)?;
    print_table("Run", &run_rows(&run));
    print_geometry(&run.final_geometry);

    if args.thermo {
        let t = run.thermal_corrections()?;
        print_table(
            "Thermochemistry (Eh)",
            &[
                PropertyRow::new("Zero point energy", format!("{:.8}", t.zpe)),
                PropertyRow::new("Inner energy correction", format!("{:.8}", t.u)),
                PropertyRow::new("Enthalpy correction", format!("{:.8}", t.h)),
                PropertyRow::new("Entropy term T*S", format!("{:.8}", t.s)),
                PropertyRow::new("Gibbs correction G-E(el)", format!("{:.8}", t.g)),
            ],
        );
    }

    if args.cbs {
        let corr = run.cbs_correlation_energy()?;
        print_table(
            "Basis Set Extrapolation",
            &[PropertyRow::new(
                "CBS correlation energy (Eh)",
                format!("{:.8}", corr),
            )],
        );
    }

    if args.fod {
        let n_fod = run.fod_number()?;
        print_table(
            "Fractional Occupation Density",
            &[PropertyRow::new("N_FOD", format!("{:.6}", n_fod))],
        );
    }

    if args.cc {
        let cc = run.cc_diagnostic(args.extrapolated)?;
        let mut rows = vec![
            PropertyRow::new("Correlation energy (Eh)", format!("{:.9}", cc.corr)),
            PropertyRow::new("T1 diagnostic", format!("{:.6}", cc.t1)),
            PropertyRow::new("E(CCSD) (Eh)", format!("{:.9}", cc.ccsd)),
        ];
        if let Some(ccsdt) = cc.ccsdt {
            rows.push(PropertyRow::new("E(CCSD(T)) (Eh)", format!("{:.9}", ccsdt)));
        }
        print_table("Coupled Cluster", &rows);

        if cc.t1 > 0.02 {
            output::print_warning(&format!(
                "T1 diagnostic {:.4} > 0.02: single reference treatment may be unreliable",
                cc.t1
            ));
        }
    }

    if args.mcscf {
        let mc = run.mcscf_correlation(args.mrci)?;
        let mut rows = vec![
            PropertyRow::new("Final CASSCF energy (Eh)", format!("{:.9}", mc.casscf)),
            PropertyRow::new("Correlation energy (Eh)", format!("{:.9}", mc.corr)),
        ];
        if let Some(mrci) = mc.mrci {
            rows.push(PropertyRow::new("MRCI energy (Eh)", format!("{:.9}", mrci)));
        }
        for (i, de) in mc.mrci_davidson.iter().enumerate() {
            rows.push(PropertyRow::new(
                &format!("Root {} Davidson correction", i),
                format!("{:.6}", de),
            ));
        }
        for (i, e) in mc.mrci_mp2.iter().enumerate() {
            rows.push(PropertyRow::new(
                &format!("Root {} MR-MP2 energy", i),
                format!("{:.9}", e),
            ));
        }
        print_table("Multireference", &rows);
    }

    if args.active_space {
        let space = run.active_space()?;
        print_table(
            "Active Space",
            &[
                PropertyRow::new(
                    "CAS(n,m)",
                    format!("CAS({},{})", space.electrons, space.orbitals),
                ),
                PropertyRow::new(
                    "Active orbitals",
                    format!("{} - {}", space.first_orbital, space.last_orbital),
                ),
            ],
        );
    }

    if args.occupations {
        let space = run.active_space()?;
        let occupations = run.occupation_numbers()?;
        let rows: Vec<PropertyRow> = occupations
            .iter()
            .enumerate()
            .map(|(i, occ)| {
                PropertyRow::new(
                    &format!("Orbital {}", space.first_orbital + i),
                    format!("{:.4}", occ),
                )
            })
            .collect();
        print_table("Natural Orbital Occupations", &rows);
    }

    if let Some(path) = &args.save_xyz {
        let written = xyz::write_xyz_file(&run.final_geometry, path, None)?;
        output::print_written("Final geometry", &written);
    }

    Ok(())
}

fn run_rows(run: &RunResult) -> Vec<PropertyRow> {
    vec![
        PropertyRow::new("File", run.path.display().to_string()),
        PropertyRow::new("Calculation", run.run_kind.to_string()),
        PropertyRow::new(
            "Terminated normally",
            if run.terminated_normally { "yes" } else { "no" }.to_string(),
        ),
        PropertyRow::new("Formula", run.final_geometry.formula()),
        PropertyRow::new("Atoms", run.final_geometry.len().to_string()),
        PropertyRow::new("Final energy (Eh)", format!("{:.9}", run.scf_energy)),
        PropertyRow::new(
            "Run time",
            run.runtime_seconds
                .map(format_runtime)
                .unwrap_or_else(|| "not reported".to_string()),
        ),
    ]
}

fn print_table(title: &str, rows: &[PropertyRow]) {
    output::print_header(title);
    println!("{}", Table::new(rows));
}

fn print_geometry(geometry: &Geometry) {
    let rows: Vec<AtomRow> = geometry
        .iter()
        .enumerate()
        .map(|(i, atom)| AtomRow {
            index: i + 1,
            label: atom.label.clone(),
            x: format!("{:.6}", atom.position[0]),
            y: format!("{:.6}", atom.position[1]),
            z: format!("{:.6}", atom.position[2]),
        })
        .collect();

    output::print_header("Final Geometry");
    println!("{}", Table::new(&rows));
}

/// 秒数格式化为 `1d 02:03:04.250 (93784.250 s)`
pub(crate) fn format_runtime(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;
    let (d, h, m, s) = (
        total_s / 86400,
        (total_s % 86400) / 3600,
        (total_s % 3600) / 60,
        total_s % 60,
    );

    let clock = format!("{:02}:{:02}:{:02}.{:03}", h, m, s, ms);
    if d > 0 {
        format!("{}d {} ({:.3} s)", d, clock, seconds)
    } else {
        format!("{} ({:.3} s)", clock, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(12.5), "00:00:12.500 (12.500 s)");
        assert_eq!(
            format_runtime(86400.0 + 7200.0 + 180.0 + 4.25),
            "1d 02:03:04.250 (93784.250 s)"
        );
    }
}
