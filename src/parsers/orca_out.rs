//! # ORCA 输出文件解析器
//!
//! 从 ORCA 输出文件（.out）中提取计算结果。
//!
//! ## 提取流程
//! `load_run` 一次性提取正常结束标志、计算类型、最终单点能和最终几何结构，
//! 任一缺失即失败，不返回部分结果。运行时间是可选的，只有格式错误时才报错。其余性质（热化学、CC 诊断、吸收光谱等）作为
//! `RunResult` 的方法按需提供，每次调用都重新读取并扫描日志。
//!
//! ## 行分类
//! 每一行先经 `classify` 映射为 `Marker`，再由 `LogScanner` 单次正向扫描消费。
//! 优化计算只接受最后一个 `HURRAY` 之后的能量和坐标块。
//!
//! ## 固定的列位置
//! ```text
//! FINAL SINGLE POINT ENERGY       -76.326541234        -> 第 5 列 (index 4)
//! TOTAL RUN TIME: 0 days 0 hours 0 minutes 12 seconds 500 msec
//!                 3      5       7         9          11
//! Zero point energy    ...   0.02125618 Eh   13.34 kcal/mol  -> 倒数第 4 列
//! Final CASSCF energy       : -76.073393742 Eh  -> index 4
//!    0( 0) ->  1( 1)   35001.4    285.7   0.003141593   ...
//!                      cm-1 (5)   nm (6)  fosc (7)
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/parse.rs`, `commands/summary.rs`, `commands/spectrum.rs` 使用
//! - 使用 `models/calculation.rs`, `parsers/xyz.rs`

use crate::error::{OrcaToolsError, RequiredMarker, Result};
use crate::models::{
    AbsorptionSpectrum, ActiveSpace, Atom, CcDiagnostic, Geometry, McscfCorrelation, RunKind,
    RunResult, SpectrumUnit, ThermalCorrections,
};
use crate::parsers::xyz::parse_atom_line;
use std::fs;
use std::path::Path;

const TERMINATION_MARKER: &str = "ORCA TERMINATED NORMALLY";
const RUN_TIME_MARKER: &str = "TOTAL RUN TIME";
const OPTIMIZATION_MARKER: &str = "Geometry Optimization Run";
const CONVERGED_MARKER: &str = "HURRAY";
const ENERGY_MARKER: &str = "FINAL SINGLE POINT ENERGY";
const COORDINATES_MARKER: &str = "CARTESIAN COORDINATES (ANGSTROEM)";

/// cm⁻¹ -> eV
const WAVENUMBER_TO_EV: f64 = 0.000123984;

// ─────────────────────────────────────────────────────────────
// 行分类与扫描
// ─────────────────────────────────────────────────────────────

/// 行分类事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    OptimizationRun,
    Converged,
    FinalEnergy,
    CoordinatesHeader,
    Blank,
    Text,
}

fn classify(line: &str) -> Marker {
    if line.trim().is_empty() {
        Marker::Blank
    } else if line.contains(ENERGY_MARKER) {
        Marker::FinalEnergy
    } else if line.contains(COORDINATES_MARKER) {
        Marker::CoordinatesHeader
    } else if line.contains(CONVERGED_MARKER) {
        Marker::Converged
    } else if line.contains(OPTIMIZATION_MARKER) {
        Marker::OptimizationRun
    } else {
        Marker::Text
    }
}

/// 坐标块读取状态
enum BlockState {
    Idle,
    /// 刚读到标题行，跳过分隔线
    Header,
    Atoms(Vec<Atom>),
}

/// 单次正向扫描的状态机
struct LogScanner {
    optimization: bool,
    block: BlockState,
    last_energy: Option<f64>,
    last_geometry: Option<Geometry>,
    /// 最后一个 HURRAY 之后的值
    converged_energy: Option<f64>,
    converged_geometry: Option<Geometry>,
    converged: bool,
}

impl LogScanner {
    fn new() -> Self {
        LogScanner {
            optimization: false,
            block: BlockState::Idle,
            last_energy: None,
            last_geometry: None,
            converged_energy: None,
            converged_geometry: None,
            converged: false,
        }
    }

    fn feed(&mut self, line: &str) -> std::result::Result<(), String> {
        let marker = classify(line);

        // 坐标块内部的行优先由块状态处理
        match std::mem::replace(&mut self.block, BlockState::Idle) {
            BlockState::Idle => {}
            BlockState::Header => {
                if line.contains("---") {
                    self.block = BlockState::Header;
                    return Ok(());
                }
                self.block = BlockState::Atoms(Vec::new());
                return self.feed(line);
            }
            BlockState::Atoms(mut atoms) => {
                if marker != Marker::Blank {
                    let atom = parse_atom_line(line)
                        .ok_or_else(|| format!("malformed coordinate line '{}'", line.trim()))?;
                    atoms.push(atom);
                    self.block = BlockState::Atoms(atoms);
                    return Ok(());
                }
                self.finish_block(atoms);
                return Ok(());
            }
        }

        match marker {
            Marker::OptimizationRun => self.optimization = true,
            Marker::Converged => {
                self.converged = true;
                self.converged_energy = None;
                self.converged_geometry = None;
            }
            Marker::FinalEnergy => {
                let energy = line
                    .split_whitespace()
                    .nth(4)
                    .and_then(|s| s.parse::<f64>().ok())
                    .ok_or_else(|| format!("malformed energy line '{}'", line.trim()))?;
                self.last_energy = Some(energy);
                if self.converged {
                    self.converged_energy = Some(energy);
                }
            }
            Marker::CoordinatesHeader => self.block = BlockState::Header,
            Marker::Blank | Marker::Text => {}
        }

        Ok(())
    }

    fn finish_block(&mut self, atoms: Vec<Atom>) {
        if atoms.is_empty() {
            return;
        }
        let geometry = Geometry::new(atoms);
        if self.converged {
            self.converged_geometry = Some(geometry.clone());
        }
        self.last_geometry = Some(geometry);
    }

    /// 文件末尾仍在坐标块内时收尾
    fn finish(mut self) -> Self {
        if let BlockState::Atoms(atoms) = std::mem::replace(&mut self.block, BlockState::Idle) {
            self.finish_block(atoms);
        }
        self
    }
}

// ─────────────────────────────────────────────────────────────
// 主结果提取
// ─────────────────────────────────────────────────────────────

/// 读取并解析 ORCA 输出文件
pub fn load_run(path: &Path) -> Result<RunResult> {
    let content = read_log(path)?;
    parse_run_content(&content, path)
}

/// 从字符串内容解析 ORCA 输出
pub fn parse_run_content(content: &str, path: &Path) -> Result<RunResult> {
    let path_str = path.display().to_string();
    let lines: Vec<&str> = content.lines().collect();

    let runtime_seconds = check_termination(&lines, &path_str)?;

    let mut scanner = LogScanner::new();
    for line in &lines {
        scanner
            .feed(line)
            .map_err(|reason| OrcaToolsError::ParseError {
                format: "ORCA output".to_string(),
                path: path_str.clone(),
                reason,
            })?;
    }
    let scanner = scanner.finish();

    let (run_kind, energy, geometry) = if scanner.optimization {
        (
            RunKind::Optimization,
            scanner.converged_energy,
            scanner.converged_geometry,
        )
    } else {
        (
            RunKind::SinglePoint,
            scanner.last_energy,
            scanner.last_geometry,
        )
    };

    let scf_energy = energy.ok_or_else(|| OrcaToolsError::MissingRequiredMarker {
        path: path_str.clone(),
        kind: RequiredMarker::Energy,
    })?;
    let final_geometry = geometry.ok_or_else(|| OrcaToolsError::MissingRequiredMarker {
        path: path_str.clone(),
        kind: RequiredMarker::Geometry,
    })?;

    Ok(RunResult {
        path: path.to_path_buf(),
        terminated_normally: true,
        run_kind,
        scf_energy,
        final_geometry,
        runtime_seconds,
    })
}

/// 检查正常结束标志，返回总运行时间 (s)
///
/// 标志必须位于最后两个非空行之一。运行时间取其后的第一个非空行；
/// 没有 `TOTAL RUN TIME` 行时返回 `None`，该行格式错误时报错。
fn check_termination(lines: &[&str], path: &str) -> Result<Option<f64>> {
    let non_blank: Vec<usize> = lines
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, _)| i)
        .take(2)
        .collect();

    let marker_idx = non_blank
        .iter()
        .copied()
        .find(|&i| lines[i].contains(TERMINATION_MARKER))
        .ok_or_else(|| OrcaToolsError::AbnormalTermination {
            path: path.to_string(),
        })?;

    let timing_line = match lines[marker_idx + 1..]
        .iter()
        .find(|l| !l.trim().is_empty())
        .filter(|l| l.contains(RUN_TIME_MARKER))
    {
        Some(line) => line,
        None => return Ok(None),
    };

    parse_runtime(timing_line)
        .map(Some)
        .ok_or_else(|| OrcaToolsError::MissingRequiredMarker {
            path: path.to_string(),
            kind: RequiredMarker::RunTime,
        })
}

/// 解析 `TOTAL RUN TIME: d days h hours m minutes s seconds ms msec`
fn parse_runtime(line: &str) -> Option<f64> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let field = |idx: usize| parts.get(idx).and_then(|s| s.parse::<f64>().ok());

    let days = field(3)?;
    let hours = field(5)?;
    let minutes = field(7)?;
    let seconds = field(9)?;
    let msec = field(11)?;

    Some(days * 86400.0 + hours * 3600.0 + minutes * 60.0 + seconds + msec / 1000.0)
}

fn read_log(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| OrcaToolsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    // ORCA 输出偶尔包含非 UTF-8 字节
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ─────────────────────────────────────────────────────────────
// 派生性质
// ─────────────────────────────────────────────────────────────

impl RunResult {
    /// 热化学校正（需要频率计算）
    pub fn thermal_corrections(&self) -> Result<ThermalCorrections> {
        thermal_corrections(&read_log(&self.path)?)
    }

    /// CBS 外推相关能
    pub fn cbs_correlation_energy(&self) -> Result<f64> {
        cbs_correlation_energy(&read_log(&self.path)?)
    }

    /// 分数占据密度数 N_FOD
    pub fn fod_number(&self) -> Result<f64> {
        fod_number(&read_log(&self.path)?)
    }

    /// 耦合簇诊断（仅单点计算）
    pub fn cc_diagnostic(&self, extrapolated: bool) -> Result<CcDiagnostic> {
        cc_diagnostic(&read_log(&self.path)?, self.is_optimization(), extrapolated)
    }

    /// CASSCF / MRCI 相关能（仅单点计算）
    pub fn mcscf_correlation(&self, mrci: bool) -> Result<McscfCorrelation> {
        mcscf_correlation(
            &read_log(&self.path)?,
            self.is_optimization(),
            self.scf_energy,
            mrci,
        )
    }

    /// UV/vis 吸收光谱
    pub fn absorption_spectrum(&self, unit: SpectrumUnit) -> Result<AbsorptionSpectrum> {
        absorption_spectrum(&read_log(&self.path)?, unit)
    }

    /// CASSCF 活性空间
    pub fn active_space(&self) -> Result<ActiveSpace> {
        active_space(&read_log(&self.path)?)
    }

    /// 活性轨道的 CASSCF 占据数
    pub fn occupation_numbers(&self) -> Result<Vec<f64>> {
        occupation_numbers(&read_log(&self.path)?)
    }
}

/// 取倒数第 `n` 列并解析为数值
fn token_from_end(line: &str, n: usize) -> Option<f64> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if n == 0 || parts.len() < n {
        return None;
    }
    parts[parts.len() - n].parse().ok()
}

fn last_token(line: &str) -> Option<f64> {
    token_from_end(line, 1)
}

fn malformed(property: &str, line: &str) -> OrcaToolsError {
    OrcaToolsError::wrong_calculation(property, format!("malformed line '{}'", line.trim()))
}

/// 热化学校正，每个标签取最后一次出现
pub fn thermal_corrections(content: &str) -> Result<ThermalCorrections> {
    const PROPERTY: &str = "thermal corrections";
    const LABELS: [&str; 5] = [
        "Zero point energy",
        "Total correction",
        "Thermal Enthalpy correction",
        "Final entropy term",
        "G-E(el)",
    ];

    let mut values: [Option<f64>; 5] = [None; 5];
    for line in content.lines() {
        for (label, value) in LABELS.iter().zip(values.iter_mut()) {
            if line.contains(label) {
                *value = Some(token_from_end(line, 4).ok_or_else(|| malformed(PROPERTY, line))?);
            }
        }
    }

    let zpe = values[0].ok_or_else(|| {
        OrcaToolsError::wrong_calculation(
            PROPERTY,
            "no vibrational data ('Zero point energy' not found); run a frequency calculation",
        )
    })?;

    let mut rest = [0.0; 4];
    for (i, slot) in rest.iter_mut().enumerate() {
        *slot = values[i + 1].ok_or_else(|| {
            OrcaToolsError::wrong_calculation(PROPERTY, format!("'{}' not found", LABELS[i + 1]))
        })?;
    }
    let [u, kbt, s, g] = rest;

    Ok(ThermalCorrections {
        zpe,
        u,
        h: u + kbt,
        s,
        g,
    })
}

/// CBS 外推相关能（第一条不含 SCF 的外推行）
pub fn cbs_correlation_energy(content: &str) -> Result<f64> {
    const PROPERTY: &str = "CBS correlation energy";

    let line = content
        .lines()
        .find(|l| l.contains("Extrapolated CBS correlation energy") && !l.contains("SCF"))
        .ok_or_else(|| {
            OrcaToolsError::wrong_calculation(PROPERTY, "no basis set extrapolation found")
        })?;

    line.split_whitespace()
        .last()
        .map(|t| t.replace(['(', ')'], ""))
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| malformed(PROPERTY, line))
}

/// 分数占据密度数（第一条不区分自旋的 N_FOD 行）
pub fn fod_number(content: &str) -> Result<f64> {
    const PROPERTY: &str = "FOD number";

    let line = content
        .lines()
        .find(|l| l.contains("N_FOD") && !l.contains("alpha") && !l.contains("beta"))
        .ok_or_else(|| OrcaToolsError::wrong_calculation(PROPERTY, "no FOD analysis found"))?;

    last_token(line).ok_or_else(|| malformed(PROPERTY, line))
}

/// 耦合簇诊断
///
/// 不外推时扫描整个日志；外推时只扫描第一条 `Extrapolated Energy 2 Basis` 之后的内容。
/// E(CCSD) 和 E(CCSD(T)) 只在 `Final correlation energy` 之后读取。
pub fn cc_diagnostic(content: &str, optimization: bool, extrapolated: bool) -> Result<CcDiagnostic> {
    const PROPERTY: &str = "CC diagnostic";
    const EXTRAPOLATION_MARKER: &str = "Extrapolated Energy 2 Basis";

    if optimization {
        return Err(OrcaToolsError::wrong_calculation(
            PROPERTY,
            "only available for single point calculations",
        ));
    }

    let lines: Vec<&str> = if extrapolated {
        let start = content
            .lines()
            .position(|l| l.contains(EXTRAPOLATION_MARKER))
            .ok_or_else(|| {
                OrcaToolsError::wrong_calculation(PROPERTY, "no basis set extrapolation found")
            })?;
        content.lines().skip(start + 1).collect()
    } else {
        content.lines().collect()
    };

    let mut corr = None;
    let mut t1 = None;
    let mut ccsd = None;
    let mut ccsdt = None;
    let mut after_final = false;

    for line in lines {
        if line.contains("T1 diagnostic") {
            t1 = Some(last_token(line).ok_or_else(|| malformed(PROPERTY, line))?);
        } else if line.contains("E(CORR)") {
            corr = Some(last_token(line).ok_or_else(|| malformed(PROPERTY, line))?);
        } else if line.contains("Final correlation energy") {
            after_final = true;
        } else if after_final && line.contains("E(CCSD(T))") {
            ccsdt = Some(last_token(line).ok_or_else(|| malformed(PROPERTY, line))?);
        } else if after_final && line.contains("E(CCSD)") {
            ccsd = Some(last_token(line).ok_or_else(|| malformed(PROPERTY, line))?);
        }
    }

    let (corr, t1) = match (corr, t1) {
        (Some(corr), Some(t1)) => (corr, t1),
        _ => {
            return Err(OrcaToolsError::wrong_calculation(
                PROPERTY,
                "no coupled cluster energy with T1 diagnostic found",
            ))
        }
    };
    let ccsd = ccsd.ok_or_else(|| {
        OrcaToolsError::wrong_calculation(PROPERTY, "no E(CCSD) after 'Final correlation energy'")
    })?;

    Ok(CcDiagnostic {
        corr,
        t1,
        ccsd,
        ccsdt,
    })
}

/// MRCI 附加输出的读取阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MrciSection {
    Pending,
    Davidson,
    Mp2,
}

/// CASSCF 相关能，可选读取 MRCI 的 Davidson 校正与 MR-MP2 能量
pub fn mcscf_correlation(
    content: &str,
    optimization: bool,
    scf_energy: f64,
    mrci: bool,
) -> Result<McscfCorrelation> {
    const PROPERTY: &str = "MCSCF correlation";

    if optimization {
        return Err(OrcaToolsError::wrong_calculation(
            PROPERTY,
            "only available for single point calculations",
        ));
    }

    let lines: Vec<&str> = content.lines().collect();
    let casscf_idx = lines
        .iter()
        .position(|l| l.contains("Final CASSCF energy"))
        .ok_or_else(|| OrcaToolsError::wrong_calculation(PROPERTY, "no CASSCF calculation found"))?;

    let casscf_line = lines[casscf_idx];
    let casscf = casscf_line
        .split_whitespace()
        .nth(4)
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| malformed(PROPERTY, casscf_line))?;

    let mut result = McscfCorrelation {
        casscf,
        corr: scf_energy - casscf,
        mrci: None,
        mrci_davidson: Vec::new(),
        mrci_mp2: Vec::new(),
    };

    if !mrci {
        return Ok(result);
    }

    let mut section = MrciSection::Pending;
    for line in &lines[casscf_idx + 1..] {
        match section {
            MrciSection::Pending => {
                if line.contains("DAVIDSON DONE") {
                    section = MrciSection::Davidson;
                }
            }
            MrciSection::Davidson => {
                if line.contains("Full relaxed MR-MP2 calculation") {
                    section = MrciSection::Mp2;
                } else if line.contains("Root") {
                    let value = line
                        .split_whitespace()
                        .last()
                        .map(|t| t.trim_start_matches("DE="))
                        .and_then(|t| t.parse::<f64>().ok())
                        .ok_or_else(|| malformed(PROPERTY, line))?;
                    result.mrci_davidson.push(value);
                }
            }
            MrciSection::Mp2 => {
                if line.contains("Root") {
                    result
                        .mrci_mp2
                        .push(last_token(line).ok_or_else(|| malformed(PROPERTY, line))?);
                    if result.mrci_mp2.len() == result.mrci_davidson.len() {
                        break;
                    }
                }
            }
        }
    }

    if result.mrci_davidson.is_empty() {
        return Err(OrcaToolsError::wrong_calculation(
            "MRCI correlation",
            "no Davidson-corrected MRCI roots found",
        ));
    }
    result.mrci = Some(scf_energy);

    Ok(result)
}

/// UV/vis 吸收光谱（第一个 ABSORPTION SPECTRUM 块）
pub fn absorption_spectrum(content: &str, unit: SpectrumUnit) -> Result<AbsorptionSpectrum> {
    const PROPERTY: &str = "absorption spectrum";

    let mut in_block = false;
    let mut found_block = false;
    let mut energies = Vec::new();
    let mut oscillator_strengths = Vec::new();

    for line in content.lines() {
        if !in_block {
            if line.contains("ABSORPTION SPECTRUM") {
                in_block = true;
                found_block = true;
            }
            continue;
        }

        if line.contains("CD SPECTRUM") {
            break;
        }
        if line.trim().is_empty() {
            if energies.is_empty() {
                continue;
            }
            break;
        }
        if !line.contains("0(") {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let field = |idx: usize| parts.get(idx).and_then(|s| s.parse::<f64>().ok());

        let fosc = field(7).ok_or_else(|| malformed(PROPERTY, line))?;
        let energy = match unit {
            SpectrumUnit::Wavenumber => field(5),
            SpectrumUnit::Wavelength => field(6),
            SpectrumUnit::ElectronVolt => field(5).map(|cm| cm * WAVENUMBER_TO_EV),
        }
        .ok_or_else(|| malformed(PROPERTY, line))?;

        energies.push(energy);
        oscillator_strengths.push(fosc);
    }

    if !found_block {
        return Err(OrcaToolsError::wrong_calculation(
            PROPERTY,
            "no ABSORPTION SPECTRUM block found; run an excited state calculation",
        ));
    }
    if energies.is_empty() {
        return Err(OrcaToolsError::wrong_calculation(
            PROPERTY,
            "ABSORPTION SPECTRUM block has no transitions",
        ));
    }

    Ok(AbsorptionSpectrum {
        unit,
        energies,
        oscillator_strengths,
    })
}

/// CASSCF 活性空间
pub fn active_space(content: &str) -> Result<ActiveSpace> {
    const PROPERTY: &str = "active space";

    let count = |label: &str| -> Result<usize> {
        let line = content
            .lines()
            .find(|l| l.contains(label))
            .ok_or_else(|| {
                OrcaToolsError::wrong_calculation(PROPERTY, format!("'{}' not found", label))
            })?;
        line.split_whitespace()
            .last()
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or_else(|| malformed(PROPERTY, line))
    };

    let electrons = count("Number of active electrons")?;
    let orbitals = count("Number of active orbitals")?;

    let range_line = content
        .lines()
        .skip_while(|l| !l.contains("Determined orbital ranges"))
        .find(|l| l.split_whitespace().next() == Some("Active"))
        .ok_or_else(|| {
            OrcaToolsError::wrong_calculation(PROPERTY, "no active orbital range found")
        })?;

    let parts: Vec<&str> = range_line.split_whitespace().collect();
    let index = |idx: usize| parts.get(idx).and_then(|s| s.parse::<usize>().ok());
    let (first_orbital, last_orbital) = match (index(1), index(3)) {
        (Some(first), Some(last)) if first <= last => (first, last),
        _ => return Err(malformed(PROPERTY, range_line)),
    };

    Ok(ActiveSpace {
        electrons,
        orbitals,
        first_orbital,
        last_orbital,
    })
}

/// 活性轨道的 CASSCF 占据数
pub fn occupation_numbers(content: &str) -> Result<Vec<f64>> {
    const PROPERTY: &str = "CASSCF occupation numbers";

    let space = active_space(content)?;
    let mut in_results = false;
    let mut occupations = Vec::with_capacity(space.orbitals);

    for line in content.lines() {
        if !in_results {
            in_results = line.contains("CASSCF RESULTS");
            continue;
        }

        let mut parts = line.split_whitespace();
        let orbital = match parts.next().and_then(|t| t.parse::<usize>().ok()) {
            Some(idx) => idx,
            None => continue,
        };
        if orbital > space.last_orbital {
            break;
        }
        if space.contains(orbital) {
            let occ = parts
                .next()
                .and_then(|t| t.parse::<f64>().ok())
                .ok_or_else(|| malformed(PROPERTY, line))?;
            occupations.push(occ);
        }
    }

    if !in_results {
        return Err(OrcaToolsError::wrong_calculation(
            PROPERTY,
            "no CASSCF RESULTS block found",
        ));
    }
    if occupations.is_empty() {
        return Err(OrcaToolsError::wrong_calculation(
            PROPERTY,
            "no active orbital rows in CASSCF RESULTS",
        ));
    }

    Ok(occupations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TAIL: &str = r#"
                             ****ORCA TERMINATED NORMALLY****
TOTAL RUN TIME: 0 days 0 hours 0 minutes 12 seconds 500 msec

"#;

    const SINGLE_POINT: &str = r#"
                       ****END OF INPUT****
================================================================================

                       ****************************
                       * Single Point Calculation *
                       ****************************

---------------------------------
CARTESIAN COORDINATES (ANGSTROEM)
---------------------------------
  O      0.000000    0.000000    0.117790
  H      0.000000    0.755453   -0.471161
  H      0.000000   -0.755453   -0.471161

----------------------------
CARTESIAN COORDINATES (A.U.)
----------------------------
  NO LB      ZA    FRAG     MASS         X           Y           Z
   0 O     8.0000    0    15.999    0.000000    0.000000    0.222592

-------------------------   --------------------
FINAL SINGLE POINT ENERGY       -76.326541234
-------------------------   --------------------
"#;

    const OPTIMIZATION: &str = r#"
                       ****END OF INPUT****
================================================================================

                       *****************************
                       * Geometry Optimization Run *
                       *****************************

---------------------------------
CARTESIAN COORDINATES (ANGSTROEM)
---------------------------------
  H      0.000000    0.000000    0.000000
  H      0.000000    0.000000    0.800000

-------------------------   --------------------
FINAL SINGLE POINT ENERGY        -1.100000000
-------------------------   --------------------

---------------------------------
CARTESIAN COORDINATES (ANGSTROEM)
---------------------------------
  H      0.000000    0.000000    0.000000
  H      0.000000    0.000000    0.740000

-------------------------   --------------------
FINAL SINGLE POINT ENERGY        -1.160000000
-------------------------   --------------------

                    ***********************HURRAY********************
                    ***        THE OPTIMIZATION HAS CONVERGED     ***
                    *************************************************

---------------------------------
CARTESIAN COORDINATES (ANGSTROEM)
---------------------------------
  H      0.000000    0.000000    0.000000
  H      0.000000    0.000000    0.741000

-------------------------   --------------------
FINAL SINGLE POINT ENERGY        -1.166666666
-------------------------   --------------------
"#;

    const THERMO: &str = r#"
Zero point energy                ...      0.02125618 Eh      13.34 kcal/mol
Total thermal correction                  0.00283678 Eh       1.78 kcal/mol
Total correction                          0.02409296 Eh      15.12 kcal/mol
Thermal Enthalpy correction       ...      0.00094421 Eh       0.59 kcal/mol
Final entropy term                ...      0.02138476 Eh      13.42 kcal/mol
G-E(el)                           ...      0.00365240 Eh       2.29 kcal/mol
"#;

    const CCSD: &str = r#"
E(0)                                       ...    -76.057770326
E(CORR)(strong-pairs)                      ...     -0.213418125
E(CORR)(weak-pairs)                        ...     -0.000292497
E(CORR)(corrected)                         ...     -0.213710622
E(TOT)                                     ...    -76.271480948
Singles Norm <S|S>**1/2                    ...      0.027452271
T1 diagnostic                              ...      0.009705770

Triples Correction (T)                     ...     -0.003047286
Final correlation energy                   ...     -0.216757908
E(CCSD)                                    ...    -76.271480948
E(CCSD(T))                                 ...    -76.274528234
"#;

    const CASSCF: &str = r#"
Number of active electrons          ...    4
Number of active orbitals           ...    4

Determined orbital ranges:
   Internal       0 -    2 (   3 orbitals)
   Active         3 -    6 (   4 orbitals)
   External       7 -   23 (  17 orbitals)

----------------
CASSCF RESULTS
----------------

Final CASSCF energy       : -76.073393742 Eh          -2070.0542 eV

----------------
ORBITAL ENERGIES
----------------

  NO   OCC          E(Eh)            E(eV)
   0   2.0000     -20.562245      -559.5283
   1   2.0000      -1.316437       -35.8221
   2   2.0000      -0.677852       -18.4453
   3   1.9800      -0.542018       -14.7491
   4   1.9600      -0.494150       -13.4465
   5   0.0400       0.180256         4.9050
   6   0.0200       0.249430         6.7873
   7   0.0000       0.782315        21.2878
"#;

    const MRCI: &str = r#"
DAVIDSON DONE
   Root  0:  E=   -76.2123 DE=-0.0123
   Root  1:  E=   -75.9000 DE=-0.0150
Full relaxed MR-MP2 calculation
   Root  0:  E(MR-MP2)=   -76.2200
   Root  1:  E(MR-MP2)=   -75.9100
   Root  2:  E(MR-MP2)=   -75.0000
"#;

    const ABSORPTION: &str = r#"
-----------------------------------------------------------------------------
         ABSORPTION SPECTRUM VIA TRANSITION ELECTRIC DIPOLE MOMENTS
-----------------------------------------------------------------------------
     Transition      Energy    Wavelength   fosc          T2        TX        TY        TZ
                     (cm-1)      (nm)                   (au**2)    (au)      (au)      (au)
-----------------------------------------------------------------------------
   0( 0) ->  1( 1)   35001.4    285.7   0.003141593   0.02955   0.00000   0.17190   0.00000
   0( 0) ->  2( 1)   52000.0    192.3   0.250000000   1.58300   1.25817   0.00000   0.00000

-----------------------------------------------------------------------------
             CD SPECTRUM
-----------------------------------------------------------------------------
   0( 0) ->  1( 1)   35001.4    285.7   0.999999999   0.02955   0.00000   0.17190   0.00000
"#;

    fn log(body: &str) -> String {
        format!("{}{}", body, TAIL)
    }

    fn parse(content: &str) -> Result<RunResult> {
        parse_run_content(content, &PathBuf::from("test.out"))
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(classify("   "), Marker::Blank);
        assert_eq!(
            classify("FINAL SINGLE POINT ENERGY       -76.3"),
            Marker::FinalEnergy
        );
        assert_eq!(
            classify("CARTESIAN COORDINATES (ANGSTROEM)"),
            Marker::CoordinatesHeader
        );
        assert_eq!(classify("CARTESIAN COORDINATES (A.U.)"), Marker::Text);
        assert_eq!(classify("   ****HURRAY****"), Marker::Converged);
        assert_eq!(
            classify("   * Geometry Optimization Run *"),
            Marker::OptimizationRun
        );
    }

    #[test]
    fn test_single_point_run() {
        let run = parse(&log(SINGLE_POINT)).unwrap();

        assert!(run.terminated_normally);
        assert_eq!(run.run_kind, RunKind::SinglePoint);
        assert!(!run.is_optimization());
        assert!((run.scf_energy - (-76.326541234)).abs() < 1e-12);
        assert_eq!(run.final_geometry.len(), 3);
        assert_eq!(run.final_geometry.atoms[1].label, "H");
        assert!((run.final_geometry.atoms[1].position[1] - 0.755453).abs() < 1e-12);
    }

    #[test]
    fn test_runtime_seconds() {
        let run = parse(&log(SINGLE_POINT)).unwrap();
        assert_eq!(run.runtime_seconds, Some(12.5));

        assert_eq!(
            parse_runtime("TOTAL RUN TIME: 1 days 2 hours 3 minutes 4 seconds 250 msec"),
            Some(86400.0 + 7200.0 + 180.0 + 4.0 + 0.25)
        );
        assert_eq!(parse_runtime("TOTAL RUN TIME: garbage"), None);
    }

    #[test]
    fn test_optimization_uses_converged_block() {
        let run = parse(&log(OPTIMIZATION)).unwrap();

        assert_eq!(run.run_kind, RunKind::Optimization);
        assert!((run.scf_energy - (-1.166666666)).abs() < 1e-12);
        assert!((run.final_geometry.atoms[1].position[2] - 0.741).abs() < 1e-12);
    }

    #[test]
    fn test_unconverged_optimization_has_no_energy() {
        let body = OPTIMIZATION.split("HURRAY").next().unwrap();
        let result = parse(&log(body));
        assert!(matches!(
            result,
            Err(OrcaToolsError::MissingRequiredMarker {
                kind: RequiredMarker::Energy,
                ..
            })
        ));
    }

    #[test]
    fn test_abnormal_termination() {
        let result = parse(SINGLE_POINT);
        assert!(matches!(
            result,
            Err(OrcaToolsError::AbnormalTermination { .. })
        ));

        let content = format!("{}ORCA TERMINATED NORMALLY\nsome\nmore\nlines\n", SINGLE_POINT);
        assert!(matches!(
            parse(&content),
            Err(OrcaToolsError::AbnormalTermination { .. })
        ));
    }

    #[test]
    fn test_marker_on_last_line_without_runtime() {
        let content = format!("{}\n****ORCA TERMINATED NORMALLY****\n\n", SINGLE_POINT);
        let run = parse(&content).unwrap();
        assert!(run.terminated_normally);
        assert_eq!(run.runtime_seconds, None);
        assert!((run.scf_energy - (-76.326541234)).abs() < 1e-12);
        assert_eq!(run.final_geometry.len(), 3);

        let content = format!(
            "{}\n****ORCA TERMINATED NORMALLY****\nBye\n",
            SINGLE_POINT
        );
        assert_eq!(parse(&content).unwrap().runtime_seconds, None);
    }

    #[test]
    fn test_malformed_runtime_line() {
        let content = format!(
            "{}\n****ORCA TERMINATED NORMALLY****\nTOTAL RUN TIME: garbage\n",
            SINGLE_POINT
        );
        assert!(matches!(
            parse(&content),
            Err(OrcaToolsError::MissingRequiredMarker {
                kind: RequiredMarker::RunTime,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_geometry() {
        let body = "FINAL SINGLE POINT ENERGY       -76.326541234\n";
        assert!(matches!(
            parse(&log(body)),
            Err(OrcaToolsError::MissingRequiredMarker {
                kind: RequiredMarker::Geometry,
                ..
            })
        ));
    }

    #[test]
    fn test_thermal_corrections() {
        let thermo = thermal_corrections(THERMO).unwrap();
        assert!((thermo.zpe - 0.02125618).abs() < 1e-12);
        assert!((thermo.u - 0.02409296).abs() < 1e-12);
        assert!((thermo.h - (0.02409296 + 0.00094421)).abs() < 1e-12);
        assert!((thermo.s - 0.02138476).abs() < 1e-12);
        assert!((thermo.g - 0.00365240).abs() < 1e-12);
    }

    #[test]
    fn test_thermal_corrections_on_single_point() {
        let run_log = log(SINGLE_POINT);
        assert!(matches!(
            thermal_corrections(&run_log),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));
    }

    #[test]
    fn test_derived_properties_reread_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.out");
        fs::write(&path, log(SINGLE_POINT)).unwrap();

        let run = load_run(&path).unwrap();
        assert!(matches!(
            run.thermal_corrections(),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));

        fs::write(&path, log(&format!("{}{}", SINGLE_POINT, THERMO))).unwrap();
        let thermo = run.thermal_corrections().unwrap();
        assert!((thermo.zpe - 0.02125618).abs() < 1e-12);
    }

    #[test]
    fn test_cbs_and_fod() {
        let content = r#"
Extrapolated CBS SCF energy (2/3) :    -76.0611 (-0.0023)
Extrapolated CBS correlation energy (2/3) :     -0.2991 (-0.2765)
N_FOD(alpha) =   0.1000
N_FOD        =   0.2345
"#;
        assert!((cbs_correlation_energy(content).unwrap() - (-0.2765)).abs() < 1e-12);
        assert!((fod_number(content).unwrap() - 0.2345).abs() < 1e-12);

        assert!(matches!(
            cbs_correlation_energy(SINGLE_POINT),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));
        assert!(matches!(
            fod_number(SINGLE_POINT),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));
    }

    #[test]
    fn test_cc_diagnostic() {
        let cc = cc_diagnostic(CCSD, false, false).unwrap();
        assert!((cc.corr - (-0.213710622)).abs() < 1e-12);
        assert!((cc.t1 - 0.009705770).abs() < 1e-12);
        assert!((cc.ccsd - (-76.271480948)).abs() < 1e-12);
        assert_eq!(cc.ccsdt, Some(-76.274528234));
    }

    #[test]
    fn test_cc_diagnostic_extrapolated() {
        let first = CCSD.replace("0.009705770", "0.111111111");
        let content = format!(
            "{}\n----- Extrapolated Energy 2 Basis -----\n{}",
            first, CCSD
        );

        let cc = cc_diagnostic(&content, false, true).unwrap();
        assert!((cc.t1 - 0.009705770).abs() < 1e-12);

        assert!(matches!(
            cc_diagnostic(CCSD, false, true),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));
    }

    #[test]
    fn test_cc_diagnostic_rejects_optimization() {
        assert!(matches!(
            cc_diagnostic(CCSD, true, false),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));
    }

    #[test]
    fn test_mcscf_correlation() {
        let scf = -76.2;
        let mc = mcscf_correlation(CASSCF, false, scf, false).unwrap();
        assert!((mc.casscf - (-76.073393742)).abs() < 1e-12);
        assert!((mc.corr - (scf + 76.073393742)).abs() < 1e-12);
        assert_eq!(mc.mrci, None);
        assert!(mc.mrci_davidson.is_empty());

        let content = format!("{}{}", CASSCF, MRCI);
        let mc = mcscf_correlation(&content, false, scf, true).unwrap();
        assert_eq!(mc.mrci, Some(scf));
        assert_eq!(mc.mrci_davidson, vec![-0.0123, -0.0150]);
        assert_eq!(mc.mrci_mp2, vec![-76.2200, -75.9100]);

        assert!(matches!(
            mcscf_correlation(CASSCF, false, scf, true),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));
        assert!(matches!(
            mcscf_correlation(SINGLE_POINT, false, scf, false),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));
    }

    #[test]
    fn test_absorption_spectrum_units() {
        let cm = absorption_spectrum(ABSORPTION, SpectrumUnit::Wavenumber).unwrap();
        assert_eq!(cm.energies, vec![35001.4, 52000.0]);
        assert_eq!(cm.oscillator_strengths, vec![0.003141593, 0.25]);

        let nm = absorption_spectrum(ABSORPTION, SpectrumUnit::Wavelength).unwrap();
        assert_eq!(nm.energies, vec![285.7, 192.3]);

        let ev = absorption_spectrum(ABSORPTION, SpectrumUnit::ElectronVolt).unwrap();
        assert!((ev.energies[0] - 35001.4 * 0.000123984).abs() < 1e-12);
        assert_eq!(ev.len(), 2);
    }

    #[test]
    fn test_absorption_spectrum_missing() {
        assert!(matches!(
            absorption_spectrum(SINGLE_POINT, SpectrumUnit::ElectronVolt),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));
    }

    #[test]
    fn test_active_space_and_occupations() {
        let space = active_space(CASSCF).unwrap();
        assert_eq!(
            space,
            ActiveSpace {
                electrons: 4,
                orbitals: 4,
                first_orbital: 3,
                last_orbital: 6,
            }
        );

        let occ = occupation_numbers(CASSCF).unwrap();
        assert_eq!(occ, vec![1.98, 1.96, 0.04, 0.02]);

        assert!(matches!(
            occupation_numbers(SINGLE_POINT),
            Err(OrcaToolsError::WrongCalculationType { .. })
        ));
    }

    #[test]
    fn test_last_hurray_wins() {
        let second = r#"
                    ***********************HURRAY********************
                    ***        THE OPTIMIZATION HAS CONVERGED     ***
                    *************************************************

---------------------------------
CARTESIAN COORDINATES (ANGSTROEM)
---------------------------------
  H      0.000000    0.000000    0.000000
  H      0.000000    0.000000    0.735000

-------------------------   --------------------
FINAL SINGLE POINT ENERGY        -1.170000000
-------------------------   --------------------
"#;
        let run = parse(&log(&format!("{}{}", OPTIMIZATION, second))).unwrap();
        assert_eq!(run.run_kind, RunKind::Optimization);
        assert!((run.scf_energy - (-1.17)).abs() < 1e-12);
        assert!((run.final_geometry.atoms[1].position[2] - 0.735).abs() < 1e-12);

        // 最后一个 HURRAY 之后没有新值时，之前收敛的结果不再有效
        let dangling = format!("{}\n   ****HURRAY****\n", OPTIMIZATION);
        assert!(matches!(
            parse(&log(&dangling)),
            Err(OrcaToolsError::MissingRequiredMarker {
                kind: RequiredMarker::Energy,
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_coordinate_line() {
        let body = r#"
---------------------------------
CARTESIAN COORDINATES (ANGSTROEM)
---------------------------------
  O      0.000000    abc         0.117790
  H      0.000000    0.755453   -0.471161

FINAL SINGLE POINT ENERGY       -76.326541234
"#;
        assert!(matches!(
            parse(&log(body)),
            Err(OrcaToolsError::ParseError { .. })
        ));
    }

    #[test]
    fn test_occupations_stop_after_active_range() {
        let trailing = format!(
            "{}   8   1.5000       0.900000        24.4902\n\n\
             LOEWDIN ORBITAL POPULATIONS\n   4   0.9000       0.100000         2.7211\n",
            CASSCF
        );

        let occ = occupation_numbers(&trailing).unwrap();
        assert_eq!(occ, vec![1.98, 1.96, 0.04, 0.02]);
    }
}
