//! # XYZ 几何结构读写
//!
//! ## 读取
//! 几何结构可以来自三种输入：
//! - 已存在的 .xyz 文件路径（前两行为原子数与标题，均跳过）
//! - 内联文本，每行 `label x y z`，没有头部两行
//! - 已解析的原子列表
//!
//! ## 写入格式
//! ```text
//! 3
//! water
//! O         0.00000    0.00000    0.11779
//! H         0.00000    0.75545   -0.47116
//! H         0.00000   -0.75545   -0.47116
//! ```
//! 标签左对齐宽度 6，坐标 `%10.5f`。ORCA 输入文件的几何部分使用同一格式，
//! 读回后坐标误差不超过 1e-5 Å。
//!
//! ## 依赖关系
//! - 被 `parsers/orca_inp.rs`, `interpolate/`, `commands/` 使用
//! - 使用 `models/geometry.rs`

use crate::error::{OrcaToolsError, Result};
use crate::models::{Atom, Geometry};
use std::fs;
use std::path::{Path, PathBuf};

/// 几何结构输入来源
#[derive(Debug, Clone)]
pub enum GeometryInput<'a> {
    /// 文件路径或内联 XYZ 文本
    Text(&'a str),
    /// 已解析的原子列表
    Atoms(Geometry),
}

impl<'a> From<&'a str> for GeometryInput<'a> {
    fn from(text: &'a str) -> Self {
        GeometryInput::Text(text)
    }
}

impl From<Geometry> for GeometryInput<'_> {
    fn from(geometry: Geometry) -> Self {
        GeometryInput::Atoms(geometry)
    }
}

impl GeometryInput<'_> {
    /// 解析为几何结构：先判断是否为已存在的文件，否则按内联文本处理
    pub fn resolve(self) -> Result<Geometry> {
        match self {
            GeometryInput::Atoms(geometry) => Ok(geometry),
            GeometryInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(OrcaToolsError::InvalidGeometryInput(
                        "empty geometry input".to_string(),
                    ));
                }

                let path = Path::new(trimmed);
                if !trimmed.contains('\n') && path.is_file() {
                    return parse_xyz_file(path);
                }

                if !trimmed.contains(char::is_whitespace) {
                    return Err(OrcaToolsError::InvalidGeometryInput(format!(
                        "'{}' is neither an existing file nor XYZ text",
                        trimmed
                    )));
                }

                parse_xyz_content(text)
            }
        }
    }
}

/// 解析 .xyz 文件（跳过原子数和标题两行）
pub fn parse_xyz_file(path: &Path) -> Result<Geometry> {
    let content = fs::read_to_string(path).map_err(|e| OrcaToolsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut lines = content.lines();
    let count_line = lines.next();
    if lines.next().is_none() {
        return Err(OrcaToolsError::ParseError {
            format: "xyz".to_string(),
            path: path.display().to_string(),
            reason: "Missing atom count and title lines".to_string(),
        });
    }

    let body: Vec<&str> = lines.collect();
    let geometry = parse_atom_lines(&body)?;

    // 原子数行可解析时必须与实际原子数一致
    if let Some(declared) = count_line.and_then(|l| l.trim().parse::<usize>().ok()) {
        if declared != geometry.len() {
            return Err(OrcaToolsError::InvalidGeometryInput(format!(
                "{} declares {} atoms but lists {}",
                path.display(),
                declared,
                geometry.len()
            )));
        }
    }

    Ok(geometry)
}

/// 解析内联 XYZ 文本（每行一个原子，无头部）
pub fn parse_xyz_content(content: &str) -> Result<Geometry> {
    let lines: Vec<&str> = content.lines().collect();
    let geometry = parse_atom_lines(&lines)?;

    if geometry.is_empty() {
        return Err(OrcaToolsError::InvalidGeometryInput(
            "no atom lines found".to_string(),
        ));
    }

    Ok(geometry)
}

/// 解析原子行，忽略空行
fn parse_atom_lines(lines: &[&str]) -> Result<Geometry> {
    let mut atoms = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let atom = parse_atom_line(line).ok_or_else(|| {
            OrcaToolsError::InvalidGeometryInput(format!(
                "expected 'label x y z' on line {}: '{}'",
                i + 1,
                line.trim()
            ))
        })?;
        atoms.push(atom);
    }

    Ok(Geometry::new(atoms))
}

/// 解析单个原子行 `label x y z`，多余的列被忽略
pub fn parse_atom_line(line: &str) -> Option<Atom> {
    let mut parts = line.split_whitespace();
    let label = parts.next()?;
    let x: f64 = parts.next()?.parse().ok()?;
    let y: f64 = parts.next()?.parse().ok()?;
    let z: f64 = parts.next()?.parse().ok()?;
    Some(Atom::new(label, [x, y, z]))
}

/// 格式化单个原子行（不含换行符）
pub fn format_atom_line(atom: &Atom) -> String {
    format!(
        "{:<6} {:10.5} {:10.5} {:10.5}",
        atom.label, atom.position[0], atom.position[1], atom.position[2]
    )
}

/// 将几何结构转换为 XYZ 格式字符串
pub fn to_xyz_string(geometry: &Geometry, title: &str) -> String {
    let mut result = String::new();
    result.push_str(&format!("{}\n", geometry.len()));
    result.push_str(&format!("{}\n", title));
    for atom in geometry {
        result.push_str(&format_atom_line(atom));
        result.push('\n');
    }
    result
}

/// 写入 .xyz 文件，返回实际写入的路径
///
/// 路径没有 `.xyz` 扩展名时自动追加；未指定标题时使用去掉扩展名的文件名。
pub fn write_xyz_file(geometry: &Geometry, path: &Path, title: Option<&str>) -> Result<PathBuf> {
    let path = ensure_xyz_extension(path);
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("geometry")
        .to_string();
    let title = title.unwrap_or(&default_title);

    fs::write(&path, to_xyz_string(geometry, title)).map_err(|e| {
        OrcaToolsError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        }
    })?;

    Ok(path)
}

/// 写入多帧轨迹文件，帧之间以 `>` 行分隔
pub fn write_trajectory(frames: &[Geometry], path: &Path) -> Result<()> {
    let content = frames
        .iter()
        .enumerate()
        .map(|(i, frame)| to_xyz_string(frame, &format!("PES calculation step {}", i + 1)))
        .collect::<Vec<_>>()
        .join(">\n");

    fs::write(path, content).map_err(|e| OrcaToolsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

fn ensure_xyz_extension(path: &Path) -> PathBuf {
    let is_xyz = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xyz"))
        .unwrap_or(false);

    if is_xyz {
        path.to_path_buf()
    } else {
        PathBuf::from(format!("{}.xyz", path.display()))
    }
}
