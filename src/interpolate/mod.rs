//! # 几何结构线性插值
//!
//! 在两个原子顺序一致的几何结构之间生成 `n` 个点（含两个端点），
//! 用于势能面扫描。端点原样复制，中间点逐原子、逐坐标线性插值，
//! 原子标签取自第一个结构。
//!
//! ```text
//! point_i[k] = a[k] + i * (b[k] - a[k]) / (n - 1)
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/interpolate.rs` 使用
//! - 使用 `models/geometry.rs`, `parsers/xyz.rs`

use crate::error::{OrcaToolsError, Result};
use crate::models::{Atom, Geometry};
use crate::parsers::xyz::{write_trajectory, write_xyz_file, GeometryInput};
use std::path::{Path, PathBuf};

/// 在 `a` 与 `b` 之间线性插值 `n` 个几何结构
pub fn interpolate(a: &Geometry, b: &Geometry, n: usize) -> Result<Vec<Geometry>> {
    if a.len() != b.len() {
        return Err(OrcaToolsError::AtomCountMismatch {
            first: a.len(),
            second: b.len(),
        });
    }
    if n < 2 {
        return Err(OrcaToolsError::InvalidPointCount(n));
    }

    let steps = (n - 1) as f64;
    let mut points = Vec::with_capacity(n);
    points.push(a.clone());

    for i in 1..n - 1 {
        let t = i as f64;
        let atoms = a
            .iter()
            .zip(b.iter())
            .map(|(start, end)| {
                let mut position = [0.0; 3];
                for (axis, value) in position.iter_mut().enumerate() {
                    let delta = (end.position[axis] - start.position[axis]) / steps;
                    *value = start.position[axis] + t * delta;
                }
                Atom::new(start.label.clone(), position)
            })
            .collect();
        points.push(Geometry::new(atoms));
    }

    points.push(b.clone());
    Ok(points)
}

/// 先解析两个几何输入（文件路径、内联文本或原子列表），再插值
pub fn interpolate_inputs(
    a: GeometryInput<'_>,
    b: GeometryInput<'_>,
    n: usize,
) -> Result<Vec<Geometry>> {
    let a = a.resolve()?;
    let b = b.resolve()?;
    interpolate(&a, &b, n)
}

/// 将插值点写为编号文件 `<prefix>_NN.xyz`（从 1 开始）
pub fn write_frames(frames: &[Geometry], dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let path = dir.join(frame_file_name(prefix, i + 1));
            let title = format!("PES calculation step {}", i + 1);
            write_xyz_file(frame, &path, Some(&title))
        })
        .collect()
}

/// 将插值点写为单个轨迹文件
pub fn write_frames_trajectory(frames: &[Geometry], path: &Path) -> Result<()> {
    write_trajectory(frames, path)
}

fn frame_file_name(prefix: &str, index: usize) -> String {
    format!("{}_{:02}.xyz", prefix, index)
}
