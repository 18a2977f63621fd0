//! # interpolate 子命令实现
//!
//! 读取两个几何结构（文件或内联文本），线性插值后写出编号的 .xyz 文件
//! 或单个多帧轨迹文件。
//!
//! ## 依赖关系
//! - 使用 `cli/interpolate.rs` 定义的参数
//! - 使用 `interpolate/`, `parsers/xyz.rs`

use crate::cli::interpolate::InterpolateArgs;
use crate::error::{OrcaToolsError, Result};
use crate::interpolate;
use crate::parsers::xyz::GeometryInput;
use crate::utils::output;

use std::fs;

/// 执行 interpolate
pub fn execute(args: InterpolateArgs) -> Result<()> {
    output::print_header("Geometry Interpolation");

    let frames = interpolate::interpolate_inputs(
        GeometryInput::Text(&args.first),
        GeometryInput::Text(&args.second),
        args.points,
    )?;

    let atoms = frames.first().map(|g| g.len()).unwrap_or(0);
    output::print_info(&format!(
        "Interpolated {} points between geometries of {} atoms",
        frames.len(),
        atoms
    ));

    if let Some(path) = &args.trajectory {
        interpolate::write_frames_trajectory(&frames, path)?;
        output::print_written("Trajectory", path);
        return Ok(());
    }

    fs::create_dir_all(&args.output_dir).map_err(|e| OrcaToolsError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;

    let written = interpolate::write_frames(&frames, &args.output_dir, &args.prefix)?;
    if let (Some(first), Some(last)) = (written.first(), written.last()) {
        output::print_success(&format!(
            "Wrote {} files: {} ... {}",
            written.len(),
            first.display(),
            last.display()
        ));
    }

    Ok(())
}
