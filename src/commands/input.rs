//! # input 子命令实现
//!
//! 由几何结构、关键词和块输入生成 ORCA 输入文件。
//!
//! ## 依赖关系
//! - 使用 `cli/input.rs` 定义的参数
//! - 使用 `parsers/orca_inp.rs`, `parsers/xyz.rs`

use crate::cli::input::InputArgs;
use crate::error::{OrcaToolsError, Result};
use crate::parsers::orca_inp::OrcaInput;
use crate::parsers::xyz::GeometryInput;
use crate::utils::output;

/// 执行 input
pub fn execute(args: InputArgs) -> Result<()> {
    output::print_header("ORCA Input");

    if args.mult == 0 {
        return Err(OrcaToolsError::InvalidArgument(
            "Multiplicity must be at least 1".to_string(),
        ));
    }

    let geometry = GeometryInput::Text(&args.xyz).resolve()?;
    output::print_info(&format!(
        "Geometry: {} ({} atoms)",
        geometry.formula(),
        geometry.len()
    ));

    let mut input = OrcaInput::new(&args.keywords, &args.blocks, geometry)?
        .with_charge(args.charge)
        .with_multiplicity(args.mult);

    if let Some(guess) = &args.guess {
        if !guess.is_file() {
            output::print_warning(&format!(
                "Guess orbital file '{}' does not exist yet",
                guess.display()
            ));
        }
        input = input.with_guess(guess.clone());
    }

    input.write(&args.output)?;
    output::print_written("ORCA input", &args.output);

    Ok(())
}
