//! # run 子命令实现
//!
//! 通过 ORCA 运行脚本执行输入文件；指定输出文件时，结束后读取并报告最终能量。
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `utils/engine.rs`, `utils/progress.rs`, `parsers/orca_out.rs`

use crate::cli::run::RunArgs;
use crate::error::{OrcaToolsError, Result};
use crate::parsers::orca_inp::OrcaInput;
use crate::parsers::orca_out;
use crate::utils::engine::EngineConfig;
use crate::utils::{output, progress};

/// 由命令行参数构造运行配置
fn engine_config(args: &RunArgs) -> EngineConfig {
    let mut config = EngineConfig::new(&args.orca_run).with_extra_files(args.extra.clone());
    if let Some(n) = args.nprocs {
        config = config.with_nprocs(n);
    }
    if let Some(m) = args.maxcore {
        config = config.with_maxcore(m);
    }
    if let Some(out) = &args.output {
        config = config.with_output(out);
    }
    if let Some(dir) = &args.workdir {
        config = config.with_workdir(dir);
    }
    config
}

/// 执行 run
pub fn execute(args: RunArgs) -> Result<()> {
    output::print_header("Run ORCA");

    if !args.input.is_file() {
        return Err(OrcaToolsError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let mut config = engine_config(&args);

    // 读取输入文件概要；MORead 的初始轨道随输入一起复制
    match OrcaInput::read_deck(&args.input) {
        Ok(deck) => {
            output::print_info(&format!(
                "{} | charge {} | multiplicity {} | {} atoms",
                deck.simple_input.replace('\n', " "),
                deck.charge,
                deck.multiplicity,
                deck.geometry.len()
            ));
            if let Some(guess) = deck.guess {
                if !config.extra_files.contains(&guess) {
                    config.extra_files.push(guess);
                }
            }
        }
        Err(e) => output::print_warning(&format!("Could not read input summary: {}", e)),
    }

    let command_line = config.command_line(&args.input)?;

    if args.dry_run {
        output::print_info(&format!("Dry run: {}", command_line));
        return Ok(());
    }

    output::print_info(&command_line);
    let spinner = progress::create_spinner(&format!("Running {}", args.input.display()));
    let result = config.run(&args.input);
    spinner.finish_and_clear();
    result?;

    output::print_done(&format!("ORCA finished: {}", args.input.display()));

    if let Some(out) = &args.output {
        let out = match &args.workdir {
            Some(dir) if out.is_relative() => dir.join(out),
            _ => out.clone(),
        };
        match orca_out::load_run(&out) {
            Ok(run) => output::print_success(&format!(
                "{}: E = {:.9} Eh",
                run.run_kind, run.scf_energy
            )),
            Err(e) => output::print_warning(&e.to_string()),
        }
    }

    Ok(())
}
