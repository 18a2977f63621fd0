//! # ORCA 运行器调用
//!
//! 通过外部运行脚本（通常为 `orca_run`）启动 ORCA：
//! ```text
//! <exec> -i <input> [-n N] [-m MB] [-a "file1 file2"] [-o output]
//! ```
//! 运行器路径、并行数、内存和工作目录都由 `EngineConfig` 显式给出，
//! 这里不读取任何环境变量。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用

use crate::error::{OrcaToolsError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// ORCA 运行配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// 运行器可执行文件
    pub executable: PathBuf,
    /// 并行进程数 (-n)
    pub nprocs: Option<u32>,
    /// 每核内存 MB (-m)
    pub maxcore: Option<u32>,
    /// 输出文件 (-o)
    pub output: Option<PathBuf>,
    /// 需要一起复制的附加文件 (-a)
    pub extra_files: Vec<PathBuf>,
    /// 工作目录
    pub workdir: Option<PathBuf>,
}

impl EngineConfig {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        EngineConfig {
            executable: executable.into(),
            nprocs: None,
            maxcore: None,
            output: None,
            extra_files: Vec::new(),
            workdir: None,
        }
    }

    pub fn with_nprocs(mut self, nprocs: u32) -> Self {
        self.nprocs = Some(nprocs);
        self
    }

    pub fn with_maxcore(mut self, maxcore: u32) -> Self {
        self.maxcore = Some(maxcore);
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_extra_files(mut self, files: Vec<PathBuf>) -> Self {
        self.extra_files = files;
        self
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    /// 运行器参数列表
    ///
    /// 设置工作目录时，相对的输入文件和附加文件按调用者的当前目录转为绝对路径；
    /// 输出文件 (-o) 由运行器在工作目录中写出，保持原样。
    pub fn arguments(&self, input: &Path) -> Result<Vec<String>> {
        let mut args = vec!["-i".to_string(), self.caller_path(input)?.display().to_string()];

        if let Some(n) = self.nprocs {
            args.push("-n".to_string());
            args.push(n.to_string());
        }
        if let Some(m) = self.maxcore {
            args.push("-m".to_string());
            args.push(m.to_string());
        }
        if !self.extra_files.is_empty() {
            let files = self
                .extra_files
                .iter()
                .map(|f| self.caller_path(f).map(|p| p.display().to_string()))
                .collect::<Result<Vec<String>>>()?;
            args.push("-a".to_string());
            args.push(files.join(" "));
        }
        if let Some(out) = &self.output {
            args.push("-o".to_string());
            args.push(out.display().to_string());
        }

        Ok(args)
    }

    /// 子进程中可用的调用者路径
    fn caller_path(&self, path: &Path) -> Result<PathBuf> {
        if self.workdir.is_none() || path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let cwd = std::env::current_dir().map_err(|e| OrcaToolsError::FileReadError {
            path: ".".to_string(),
            source: e,
        })?;
        Ok(cwd.join(path))
    }

    /// 构造进程命令
    pub fn build_command(&self, input: &Path) -> Result<Command> {
        let mut cmd = Command::new(&self.executable);
        cmd.args(self.arguments(input)?);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }

    /// 可打印的命令行（`-a` 参数加引号）
    pub fn command_line(&self, input: &Path) -> Result<String> {
        let mut parts = vec![self.executable.display().to_string()];
        for arg in self.arguments(input)? {
            if arg.contains(' ') {
                parts.push(format!("\"{}\"", arg));
            } else {
                parts.push(arg);
            }
        }
        Ok(parts.join(" "))
    }

    /// 运行 ORCA 并等待结束
    pub fn run(&self, input: &Path) -> Result<()> {
        let command = self.command_line(input)?;
        let out = self.build_command(input)?.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OrcaToolsError::CommandNotFound {
                    command: self.executable.display().to_string(),
                }
            } else {
                OrcaToolsError::CommandFailed {
                    command: command.clone(),
                    stderr: e.to_string(),
                }
            }
        })?;

        if !out.status.success() {
            return Err(OrcaToolsError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let config = EngineConfig::new("orca_run");
        assert_eq!(
            config.arguments(Path::new("water.inp")).unwrap(),
            vec!["-i", "water.inp"]
        );
    }

    #[test]
    fn test_full_command_line() {
        let config = EngineConfig::new("/opt/orca/orca_run")
            .with_nprocs(8)
            .with_maxcore(2000)
            .with_extra_files(vec![PathBuf::from("guess.gbw"), PathBuf::from("ext.xyz")])
            .with_output("water.out");

        assert_eq!(
            config.command_line(Path::new("water.inp")).unwrap(),
            "/opt/orca/orca_run -i water.inp -n 8 -m 2000 -a \"guess.gbw ext.xyz\" -o water.out"
        );
    }

    #[test]
    fn test_build_command_uses_workdir() {
        let config = EngineConfig::new("orca_run").with_workdir("/scratch/job");
        let cmd = config.build_command(Path::new("/data/water.inp")).unwrap();

        assert_eq!(cmd.get_program(), "orca_run");
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/scratch/job")));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["-i", "/data/water.inp"]);
    }

    #[test]
    fn test_workdir_resolves_caller_paths() {
        let cwd = std::env::current_dir().unwrap();
        let config = EngineConfig::new("orca_run")
            .with_workdir("/scratch/job")
            .with_extra_files(vec![PathBuf::from("guess.gbw")])
            .with_output("water.out");

        let cmd = config.build_command(Path::new("water.inp")).unwrap();
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(args[0], "-i");
        assert_eq!(args[1], cwd.join("water.inp").display().to_string());
        assert_eq!(args[3], cwd.join("guess.gbw").display().to_string());
        assert_eq!(args[5], "water.out");
    }

    #[test]
    fn test_missing_executable() {
        let config = EngineConfig::new("orcatools-no-such-runner");
        assert!(matches!(
            config.run(Path::new("water.inp")),
            Err(OrcaToolsError::CommandNotFound { .. })
        ));
    }
}
