//! # 输出文件收集器
//!
//! 在目录中收集待解析的 ORCA 输出文件。
//!
//! ## 功能
//! - 单文件输入直接返回
//! - 逗号分隔的多个 glob 模式（如 `*.out,*.log`）
//! - 可选递归搜索，结果按路径排序
//!
//! ## 依赖关系
//! - 被 `commands/summary.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{OrcaToolsError, Result};

use glob::Pattern;
use std::path::PathBuf;
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    input: PathBuf,
    patterns: Vec<String>,
    recursive: bool,
}

impl FileCollector {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec!["*.out".to_string()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        let patterns: Vec<String> = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !patterns.is_empty() {
            self.patterns = patterns;
        }
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }
        if !self.input.is_dir() {
            return Err(OrcaToolsError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let patterns = self
            .patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    OrcaToolsError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let walker = if self.recursive {
            WalkDir::new(&self.input)
        } else {
            WalkDir::new(&self.input).max_depth(1)
        };

        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|name| patterns.iter().any(|p| p.matches(name)))
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &std::path::Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_collect_matching_outputs() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.out"));
        touch(&dir.path().join("a.out"));
        touch(&dir.path().join("a.inp"));
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub").join("c.out"));

        let files = FileCollector::new(dir.path().to_path_buf())
            .collect()
            .unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.out", "b.out"]);

        let files = FileCollector::new(dir.path().to_path_buf())
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_multiple_patterns() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.out"));
        touch(&dir.path().join("b.log"));
        touch(&dir.path().join("c.inp"));

        let files = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.out, *.log")
            .collect()
            .unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_missing_directory() {
        let result = FileCollector::new(PathBuf::from("/nonexistent/orcatools/dir")).collect();
        assert!(matches!(
            result,
            Err(OrcaToolsError::DirectoryNotFound { .. })
        ));
    }
}
