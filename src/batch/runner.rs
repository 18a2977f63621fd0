//! # 批量执行器
//!
//! 在 rayon 线程池中并行处理文件列表，每个文件互不共享状态。
//!
//! ## 功能
//! - 进度条显示
//! - 成功结果按输入顺序保留
//! - 失败文件与错误信息汇总
//!
//! ## 依赖关系
//! - 被 `commands/summary.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{OrcaToolsError, Result};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 批量处理结果
#[derive(Debug)]
pub struct BatchResult<T> {
    /// 成功结果（保持输入顺序）
    pub succeeded: Vec<T>,
    /// 失败详情 (文件路径, 错误信息)
    pub failures: Vec<(String, String)>,
}

impl<T> BatchResult<T> {
    pub fn success(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.success() + self.failed()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// `jobs == 0` 时使用全部 CPU 核
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表
    pub fn run<T, F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult<T>>
    where
        T: Send,
        F: Fn(&Path) -> Result<T> + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Parsing");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| OrcaToolsError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<(PathBuf, Result<T>)> = pool.install(|| {
            files
                .into_par_iter()
                .map(|file| {
                    let result = processor(file.as_path());
                    pb.inc(1);
                    (file, result)
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch = BatchResult {
            succeeded: Vec::with_capacity(results.len()),
            failures: Vec::new(),
        };
        for (file, result) in results {
            match result {
                Ok(value) => batch.succeeded.push(value),
                Err(e) => batch
                    .failures
                    .push((file.display().to_string(), e.to_string())),
            }
        }

        Ok(batch)
    }
}
