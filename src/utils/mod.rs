//! # 工具函数模块
//!
//! 提供美化输出、进度条和 ORCA 运行器调用。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/` 模块使用
//! - 子模块: output, progress, engine

pub mod engine;
pub mod output;
pub mod progress;
