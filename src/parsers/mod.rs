//! # 解析器模块
//!
//! ORCA 输出 / 输入文件与 XYZ 几何结构的读写。
//!
//! ## 依赖关系
//! - 被 `commands/`, `interpolate/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: orca_out, orca_inp, xyz

pub mod orca_inp;
pub mod orca_out;
pub mod xyz;
