//! # 统一错误处理模块
//!
//! 定义 orcatools 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// `load` 必需的输出标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredMarker {
    /// FINAL SINGLE POINT ENERGY
    Energy,
    /// CARTESIAN COORDINATES (ANGSTROEM)
    Geometry,
    /// TOTAL RUN TIME
    RunTime,
}

impl std::fmt::Display for RequiredMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequiredMarker::Energy => write!(f, "final single point energy"),
            RequiredMarker::Geometry => write!(f, "final cartesian coordinates"),
            RequiredMarker::RunTime => write!(f, "total run time"),
        }
    }
}

/// orcatools 统一错误类型
#[derive(Error, Debug)]
pub enum OrcaToolsError {
    // ─────────────────────────────────────────────────────────────
    // ORCA 输出解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("ORCA did not terminate normally: {path}")]
    AbnormalTermination { path: String },

    #[error("Missing {kind} in ORCA output: {path}")]
    MissingRequiredMarker { path: String, kind: RequiredMarker },

    #[error("Cannot extract {property}: {reason}")]
    WrongCalculationType { property: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 几何结构错误
    // ─────────────────────────────────────────────────────────────
    #[error("Geometries differ in atom count: {first} vs {second}")]
    AtomCountMismatch { first: usize, second: usize },

    #[error("Interpolation needs at least 2 points, got {0}")]
    InvalidPointCount(usize),

    #[error("Invalid geometry input: {0}")]
    InvalidGeometryInput(String),

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl OrcaToolsError {
    /// 构造 `WrongCalculationType`
    pub fn wrong_calculation(property: &str, reason: impl Into<String>) -> Self {
        OrcaToolsError::WrongCalculationType {
            property: property.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, OrcaToolsError>;
