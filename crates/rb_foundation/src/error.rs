// crates/rb_foundation/src/error.rs

//! 错误处理模块，定义跨层统一错误类型
//!
//! 提供 `RbError` 枚举和 `RbResult` 类型别名。各层 crate 定义自己的错误枚举
//! （`NativeError`、`MetadataError`、`ConfigError`），并实现到 `RbError` 的转换，
//! 以便在应用层统一处理。
//!
//! # 错误分类
//!
//! | 类别 | 含义 | 传播方式 |
//! |------|------|----------|
//! | `Unavailable` | 原生库缺失 | 显式结果值 |
//! | `InvalidArgument` | 调用方违反契约（空标识符等） | 立即失败 |
//! | `UnknownDriver` | 后端未注册该驱动 | 显式结果值 |
//! | `ResourceMisuse` | 重复关闭、关闭后使用 | 致命，不吸收 |
//!
//! 属性格式错误（MalformedAttribute）在本地吸收，不会出现在这里。
//!
//! # 示例
//!
//! ```
//! use rb_foundation::error::{RbError, RbResult};
//!
//! fn open_dataset(name: &str) -> RbResult<()> {
//!     if name.is_empty() {
//!         return Err(RbError::invalid_argument("数据集名称为空"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(open_dataset("").is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type RbResult<T> = Result<T, RbError>;

/// 错误类别
///
/// 决定错误的传播策略，见模块文档。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 原生库不可用
    Unavailable,
    /// 非法参数
    InvalidArgument,
    /// 未知驱动
    UnknownDriver,
    /// 资源误用
    ResourceMisuse,
    /// 环境或内部错误
    Environment,
}

impl ErrorCategory {
    /// 是否属于调用方编程错误
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidArgument | Self::ResourceMisuse)
    }
}

/// RasterBridge 错误类型
#[derive(Error, Debug)]
pub enum RbError {
    /// 原生库不可用
    #[error("原生库不可用: {library}")]
    Unavailable {
        /// 库名称
        library: String,
    },

    /// 非法参数
    #[error("非法参数: {message}")]
    InvalidArgument {
        /// 说明
        message: String,
    },

    /// 未知驱动
    #[error("未知驱动: {driver}")]
    UnknownDriver {
        /// 驱动名称
        driver: String,
    },

    /// 资源误用
    #[error("资源误用: {message}")]
    ResourceMisuse {
        /// 说明
        message: String,
    },

    /// 打开数据集失败
    #[error("打开数据集失败: {name}: {reason}")]
    OpenFailed {
        /// 数据集名称
        name: String,
        /// 失败原因
        reason: String,
    },

    /// 不支持的元数据格式
    #[error("不支持的格式名称: {format}")]
    UnsupportedFormat {
        /// 请求的格式名称
        format: String,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl RbError {
    /// 原生库不可用
    pub fn unavailable(library: impl Into<String>) -> Self {
        Self::Unavailable {
            library: library.into(),
        }
    }

    /// 非法参数
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// 未知驱动
    pub fn unknown_driver(driver: impl Into<String>) -> Self {
        Self::UnknownDriver {
            driver: driver.into(),
        }
    }

    /// 资源误用
    pub fn resource_misuse(message: impl Into<String>) -> Self {
        Self::ResourceMisuse {
            message: message.into(),
        }
    }

    /// 打开失败
    pub fn open_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OpenFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// 不支持的格式
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unavailable { .. } => ErrorCategory::Unavailable,
            Self::InvalidArgument { .. } => ErrorCategory::InvalidArgument,
            Self::UnknownDriver { .. } => ErrorCategory::UnknownDriver,
            Self::ResourceMisuse { .. } => ErrorCategory::ResourceMisuse,
            Self::UnsupportedFormat { .. } => ErrorCategory::InvalidArgument,
            Self::OpenFailed { .. }
            | Self::Config { .. }
            | Self::Io { .. }
            | Self::Internal { .. } => ErrorCategory::Environment,
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for RbError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RbError::unknown_driver("FAKE");
        assert!(err.to_string().contains("FAKE"));
    }

    #[test]
    fn test_categories() {
        assert_eq!(RbError::unavailable("gdal").category(), ErrorCategory::Unavailable);
        assert_eq!(
            RbError::invalid_argument("空名称").category(),
            ErrorCategory::InvalidArgument
        );
        assert_eq!(
            RbError::resource_misuse("重复关闭").category(),
            ErrorCategory::ResourceMisuse
        );
        assert_eq!(RbError::config("x").category(), ErrorCategory::Environment);
    }

    #[test]
    fn test_contract_violation() {
        assert!(ErrorCategory::ResourceMisuse.is_contract_violation());
        assert!(ErrorCategory::InvalidArgument.is_contract_violation());
        assert!(!ErrorCategory::Unavailable.is_contract_violation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let rb_err: RbError = io_err.into();
        assert!(matches!(rb_err, RbError::Io { source: Some(_), .. }));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(name: &str) -> RbResult<()> {
            crate::ensure!(!name.is_empty(), RbError::invalid_argument("名称为空"));
            Ok(())
        }

        assert!(check("GTiff").is_ok());
        assert!(check("").is_err());
    }
}
