// crates/rb_native/src/error.rs

//! 原生绑定错误类型

use rb_foundation::{ErrorCategory, RbError};
use thiserror::Error;

/// 原生绑定结果类型
pub type NativeResult<T> = Result<T, NativeError>;

/// 原生绑定错误
#[derive(Debug, Error)]
pub enum NativeError {
    /// 原生库不可用
    #[error("Native library '{library}' is not available")]
    Unavailable {
        /// 库名称
        library: String,
    },

    /// 非法参数（空数据集名称、空驱动名称等）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 后端未注册的驱动
    #[error("Driver '{0}' is unavailable, check the name or make sure the driver is supported")]
    UnknownDriver(String),

    /// 打开数据集失败
    #[error("Failed to open dataset '{name}': {reason}")]
    OpenFailed {
        /// 数据集名称
        name: String,
        /// 失败原因
        reason: String,
    },

    /// 资源误用：重复关闭或关闭后继续使用
    #[error("Resource misuse: {0}")]
    ResourceMisuse(String),

    /// 原生库内部错误
    #[error("Native error: {0}")]
    Native(String),
}

impl NativeError {
    /// 不可用
    pub fn unavailable(library: impl Into<String>) -> Self {
        Self::Unavailable {
            library: library.into(),
        }
    }

    /// 打开失败
    pub fn open_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OpenFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// 错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unavailable { .. } => ErrorCategory::Unavailable,
            Self::InvalidArgument(_) => ErrorCategory::InvalidArgument,
            Self::UnknownDriver(_) => ErrorCategory::UnknownDriver,
            Self::ResourceMisuse(_) => ErrorCategory::ResourceMisuse,
            Self::OpenFailed { .. } | Self::Native(_) => ErrorCategory::Environment,
        }
    }

    /// 是否为原生库不可用
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

impl From<NativeError> for RbError {
    fn from(err: NativeError) -> Self {
        match err {
            NativeError::Unavailable { library } => RbError::unavailable(library),
            NativeError::InvalidArgument(msg) => RbError::invalid_argument(msg),
            NativeError::UnknownDriver(driver) => RbError::unknown_driver(driver),
            NativeError::OpenFailed { name, reason } => RbError::open_failed(name, reason),
            NativeError::ResourceMisuse(msg) => RbError::resource_misuse(msg),
            NativeError::Native(msg) => RbError::internal(msg),
        }
    }
}

#[cfg(feature = "gdal")]
impl From<gdal::errors::GdalError> for NativeError {
    fn from(e: gdal::errors::GdalError) -> Self {
        NativeError::Native(e.to_string())
    }
}
