// crates/rb_imageio/src/error.rs

//! 影像元数据错误类型

use rb_foundation::RbError;
use rb_native::NativeError;
use thiserror::Error;

/// 影像元数据结果类型
pub type MetadataResult<T> = Result<T, MetadataError>;

/// 影像元数据错误
#[derive(Debug, Error)]
pub enum MetadataError {
    /// 请求的元数据格式不受支持
    #[error("{0} is not a supported format name")]
    UnsupportedFormatName(String),

    /// 未知的属性类型标签
    #[error("Unknown attribute type '{0}'")]
    UnknownAttributeType(String),

    /// 未知的采样类型
    #[error("Unknown sample type '{0}'")]
    UnknownSampleType(String),

    /// 原生绑定错误
    #[error(transparent)]
    Native(#[from] NativeError),
}

impl From<MetadataError> for RbError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::UnsupportedFormatName(name) => RbError::unsupported_format(name),
            MetadataError::UnknownAttributeType(tag) | MetadataError::UnknownSampleType(tag) => {
                RbError::invalid_argument(format!("unknown type tag '{tag}'"))
            }
            MetadataError::Native(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rb_foundation::ErrorCategory;

    #[test]
    fn test_unsupported_format_message() {
        let err = MetadataError::UnsupportedFormatName("javax_imageio_1.0".into());
        assert_eq!(err.to_string(), "javax_imageio_1.0 is not a supported format name");
    }

    #[test]
    fn test_native_passthrough() {
        let err: MetadataError = NativeError::unavailable("gdal").into();
        let rb: RbError = err.into();
        assert_eq!(rb.category(), ErrorCategory::Unavailable);
    }
}
