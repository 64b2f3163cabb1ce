// crates/rb_native/src/gdal_backend.rs

//! GDAL 后端实现
//!
//! 需要启用 `gdal` feature 并安装 GDAL 库。
//!
//! 启用该 feature 后 libgdal 在构建期链接：库缺失时进程在启动阶段
//! 就由动态链接器终止，到不了 [`NativeBackend::load`]。因此 `load`
//! 只查询 `VersionInfo` 确认符号可用，无法报告“库未安装”；
//! `BridgeConfig::library_name` 只用于日志与错误信息，不影响加载哪个库。

use gdal::{Dataset, DatasetOptions, DriverManager, GdalOpenFlags, Metadata};
use tracing::debug;

use crate::backend::{AccessMode, NativeBackend};
use crate::error::{NativeError, NativeResult};

/// GDAL 后端
#[derive(Debug, Default, Clone, Copy)]
pub struct GdalBackend;

impl NativeBackend for GdalBackend {
    type Dataset = Dataset;

    fn load(&self) -> NativeResult<()> {
        // 首次调用会解析共享库符号
        let release = gdal::version::VersionInfo::version_info("RELEASE_NAME");
        if release.trim().is_empty() {
            return Err(NativeError::Native(
                "GDAL did not report a release name".to_string(),
            ));
        }
        debug!(release = %release, "GDAL library resolved");
        Ok(())
    }

    fn register_all(&self) {
        DriverManager::register_all();
    }

    fn push_quiet_error_handler(&self) {
        gdal::config::set_error_handler(|class, code, message: &str| {
            debug!(target: "rb_native::gdal", ?class, code, "{}", message);
        });
    }

    fn open(&self, name: &str, mode: AccessMode) -> NativeResult<Self::Dataset> {
        let access = match mode {
            AccessMode::ReadOnly => GdalOpenFlags::GDAL_OF_READONLY,
            AccessMode::ReadWrite => GdalOpenFlags::GDAL_OF_UPDATE,
        };
        let options = DatasetOptions {
            open_flags: access | GdalOpenFlags::GDAL_OF_RASTER,
            ..Default::default()
        };
        Dataset::open_ex(name, options).map_err(|e| NativeError::open_failed(name, e.to_string()))
    }

    fn close(&self, dataset: Self::Dataset) {
        drop(dataset);
    }

    fn driver_metadata(&self, driver: &str) -> Option<Vec<String>> {
        let driver = DriverManager::get_driver_by_name(driver).ok()?;
        Some(driver.metadata_domain("").unwrap_or_default())
    }

    fn metadata(&self, dataset: &Self::Dataset, domain: &str) -> Vec<String> {
        dataset.metadata_domain(domain).unwrap_or_default()
    }

    fn metadata_domains(&self, dataset: &Self::Dataset) -> Vec<String> {
        dataset.metadata_domains()
    }
}
