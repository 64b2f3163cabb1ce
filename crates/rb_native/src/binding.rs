// crates/rb_native/src/binding.rs

//! 原生库绑定
//!
//! [`NativeLibraryBinding`] 负责：
//!
//! - 一次性加载原生库并注册驱动，结果永久记忆（包括失败）
//! - 串行化数据集的打开与关闭
//! - 缓存驱动写入能力
//! - 影像级 / 数据流级元数据的便捷读取
//!
//! 原生库不可用不是致命错误：所有依赖原生库的操作返回 `NativeError::Unavailable`。

use parking_lot::Mutex;
use rb_config::BridgeConfig;
use rb_foundation::{Counter, SessionStats};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::backend::{AccessMode, DefaultBackend, NativeBackend};
use crate::capability::{CreationStrategy, DriverCapability, DriverCapabilityCache};
use crate::dataset::DatasetHandle;
use crate::domain::{MetadataDomain, MetadataList};
use crate::error::{NativeError, NativeResult};

/// 原生库绑定
pub struct NativeLibraryBinding<B: NativeBackend> {
    backend: B,
    config: BridgeConfig,
    available: OnceLock<bool>,
    load_attempts: Counter,
    capabilities: DriverCapabilityCache,
    session: Mutex<()>,
    opened: Counter,
    closed: Counter,
}

static GLOBAL: OnceLock<NativeLibraryBinding<DefaultBackend>> = OnceLock::new();

impl NativeLibraryBinding<DefaultBackend> {
    /// 进程级绑定
    ///
    /// 配置来自环境变量；环境变量无效时记录警告并使用默认配置。
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            let config = BridgeConfig::from_env().unwrap_or_else(|e| {
                warn!(error = %e, "invalid bridge configuration in environment, using defaults");
                BridgeConfig::default()
            });
            Self::new(DefaultBackend::default(), config)
        })
    }
}

impl<B: NativeBackend> NativeLibraryBinding<B> {
    /// 创建绑定，此时不加载原生库
    pub fn new(backend: B, config: BridgeConfig) -> Self {
        Self {
            backend,
            config,
            available: OnceLock::new(),
            load_attempts: Counter::new(),
            capabilities: DriverCapabilityCache::new(),
            session: Mutex::new(()),
            opened: Counter::new(),
            closed: Counter::new(),
        }
    }

    /// 后端
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 配置
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    // ========================================================================
    // 初始化
    // ========================================================================

    /// 确保原生库已加载，返回是否可用
    ///
    /// 只有第一次调用会尝试加载；并发的首次调用中只有一个线程执行加载，
    /// 其余线程等待并观察同一结果。加载失败后不会重试。
    pub fn ensure_loaded(&self) -> bool {
        *self.available.get_or_init(|| self.load())
    }

    /// 原生库是否可用（必要时触发加载）
    pub fn is_available(&self) -> bool {
        self.ensure_loaded()
    }

    /// 是否已经完成初始化（不触发加载）
    pub fn is_initialized(&self) -> bool {
        self.available.get().is_some()
    }

    /// 加载尝试次数
    pub fn load_attempts(&self) -> u64 {
        self.load_attempts.get()
    }

    fn load(&self) -> bool {
        self.load_attempts.inc();
        let library = self.config.library_name.as_str();

        match self.backend.load() {
            Ok(()) => {
                self.backend.register_all();
                if !self.config.native_debug {
                    self.backend.push_quiet_error_handler();
                }
                info!(library, "native library loaded");
                true
            }
            Err(e) => {
                warn!(library, error = %e, "native library load failed");
                false
            }
        }
    }

    fn require_available(&self) -> NativeResult<()> {
        if self.ensure_loaded() {
            Ok(())
        } else {
            Err(NativeError::unavailable(&self.config.library_name))
        }
    }

    // ========================================================================
    // 数据集会话
    // ========================================================================

    /// 打开数据集
    ///
    /// 原生库不可用时返回 `Unavailable`，不发起任何原生调用。
    pub fn acquire(&self, name: &str, mode: AccessMode) -> NativeResult<DatasetHandle<'_, B>> {
        if name.trim().is_empty() {
            return Err(NativeError::InvalidArgument(
                "dataset name is empty".to_string(),
            ));
        }
        self.require_available()?;

        let dataset = {
            let _session = self.session.lock();
            self.backend.open(name, mode)?
        };
        self.opened.inc();
        debug!(dataset = name, %mode, "dataset opened");
        Ok(DatasetHandle::new(self, name.to_string(), mode, dataset))
    }

    /// 在作用域内使用数据集，任何退出路径都会关闭句柄
    pub fn with_dataset<T, E, F>(&self, name: &str, mode: AccessMode, f: F) -> Result<T, E>
    where
        F: FnOnce(&DatasetHandle<'_, B>) -> Result<T, E>,
        E: From<NativeError>,
    {
        let mut handle = self.acquire(name, mode)?;
        let result = f(&handle);
        let closed = handle.close();
        let value = result?;
        closed?;
        Ok(value)
    }

    pub(crate) fn release(&self, dataset: B::Dataset) {
        let _session = self.session.lock();
        self.backend.close(dataset);
        self.closed.inc();
    }

    /// 打开/关闭统计
    pub fn session_stats(&self) -> SessionStats {
        SessionStats {
            opened: self.opened.get(),
            closed: self.closed.get(),
        }
    }

    // ========================================================================
    // 元数据便捷读取
    // ========================================================================

    /// 读取数据集某个域的全部条目（只读打开，读取后立即关闭）
    pub fn domain_metadata(&self, name: &str, domain: &MetadataDomain) -> NativeResult<MetadataList> {
        self.with_dataset(name, AccessMode::ReadOnly, |handle| handle.metadata(domain))
    }

    /// 影像级元数据（默认域）
    ///
    /// 只读默认域，从不回退到 `SUBDATASETS`。
    pub fn image_metadata(&self, name: &str) -> NativeResult<MetadataList> {
        self.domain_metadata(name, &MetadataDomain::Default)
    }

    /// 数据流级元数据（`SUBDATASETS` 域），描述整个数据集
    pub fn stream_metadata(&self, name: &str) -> NativeResult<MetadataList> {
        self.domain_metadata(name, &MetadataDomain::Subdatasets)
    }

    /// 数据流级元数据项，例如某个子数据集的名称或描述
    pub fn stream_metadata_item(&self, key: &str, name: &str) -> NativeResult<Option<String>> {
        Ok(self.stream_metadata(name)?.lookup(key).map(str::to_string))
    }

    /// 影像级元数据项
    pub fn image_metadata_item(&self, key: &str, name: &str) -> NativeResult<Option<String>> {
        Ok(self.image_metadata(name)?.lookup(key).map(str::to_string))
    }

    // ========================================================================
    // 驱动能力
    // ========================================================================

    /// 驱动是否已注册
    ///
    /// 原生库不可用时返回 `false`。
    pub fn is_driver_available(&self, driver: &str) -> bool {
        !driver.is_empty()
            && self.ensure_loaded()
            && self.backend.driver_metadata(driver).is_some()
    }

    /// 驱动写入能力
    pub fn capability_of(&self, driver: &str) -> NativeResult<DriverCapability> {
        if driver.trim().is_empty() {
            return Err(NativeError::InvalidArgument(
                "driver name is empty".to_string(),
            ));
        }
        self.require_available()?;

        self.capabilities.get_or_discover(driver, |driver| {
            let entries = self
                .backend
                .driver_metadata(driver)
                .ok_or_else(|| NativeError::UnknownDriver(driver.to_string()))?;
            Ok(DriverCapability::from_driver_metadata(&entries))
        })
    }

    /// 写入策略
    pub fn creation_strategy(
        &self,
        driver: &str,
        estimated_bytes: u64,
    ) -> NativeResult<CreationStrategy> {
        let capability = self.capability_of(driver)?;
        Ok(CreationStrategy::choose(
            capability,
            estimated_bytes,
            self.config.memory_raster_max_size,
        ))
    }

    /// 驱动能力缓存
    pub fn capability_cache(&self) -> &DriverCapabilityCache {
        &self.capabilities
    }
}
