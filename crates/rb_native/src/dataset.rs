// crates/rb_native/src/dataset.rs

//! 数据集句柄
//!
//! [`DatasetHandle`] 独占一个原生数据集。句柄状态只会从打开变为关闭：
//!
//! - 重复关闭、关闭后读取元数据都返回 [`NativeError::ResourceMisuse`]
//! - 句柄离开作用域时若仍打开，`Drop` 负责释放
//!
//! 原生库不保证单个数据集的并发安全，因此句柄不实现共享访问。

use tracing::{debug, error};

use crate::backend::{AccessMode, NativeBackend};
use crate::binding::NativeLibraryBinding;
use crate::domain::{MetadataDomain, MetadataList};
use crate::error::{NativeError, NativeResult};

/// 数据集句柄
pub struct DatasetHandle<'b, B: NativeBackend> {
    binding: &'b NativeLibraryBinding<B>,
    name: String,
    mode: AccessMode,
    dataset: Option<B::Dataset>,
}

impl<'b, B: NativeBackend> DatasetHandle<'b, B> {
    pub(crate) fn new(
        binding: &'b NativeLibraryBinding<B>,
        name: String,
        mode: AccessMode,
        dataset: B::Dataset,
    ) -> Self {
        Self {
            binding,
            name,
            mode,
            dataset: Some(dataset),
        }
    }

    /// 数据集名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 访问模式
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// 是否仍处于打开状态
    pub fn is_open(&self) -> bool {
        self.dataset.is_some()
    }

    /// 原生数据集引用
    pub fn native(&self) -> NativeResult<&B::Dataset> {
        self.dataset.as_ref().ok_or_else(|| self.misuse("use after close"))
    }

    /// 读取指定域的元数据，域中没有条目时返回空列表
    pub fn metadata(&self, domain: &MetadataDomain) -> NativeResult<MetadataList> {
        let dataset = self.native()?;
        let entries = self.binding.backend().metadata(dataset, domain.as_str());
        Ok(MetadataList::new(domain.clone(), entries))
    }

    /// 数据集报告的元数据域
    pub fn metadata_domains(&self) -> NativeResult<Vec<MetadataDomain>> {
        let dataset = self.native()?;
        Ok(self
            .binding
            .backend()
            .metadata_domains(dataset)
            .iter()
            .map(|name| MetadataDomain::parse(name))
            .collect())
    }

    /// 关闭数据集
    ///
    /// 已关闭的句柄再次关闭返回 `ResourceMisuse`。
    pub fn close(&mut self) -> NativeResult<()> {
        let dataset = self.dataset.take().ok_or_else(|| self.misuse("double close"))?;
        self.binding.release(dataset);
        debug!(dataset = %self.name, "dataset closed");
        Ok(())
    }

    fn misuse(&self, what: &str) -> NativeError {
        error!(dataset = %self.name, "{} on dataset handle", what);
        NativeError::ResourceMisuse(format!("{} on dataset '{}'", what, self.name))
    }
}

impl<B: NativeBackend> Drop for DatasetHandle<'_, B> {
    fn drop(&mut self) {
        if let Some(dataset) = self.dataset.take() {
            self.binding.release(dataset);
            debug!(dataset = %self.name, "dataset released on drop");
        }
    }
}

impl<B: NativeBackend> std::fmt::Debug for DatasetHandle<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetHandle")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("open", &self.is_open())
            .finish()
    }
}
