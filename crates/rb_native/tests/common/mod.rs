// crates/rb_native/tests/common/mod.rs

//! 计数桩后端

#![allow(dead_code)]

use rb_config::BridgeConfig;
use rb_foundation::Counter;
use rb_native::{AccessMode, NativeBackend, NativeError, NativeLibraryBinding, NativeResult};
use std::collections::HashMap;

/// 桩数据集
#[derive(Debug)]
pub struct StubDataset {
    pub name: String,
    pub mode: AccessMode,
}

/// 记录每类原生调用次数的后端
#[derive(Default)]
pub struct StubBackend {
    pub fail_load: bool,
    pub loads: Counter,
    pub registrations: Counter,
    pub quiet_handlers: Counter,
    pub opens: Counter,
    pub closes: Counter,
    pub driver_queries: Counter,
    drivers: HashMap<String, Vec<String>>,
    datasets: HashMap<String, HashMap<String, Vec<String>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub fn with_driver(mut self, name: &str, entries: &[&str]) -> Self {
        self.drivers
            .insert(name.to_string(), entries.iter().map(|e| e.to_string()).collect());
        self
    }

    pub fn with_metadata(mut self, dataset: &str, domain: &str, entries: &[&str]) -> Self {
        self.datasets
            .entry(dataset.to_string())
            .or_default()
            .insert(domain.to_string(), entries.iter().map(|e| e.to_string()).collect());
        self
    }

    pub fn into_binding(self) -> NativeLibraryBinding<StubBackend> {
        NativeLibraryBinding::new(self, BridgeConfig::default())
    }
}

impl NativeBackend for StubBackend {
    type Dataset = StubDataset;

    fn load(&self) -> NativeResult<()> {
        self.loads.inc();
        if self.fail_load {
            Err(NativeError::Native("libgdal.so: cannot open shared object file".into()))
        } else {
            Ok(())
        }
    }

    fn register_all(&self) {
        self.registrations.inc();
    }

    fn push_quiet_error_handler(&self) {
        self.quiet_handlers.inc();
    }

    fn open(&self, name: &str, mode: AccessMode) -> NativeResult<Self::Dataset> {
        if !self.datasets.contains_key(name) {
            return Err(NativeError::open_failed(name, "no such file"));
        }
        self.opens.inc();
        Ok(StubDataset {
            name: name.to_string(),
            mode,
        })
    }

    fn close(&self, _dataset: Self::Dataset) {
        self.closes.inc();
    }

    fn driver_metadata(&self, driver: &str) -> Option<Vec<String>> {
        self.driver_queries.inc();
        self.drivers.get(driver).cloned()
    }

    fn metadata(&self, dataset: &Self::Dataset, domain: &str) -> Vec<String> {
        self.datasets
            .get(&dataset.name)
            .and_then(|domains| domains.get(domain))
            .cloned()
            .unwrap_or_default()
    }

    fn metadata_domains(&self, dataset: &Self::Dataset) -> Vec<String> {
        let mut names: Vec<String> = self
            .datasets
            .get(&dataset.name)
            .map(|domains| domains.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
