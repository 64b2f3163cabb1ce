// crates/rb_native/tests/session_lock.rs

//! 会话锁串行化测试
//!
//! 多线程同时打开、读取、关闭数据集，检查原生打开/关闭调用从不重叠。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use rb_config::BridgeConfig;
use rb_native::{AccessMode, MetadataDomain, NativeBackend, NativeLibraryBinding, NativeResult};

const THREADS: usize = 8;
const ROUNDS: usize = 10;

/// 记录原生调用重叠次数的后端
#[derive(Default)]
struct OverlapBackend {
    in_call: AtomicBool,
    overlaps: AtomicUsize,
    calls: AtomicUsize,
}

impl OverlapBackend {
    fn native_call(&self) {
        if self.in_call.swap(true, Ordering::SeqCst) {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(1));
        self.in_call.store(false, Ordering::SeqCst);
    }
}

impl NativeBackend for OverlapBackend {
    type Dataset = String;

    fn load(&self) -> NativeResult<()> {
        Ok(())
    }

    fn register_all(&self) {}

    fn push_quiet_error_handler(&self) {}

    fn open(&self, name: &str, _mode: AccessMode) -> NativeResult<String> {
        self.native_call();
        Ok(name.to_string())
    }

    fn close(&self, _dataset: String) {
        self.native_call();
    }

    fn driver_metadata(&self, _driver: &str) -> Option<Vec<String>> {
        None
    }

    fn metadata(&self, dataset: &String, _domain: &str) -> Vec<String> {
        vec![format!("source={dataset}")]
    }
}

/// 测试并发会话的打开与关闭串行执行
#[test]
fn test_concurrent_sessions_never_overlap() {
    let binding = NativeLibraryBinding::new(OverlapBackend::default(), BridgeConfig::default());

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let binding = &binding;
            scope.spawn(move || {
                for round in 0..ROUNDS {
                    let name = format!("tile_{worker}_{round}.tif");
                    let mut handle = binding.acquire(&name, AccessMode::ReadOnly).unwrap();
                    let list = handle.metadata(&MetadataDomain::Default).unwrap();
                    assert_eq!(list.lookup("source"), Some(name.as_str()));
                    handle.close().unwrap();
                }
            });
        }
    });

    let backend = binding.backend();
    assert_eq!(backend.overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(backend.calls.load(Ordering::SeqCst), THREADS * ROUNDS * 2);

    let stats = binding.session_stats();
    assert_eq!(stats.opened, (THREADS * ROUNDS) as u64);
    assert_eq!(stats.outstanding(), 0);
}

/// 测试作用域 API 在并发下同样释放全部句柄
#[test]
fn test_concurrent_scoped_sessions_release_all() {
    let binding = NativeLibraryBinding::new(OverlapBackend::default(), BridgeConfig::default());

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let binding = &binding;
            scope.spawn(move || {
                let name = format!("scene_{worker}.hdf");
                let entries = binding
                    .domain_metadata(&name, &MetadataDomain::Default)
                    .unwrap();
                assert_eq!(entries.len(), 1);
            });
        }
    });

    assert_eq!(binding.backend().overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(binding.session_stats().outstanding(), 0);
}
