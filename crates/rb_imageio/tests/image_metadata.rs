// crates/rb_imageio/tests/image_metadata.rs

//! 影像属性元数据测试

use std::collections::HashMap;

use rb_config::BridgeConfig;
use rb_imageio::{
    AttributeProfile, AttributeSource, DatasetAttributeSource, ImageAttributeMetadata,
    MetadataError, ATTRIBUTES_NODE, COMMON_FORMAT_NAME,
};
use rb_native::{AccessMode, NativeBackend, NativeError, NativeLibraryBinding, NativeResult};

/// 内存属性来源
struct MapSource {
    name: String,
    attrs: Vec<(String, String)>,
}

impl MapSource {
    fn new(attrs: &[(&str, &str)]) -> Self {
        Self {
            name: "HDF4_SDS:UNKNOWN:\"sst.hdf\":0".into(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl AttributeSource for MapSource {
    fn attribute(&self, image: usize, key: &str) -> Option<String> {
        if image != 0 {
            return None;
        }
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    fn attributes(&self, image: usize) -> Vec<(String, String)> {
        if image == 0 {
            self.attrs.clone()
        } else {
            Vec::new()
        }
    }

    fn dataset_name(&self, image: usize) -> Option<String> {
        (image == 0).then(|| self.name.clone())
    }
}

fn aps(attrs: &[(&str, &str)]) -> ImageAttributeMetadata {
    ImageAttributeMetadata::from_source(&MapSource::new(attrs), 0, AttributeProfile::hdf4_aps())
}

/// 测试缩放、偏移、无效值与有效范围
#[test]
fn test_single_band_attributes() {
    let metadata = aps(&[
        ("scalingSlope", "0.01"),
        ("scalingIntercept", " -3.5 "),
        ("invalid", "-32768"),
        ("validRange", "0 32767"),
        ("history", "created"),
    ]);

    assert_eq!(metadata.scales(), Some(&[0.01][..]));
    assert_eq!(metadata.offsets(), Some(&[-3.5][..]));
    assert_eq!(metadata.no_data(), Some(&[-32768.0][..]));
    assert_eq!(metadata.minimums(), Some(&[0.0][..]));
    assert_eq!(metadata.maximums(), Some(&[32767.0][..]));
    assert_eq!(metadata.num_overviews(), &[0]);
    assert_eq!(metadata.additional().len(), 5);
}

/// 测试有效范围为空时回退到浏览范围
#[test]
fn test_browse_range_fallback() {
    let metadata = aps(&[("validRange", "  "), ("browseRange", "-2 35")]);
    assert_eq!(metadata.minimums(), Some(&[-2.0][..]));
    assert_eq!(metadata.maximums(), Some(&[35.0][..]));

    let metadata = aps(&[("validRange", "1 2"), ("browseRange", "-2 35")]);
    assert_eq!(metadata.minimums(), Some(&[1.0][..]));
}

/// 测试上下界相同时丢弃范围
#[test]
fn test_identical_bounds_dropped() {
    let metadata = aps(&[("validRange", "7 7")]);
    assert!(metadata.minimums().is_none());
    assert!(metadata.maximums().is_none());
}

/// 测试畸形数值被丢弃而不是报错
#[test]
fn test_malformed_values_dropped() {
    let metadata = aps(&[
        ("scalingSlope", "n/a"),
        ("invalid", ""),
        ("validRange", "0 1 2"),
    ]);
    assert!(metadata.scales().is_none());
    assert!(metadata.no_data().is_none());
    assert!(metadata.minimums().is_none());
}

/// 测试原生格式树
#[test]
fn test_native_tree() {
    let metadata = aps(&[("history", "a=b"), ("units", "K")]);
    let format = metadata.profile().native_format_name.to_uppercase();

    let tree = metadata.as_tree(&format).unwrap();
    assert_eq!(tree.name(), AttributeProfile::hdf4_aps().native_format_name);
    let attributes = tree.child(ATTRIBUTES_NODE).unwrap();
    assert_eq!(attributes.attribute("history"), Some("a=b"));
    assert_eq!(attributes.attributes()[1].0, "units");

    // 缓存：同一实例
    let again = metadata.as_tree(&format).unwrap();
    assert!(std::ptr::eq(tree, again));
}

/// 测试通用格式树
#[test]
fn test_common_tree() {
    let metadata = aps(&[("scalingSlope", "0.5"), ("validRange", "0 255")]);
    let tree = metadata.as_tree(COMMON_FORMAT_NAME).unwrap();

    let descriptor = tree.child("DatasetDescriptor").unwrap();
    assert_eq!(descriptor.attribute("driverName"), Some("HDF4"));
    assert_eq!(
        descriptor.attribute("datasetName"),
        Some("HDF4_SDS:UNKNOWN:\"sst.hdf\":0")
    );

    let bands = tree.child("BandsInfo").unwrap();
    assert_eq!(bands.children().len(), 1);
    let band = &bands.children()[0];
    assert_eq!(band.attribute("scale"), Some("0.5"));
    assert_eq!(band.attribute("offset"), Some(""));
    assert_eq!(band.attribute("maximum"), Some("255"));
    assert_eq!(band.attribute("numOverviews"), Some("0"));

    let json = serde_json::to_string(tree).unwrap();
    assert!(json.contains("BandInfo"));
}

/// 测试不支持的格式名
#[test]
fn test_unsupported_format_name() {
    let metadata = aps(&[]);
    let err = metadata.as_tree("javax_imageio_1.0").unwrap_err();
    assert!(matches!(err, MetadataError::UnsupportedFormatName(ref f) if f == "javax_imageio_1.0"));
}

/// 测试每个声明的格式名都能渲染属性树
#[test]
fn test_every_format_name_renders() {
    let metadata = aps(&[("scalingSlope", "2.0")]);
    let names = metadata.format_names();
    assert_eq!(names[1], COMMON_FORMAT_NAME);
    for name in names {
        let tree = metadata.as_tree(name).unwrap();
        assert_eq!(tree.name(), name);
    }
}

// ============================================================
// 原生数据集来源
// ============================================================

#[derive(Default)]
struct MemoryBackend {
    datasets: HashMap<String, HashMap<String, Vec<String>>>,
}

impl MemoryBackend {
    fn with(mut self, dataset: &str, domain: &str, entries: &[&str]) -> Self {
        self.datasets
            .entry(dataset.to_string())
            .or_default()
            .insert(domain.to_string(), entries.iter().map(|e| e.to_string()).collect());
        self
    }
}

impl NativeBackend for MemoryBackend {
    type Dataset = String;

    fn load(&self) -> NativeResult<()> {
        Ok(())
    }

    fn register_all(&self) {}

    fn push_quiet_error_handler(&self) {}

    fn open(&self, name: &str, _mode: AccessMode) -> NativeResult<String> {
        if self.datasets.contains_key(name) {
            Ok(name.to_string())
        } else {
            Err(NativeError::open_failed(name, "no such dataset"))
        }
    }

    fn close(&self, _dataset: String) {}

    fn driver_metadata(&self, _driver: &str) -> Option<Vec<String>> {
        None
    }

    fn metadata(&self, dataset: &String, domain: &str) -> Vec<String> {
        self.datasets
            .get(dataset)
            .and_then(|domains| domains.get(domain))
            .cloned()
            .unwrap_or_default()
    }
}

/// 测试容器按子数据集读取影像属性
#[test]
fn test_dataset_source_walks_subdatasets() {
    let backend = MemoryBackend::default()
        .with(
            "sst.hdf",
            "SUBDATASETS",
            &[
                "SUBDATASET_1_NAME=sst.hdf:0",
                "SUBDATASET_2_NAME=sst.hdf:1",
            ],
        )
        .with("sst.hdf:0", "", &["scalingSlope=0.01", "validRange=0 32767"])
        .with("sst.hdf:1", "", &["browseRange=-2 35"]);
    let binding = NativeLibraryBinding::new(backend, BridgeConfig::default());

    let source = DatasetAttributeSource::load(&binding, "sst.hdf").unwrap();
    assert_eq!(source.image_count(), 2);

    let second = ImageAttributeMetadata::from_source(&source, 1, AttributeProfile::hdf4_aps());
    assert_eq!(second.dataset_name(), Some("sst.hdf:1"));
    assert_eq!(second.minimums(), Some(&[-2.0][..]));
    assert_eq!(binding.session_stats().outstanding(), 0);
}

/// 测试无子数据集时数据集本身即唯一影像
#[test]
fn test_dataset_source_single_image() {
    let backend = MemoryBackend::default().with("dem.tif", "", &["AREA_OR_POINT=Area"]);
    let binding = NativeLibraryBinding::new(backend, BridgeConfig::default());

    let source = DatasetAttributeSource::load(&binding, "dem.tif").unwrap();
    assert_eq!(source.image_count(), 1);
    assert_eq!(source.attribute(0, "AREA_OR_POINT").as_deref(), Some("Area"));
}
