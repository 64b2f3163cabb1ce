// crates/rb_imageio/src/image_metadata.rs

//! 影像级属性元数据
//!
//! 把原生库给出的私有属性（缩放、偏移、无效值、有效范围）
//! 解释为统一的逐波段模型，并按元数据格式名渲染为属性树。

use std::sync::OnceLock;
use tracing::debug;

use rb_native::{NativeBackend, NativeLibraryBinding, NativeResult};

use crate::attribute::{set_typed_attribute, AttributeType};
use crate::error::{MetadataError, MetadataResult};
use crate::node::MetadataNode;

/// 通用影像元数据格式名
pub const COMMON_FORMAT_NAME: &str = "rasterbridge_core_common_image_metadata_1.0";

/// 原生格式树中存放附加属性的节点名
pub const ATTRIBUTES_NODE: &str = "Attributes";

// ============================================================
// 属性来源
// ============================================================

/// 逐影像的原始属性来源
pub trait AttributeSource {
    /// 读取单个属性
    fn attribute(&self, image: usize, key: &str) -> Option<String>;

    /// 全部属性，保持来源顺序
    fn attributes(&self, image: usize) -> Vec<(String, String)>;

    /// 影像对应的数据集名称
    fn dataset_name(&self, image: usize) -> Option<String>;
}

/// 基于原生数据集元数据的属性来源
///
/// 容器类数据集按子数据集逐一读取影像元数据；
/// 没有子数据集时数据集本身即唯一影像。
#[derive(Debug, Clone, Default)]
pub struct DatasetAttributeSource {
    images: Vec<(String, Vec<(String, String)>)>,
}

impl DatasetAttributeSource {
    /// 从已读取的影像元数据构建
    pub fn new(images: Vec<(String, Vec<(String, String)>)>) -> Self {
        Self { images }
    }

    /// 通过原生绑定读取
    pub fn load<B: NativeBackend>(
        binding: &NativeLibraryBinding<B>,
        name: &str,
    ) -> NativeResult<Self> {
        let subdatasets = binding.stream_metadata(name)?.subdatasets();
        let names: Vec<String> = if subdatasets.is_empty() {
            vec![name.to_string()]
        } else {
            subdatasets.into_iter().map(|s| s.name).collect()
        };

        let mut images = Vec::with_capacity(names.len());
        for image_name in names {
            let list = binding.image_metadata(&image_name)?;
            let pairs = list
                .pairs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            images.push((image_name, pairs));
        }
        debug!(dataset = name, images = images.len(), "loaded image attributes");
        Ok(Self { images })
    }

    /// 影像数
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

impl AttributeSource for DatasetAttributeSource {
    fn attribute(&self, image: usize, key: &str) -> Option<String> {
        self.images
            .get(image)?
            .1
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn attributes(&self, image: usize) -> Vec<(String, String)> {
        self.images
            .get(image)
            .map(|(_, attrs)| attrs.clone())
            .unwrap_or_default()
    }

    fn dataset_name(&self, image: usize) -> Option<String> {
        self.images.get(image).map(|(name, _)| name.clone())
    }
}

// ============================================================
// 属性配置
// ============================================================

/// 私有属性键与驱动描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeProfile {
    /// 驱动短名
    pub driver_name: String,
    /// 驱动描述
    pub driver_description: String,
    /// 原生元数据格式名
    pub native_format_name: String,
    /// 缩放系数键
    pub scale_key: String,
    /// 偏移量键
    pub offset_key: String,
    /// 无效值键
    pub no_data_key: String,
    /// 有效范围键，值形如 `"min max"`
    pub valid_range_key: String,
    /// 浏览范围键，有效范围为空时使用
    pub browse_range_key: String,
}

impl AttributeProfile {
    /// HDF4 APS 产品
    pub fn hdf4_aps() -> Self {
        Self {
            driver_name: "HDF4".into(),
            driver_description: "Hierarchical Data Format Release 4".into(),
            native_format_name: "rasterbridge_hdf4_aps_image_metadata_1.0".into(),
            scale_key: "scalingSlope".into(),
            offset_key: "scalingIntercept".into(),
            no_data_key: "invalid".into(),
            valid_range_key: "validRange".into(),
            browse_range_key: "browseRange".into(),
        }
    }
}

// ============================================================
// 影像元数据
// ============================================================

/// 单幅影像的属性元数据
///
/// 构建后不可变；属性树首次请求时生成并缓存。
#[derive(Debug)]
pub struct ImageAttributeMetadata {
    image_index: usize,
    profile: AttributeProfile,
    dataset_name: Option<String>,
    scales: Option<Vec<f64>>,
    offsets: Option<Vec<f64>>,
    no_data: Option<Vec<f64>>,
    minimums: Option<Vec<f64>>,
    maximums: Option<Vec<f64>>,
    num_overviews: Vec<u32>,
    additional: Vec<(String, String)>,
    native_tree: OnceLock<MetadataNode>,
    common_tree: OnceLock<MetadataNode>,
}

impl ImageAttributeMetadata {
    /// 从属性来源构建
    pub fn from_source(
        source: &dyn AttributeSource,
        image: usize,
        profile: AttributeProfile,
    ) -> Self {
        let scales = single_value(source, image, &profile.scale_key);
        let offsets = single_value(source, image, &profile.offset_key);
        let no_data = single_value(source, image, &profile.no_data_key);

        let range = source
            .attribute(image, &profile.valid_range_key)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| source.attribute(image, &profile.browse_range_key));
        let (minimums, maximums) = match range.as_deref().and_then(parse_range) {
            Some((min, max)) => (Some(vec![min]), Some(vec![max])),
            None => (None, None),
        };

        Self {
            image_index: image,
            dataset_name: source.dataset_name(image),
            profile,
            scales,
            offsets,
            no_data,
            minimums,
            maximums,
            // 读取时抽稀，不存在预存概览
            num_overviews: vec![0],
            additional: source.attributes(image),
            native_tree: OnceLock::new(),
            common_tree: OnceLock::new(),
        }
    }

    /// 影像序号
    pub fn image_index(&self) -> usize {
        self.image_index
    }

    /// 影像对应的数据集名称
    pub fn dataset_name(&self) -> Option<&str> {
        self.dataset_name.as_deref()
    }

    /// 属性配置
    pub fn profile(&self) -> &AttributeProfile {
        &self.profile
    }

    /// 逐波段缩放系数
    pub fn scales(&self) -> Option<&[f64]> {
        self.scales.as_deref()
    }

    /// 逐波段偏移量
    pub fn offsets(&self) -> Option<&[f64]> {
        self.offsets.as_deref()
    }

    /// 逐波段无效值
    pub fn no_data(&self) -> Option<&[f64]> {
        self.no_data.as_deref()
    }

    /// 逐波段最小有效值
    pub fn minimums(&self) -> Option<&[f64]> {
        self.minimums.as_deref()
    }

    /// 逐波段最大有效值
    pub fn maximums(&self) -> Option<&[f64]> {
        self.maximums.as_deref()
    }

    /// 逐波段概览数
    pub fn num_overviews(&self) -> &[u32] {
        &self.num_overviews
    }

    /// 附加属性
    pub fn additional(&self) -> &[(String, String)] {
        &self.additional
    }

    /// 支持的格式名：原生格式在前，通用格式在后
    pub fn format_names(&self) -> [&str; 2] {
        [self.profile.native_format_name.as_str(), COMMON_FORMAT_NAME]
    }

    /// 按格式名渲染属性树
    pub fn as_tree(&self, format_name: &str) -> MetadataResult<&MetadataNode> {
        let [native, common] = self.format_names();
        if format_name.eq_ignore_ascii_case(native) {
            Ok(self.native_tree.get_or_init(|| self.build_native_tree()))
        } else if format_name.eq_ignore_ascii_case(common) {
            Ok(self.common_tree.get_or_init(|| self.build_common_tree()))
        } else {
            Err(MetadataError::UnsupportedFormatName(format_name.to_string()))
        }
    }

    fn build_native_tree(&self) -> MetadataNode {
        let mut root = MetadataNode::new(self.profile.native_format_name.as_str());
        let mut attributes = MetadataNode::new(ATTRIBUTES_NODE);
        for (key, value) in &self.additional {
            attributes.set_attribute(key.as_str(), value.as_str());
        }
        root.append_child(attributes);
        root
    }

    fn build_common_tree(&self) -> MetadataNode {
        let mut root = MetadataNode::new(COMMON_FORMAT_NAME);

        let mut descriptor = MetadataNode::new("DatasetDescriptor");
        set_typed_attribute(
            &mut descriptor,
            "datasetName",
            self.dataset_name.as_deref(),
            AttributeType::String,
        );
        set_typed_attribute(
            &mut descriptor,
            "driverName",
            Some(self.profile.driver_name.as_str()),
            AttributeType::String,
        );
        set_typed_attribute(
            &mut descriptor,
            "driverDescription",
            Some(self.profile.driver_description.as_str()),
            AttributeType::String,
        );
        root.append_child(descriptor);

        let band_count = [
            &self.scales,
            &self.offsets,
            &self.no_data,
            &self.minimums,
            &self.maximums,
        ]
        .into_iter()
        .filter_map(|values| values.as_ref().map(Vec::len))
        .max()
        .unwrap_or(0)
        .max(1);

        let mut bands = MetadataNode::new("BandsInfo");
        for band in 0..band_count {
            let mut info = MetadataNode::new("BandInfo");
            info.set_attribute("index", band.to_string());
            let doubles = [
                ("scale", &self.scales),
                ("offset", &self.offsets),
                ("noData", &self.no_data),
                ("minimum", &self.minimums),
                ("maximum", &self.maximums),
            ];
            for (name, values) in doubles {
                let raw = band_value(values, band).map(|v| v.to_string());
                set_typed_attribute(&mut info, name, raw.as_deref(), AttributeType::Double);
            }
            let overviews = self.num_overviews.get(band).map(u32::to_string);
            set_typed_attribute(
                &mut info,
                "numOverviews",
                overviews.as_deref(),
                AttributeType::Integer,
            );
            bands.append_child(info);
        }
        root.append_child(bands);
        root
    }
}

fn band_value(values: &Option<Vec<f64>>, band: usize) -> Option<f64> {
    values.as_ref().and_then(|v| v.get(band).copied())
}

fn single_value(source: &dyn AttributeSource, image: usize, key: &str) -> Option<Vec<f64>> {
    let raw = source.attribute(image, key)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => Some(vec![value]),
        Err(_) => {
            debug!(attribute = key, value = %raw, "malformed numeric attribute dropped");
            None
        }
    }
}

/// 解析 `"min max"` 形式的范围
///
/// 按单个空格切分，尾部空段忽略；必须恰好两段。
/// 两段相同（不区分大小写）视为无有效范围。
fn parse_range(raw: &str) -> Option<(f64, f64)> {
    let mut tokens: Vec<&str> = raw.split(' ').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    let [min, max] = tokens.as_slice() else {
        debug!(value = raw, "range attribute does not have two bounds");
        return None;
    };
    if min.eq_ignore_ascii_case(max) {
        return None;
    }
    match (min.parse::<f64>(), max.parse::<f64>()) {
        (Ok(min), Ok(max)) => Some((min, max)),
        _ => {
            debug!(value = raw, "malformed range attribute dropped");
            None
        }
    }
}
