// crates/rb_native/src/domain.rs

//! 元数据域模型
//!
//! 原生库把数据集元数据划分为若干命名域，每个域是一串 `key=value` 形式的原始条目：
//!
//! - 默认域（空字符串）：影像级元数据
//! - `IMAGE_STRUCTURE`：压缩、交织方式等结构信息
//! - `SUBDATASETS`：子数据集列表，属于整个数据流而非单幅影像
//! - `xml:` 前缀域：条目中嵌入一份序列化文档，不按 `=` 拆分
//!
//! 值中可以包含 `=`，只有第一个 `=` 是分隔符；同一个域内允许重复键，查找返回第一个。

use serde::Serialize;
use std::fmt;

/// 元数据域
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum MetadataDomain {
    /// 默认域（空名称）
    #[default]
    Default,
    /// `IMAGE_STRUCTURE`
    ImageStructure,
    /// `SUBDATASETS`
    Subdatasets,
    /// `xml:` 前缀域，保存完整域名
    Xml(String),
    /// 其他命名域
    Named(String),
}

impl MetadataDomain {
    /// `IMAGE_STRUCTURE` 域名
    pub const IMAGE_STRUCTURE: &'static str = "IMAGE_STRUCTURE";
    /// `SUBDATASETS` 域名
    pub const SUBDATASETS: &'static str = "SUBDATASETS";
    /// XML 域前缀
    pub const XML_PREFIX: &'static str = "xml:";

    /// 由原始域名解析
    pub fn parse(name: &str) -> Self {
        match name {
            "" => Self::Default,
            Self::IMAGE_STRUCTURE => Self::ImageStructure,
            Self::SUBDATASETS => Self::Subdatasets,
            _ if name.starts_with(Self::XML_PREFIX) => Self::Xml(name.to_string()),
            _ => Self::Named(name.to_string()),
        }
    }

    /// 原生库使用的域名
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "",
            Self::ImageStructure => Self::IMAGE_STRUCTURE,
            Self::Subdatasets => Self::SUBDATASETS,
            Self::Xml(name) | Self::Named(name) => name,
        }
    }

    /// 是否为 XML 域
    pub fn is_xml(&self) -> bool {
        matches!(self, Self::Xml(_))
    }
}

impl From<&str> for MetadataDomain {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for MetadataDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "<default>"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// 按第一个 `=` 拆分条目
///
/// 没有 `=` 的条目返回 `None`。
pub fn split_entry(entry: &str) -> Option<(&str, &str)> {
    entry.split_once('=')
}

/// 在原始条目中查找键
///
/// 键比较区分大小写，返回第一个匹配条目中第一个 `=` 之后的全部内容。
///
/// ```
/// use rb_native::domain::lookup;
///
/// let entries = ["AREA_OR_POINT=Area", "K=V1=V2", "K=other"];
/// assert_eq!(lookup(&entries, "K"), Some("V1=V2"));
/// assert_eq!(lookup(&entries, "k"), None);
/// ```
pub fn lookup<'a, S: AsRef<str>>(entries: &'a [S], key: &str) -> Option<&'a str> {
    entries
        .iter()
        .filter_map(|entry| split_entry(entry.as_ref()))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value)
}

/// 子数据集描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subdataset {
    /// 序号（从 1 开始，与原生库一致）
    pub index: usize,
    /// 可直接打开的子数据集名称
    pub name: String,
    /// 描述
    pub description: Option<String>,
}

/// 单个域的原始元数据条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataList {
    domain: MetadataDomain,
    entries: Vec<String>,
}

impl MetadataList {
    /// 创建
    pub fn new(domain: MetadataDomain, entries: Vec<String>) -> Self {
        Self { domain, entries }
    }

    /// 所属域
    pub fn domain(&self) -> &MetadataDomain {
        &self.domain
    }

    /// 原始条目
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// 条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 查找键
    pub fn lookup(&self, key: &str) -> Option<&str> {
        lookup(&self.entries, key)
    }

    /// 遍历可拆分的键值对，保持原始顺序
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| split_entry(entry))
    }

    /// XML 域中嵌入的文档
    ///
    /// 非 XML 域或空域返回 `None`。
    pub fn xml_document(&self) -> Option<String> {
        if !self.domain.is_xml() || self.entries.is_empty() {
            return None;
        }
        Some(self.entries.concat())
    }

    /// 解析 `SUBDATASET_<n>_NAME` / `SUBDATASET_<n>_DESC` 条目
    ///
    /// 按序号排序；只有描述没有名称的序号会被忽略。
    pub fn subdatasets(&self) -> Vec<Subdataset> {
        let mut found: Vec<Subdataset> = Vec::new();

        for (key, value) in self.pairs() {
            let Some(rest) = key.strip_prefix("SUBDATASET_") else {
                continue;
            };
            if let Some(index) = rest.strip_suffix("_NAME").and_then(|n| n.parse::<usize>().ok()) {
                if !found.iter().any(|s| s.index == index) {
                    found.push(Subdataset {
                        index,
                        name: value.to_string(),
                        description: None,
                    });
                }
            }
        }

        for subdataset in &mut found {
            let desc_key = format!("SUBDATASET_{}_DESC", subdataset.index);
            subdataset.description = self.lookup(&desc_key).map(str::to_string);
        }

        found.sort_by_key(|s| s.index);
        found
    }
}
