// crates/rb_imageio/src/attribute.rs

//! 属性类型校验
//!
//! 原生元数据里的值都是字符串。写入元数据树之前按声明类型解析一次，
//! 只用于校验：合法时原样保留原始字符串，不做规范化；
//! 不合法或缺失时写入空字符串，整棵树的构建不会因此中断。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::MetadataError;
use crate::node::MetadataNode;

/// 属性声明类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// 双精度浮点
    Double,
    /// 单精度浮点
    Float,
    /// 32 位整数
    Integer,
    /// 布尔
    Boolean,
    /// 字符串
    String,
}

impl AttributeType {
    /// 类型名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::String => "string",
        }
    }

    /// 校验原始值是否符合声明类型
    ///
    /// 浮点接受十进制与科学计数法（去除首尾空白后）；非数字单词只接受
    /// `NaN` 与 `Infinity` 两种拼写，`inf`、`nan` 等视为非法。
    /// 不接受十六进制浮点和 `d`/`f` 类型后缀。整数不去除空白。
    pub fn validate(&self, raw: &str) -> bool {
        match self {
            Self::Double => is_float_token(raw.trim()) && raw.trim().parse::<f64>().is_ok(),
            Self::Float => is_float_token(raw.trim()) && raw.trim().parse::<f32>().is_ok(),
            Self::Integer => raw.parse::<i32>().is_ok(),
            // 任意字符串都能解释为布尔值
            Self::Boolean | Self::String => true,
        }
    }
}

/// 纯字母记号只允许 `NaN`、`Infinity`（可带符号）
fn is_float_token(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    if unsigned.chars().all(|c| c.is_ascii_alphabetic()) {
        return matches!(unsigned, "NaN" | "Infinity");
    }
    true
}

impl FromStr for AttributeType {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "double" => Ok(Self::Double),
            "float" => Ok(Self::Float),
            "integer" | "int" => Ok(Self::Integer),
            "boolean" | "bool" => Ok(Self::Boolean),
            "string" => Ok(Self::String),
            _ => Err(MetadataError::UnknownAttributeType(s.to_string())),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 按声明类型设置节点属性
///
/// - `raw` 缺失或去空白后为空：写入 `""`
/// - 校验通过：原样写入 `raw`
/// - 校验失败：写入 `""` 并记录调试日志
///
/// ```
/// use rb_imageio::attribute::{set_typed_attribute, AttributeType};
/// use rb_imageio::node::MetadataNode;
///
/// let mut node = MetadataNode::new("BandInfo");
/// set_typed_attribute(&mut node, "scale", Some("1.50"), AttributeType::Double);
/// set_typed_attribute(&mut node, "offset", Some("abc"), AttributeType::Double);
/// assert_eq!(node.attribute("scale"), Some("1.50"));
/// assert_eq!(node.attribute("offset"), Some(""));
/// ```
pub fn set_typed_attribute(
    node: &mut MetadataNode,
    name: &str,
    raw: Option<&str>,
    declared: AttributeType,
) {
    let value = match raw {
        Some(raw) if !raw.trim().is_empty() => {
            if declared.validate(raw) {
                raw
            } else {
                debug!(
                    attribute = name,
                    value = raw,
                    declared = %declared,
                    "attribute value has not been successfully parsed"
                );
                ""
            }
        }
        _ => "",
    };
    node.set_attribute(name, value);
}
