// crates/rb_imageio/src/color_model.rs

//! 采样布局到颜色模型的推导
//!
//! 单波段布局在本模块内直接推导为灰度模型；
//! 多波段布局交给宿主提供的启发式。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::error;

use crate::error::MetadataError;

/// 采样数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleType {
    /// 无符号 8 位
    Byte,
    /// 无符号 16 位
    UShort,
    /// 有符号 16 位
    Short,
    /// 有符号 32 位
    Int,
    /// 32 位浮点
    Float,
    /// 64 位浮点
    Double,
}

impl SampleType {
    /// 对应的原生数据类型名
    pub fn native_data_type(&self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::UShort => "UInt16",
            Self::Short => "Int16",
            Self::Int => "Int32",
            Self::Float => "Float32",
            Self::Double => "Float64",
        }
    }

    /// 由原生数据类型名解析
    pub fn from_native_data_type(name: &str) -> Result<Self, MetadataError> {
        match name {
            "Byte" => Ok(Self::Byte),
            "UInt16" => Ok(Self::UShort),
            "Int16" => Ok(Self::Short),
            "Int32" => Ok(Self::Int),
            "Float32" => Ok(Self::Float),
            "Float64" => Ok(Self::Double),
            other => Err(MetadataError::UnknownSampleType(other.to_string())),
        }
    }

    /// 单个采样的位数
    pub fn bits(&self) -> u32 {
        match self {
            Self::Byte => 8,
            Self::UShort | Self::Short => 16,
            Self::Int | Self::Float => 32,
            Self::Double => 64,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::UShort => "ushort",
            Self::Short => "short",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

impl FromStr for SampleType {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "byte" => Ok(Self::Byte),
            "ushort" => Ok(Self::UShort),
            "short" => Ok(Self::Short),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            _ => Self::from_native_data_type(s.trim()),
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 采样布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleLayout {
    /// 波段数
    pub bands: usize,
    /// 采样类型
    pub sample_type: SampleType,
}

impl SampleLayout {
    /// 创建布局
    pub fn new(bands: usize, sample_type: SampleType) -> Self {
        Self { bands, sample_type }
    }
}

/// 颜色空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// 灰度
    Gray,
    /// RGB
    Rgb,
}

/// 透明度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transparency {
    /// 不透明
    Opaque,
    /// 半透明（带透明通道）
    Translucent,
}

/// 颜色模型的构造路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Construction {
    /// 栅格工厂的标准分量模型
    RasterFactory,
    /// 通用分量模型构造器
    GenericComponent,
    /// 宿主启发式
    HostHeuristic,
}

/// 颜色模型描述
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorModel {
    /// 颜色空间
    pub color_space: ColorSpace,
    /// 分量数（含透明通道）
    pub num_components: usize,
    /// 采样类型
    pub sample_type: SampleType,
    /// 是否带透明通道
    pub has_alpha: bool,
    /// 透明通道是否预乘
    pub alpha_premultiplied: bool,
    /// 透明度
    pub transparency: Transparency,
    /// 构造路径
    pub construction: Construction,
}

impl ColorModel {
    /// 单分量不透明灰度模型
    ///
    /// 栅格工厂路径不接受有符号 16 位，此时改走通用构造器。
    pub fn opaque_gray(sample_type: SampleType) -> Self {
        let construction = match sample_type {
            SampleType::Short => Construction::GenericComponent,
            _ => Construction::RasterFactory,
        };
        Self {
            color_space: ColorSpace::Gray,
            num_components: 1,
            sample_type,
            has_alpha: false,
            alpha_premultiplied: false,
            transparency: Transparency::Opaque,
            construction,
        }
    }
}

/// 宿主提供的多波段颜色模型启发式
pub trait MultiBandColorModels {
    /// 为多波段布局选择颜色模型，无法选择时返回 `None`
    fn color_model_for(&self, layout: &SampleLayout) -> Option<ColorModel>;
}

impl<F> MultiBandColorModels for F
where
    F: Fn(&SampleLayout) -> Option<ColorModel>,
{
    fn color_model_for(&self, layout: &SampleLayout) -> Option<ColorModel> {
        self(layout)
    }
}

/// 基础多波段启发式
///
/// 2 波段为灰度加透明，3 波段为 RGB，4 波段为 RGBA，其余无模型。
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentHeuristic;

impl MultiBandColorModels for ComponentHeuristic {
    fn color_model_for(&self, layout: &SampleLayout) -> Option<ColorModel> {
        let (color_space, has_alpha) = match layout.bands {
            2 => (ColorSpace::Gray, true),
            3 => (ColorSpace::Rgb, false),
            4 => (ColorSpace::Rgb, true),
            _ => return None,
        };
        Some(ColorModel {
            color_space,
            num_components: layout.bands,
            sample_type: layout.sample_type,
            has_alpha,
            alpha_premultiplied: false,
            transparency: if has_alpha {
                Transparency::Translucent
            } else {
                Transparency::Opaque
            },
            construction: Construction::HostHeuristic,
        })
    }
}

/// 由采样布局推导颜色模型
///
/// 多波段时宿主启发式返回 `None` 会记录错误日志并原样返回 `None`，
/// 不做替代；0 波段返回 `None`。
pub fn derive_color_model(
    layout: &SampleLayout,
    host: &dyn MultiBandColorModels,
) -> Option<ColorModel> {
    match layout.bands {
        0 => None,
        1 => Some(ColorModel::opaque_gray(layout.sample_type)),
        bands => {
            let model = host.color_model_for(layout);
            if model.is_none() {
                error!(
                    bands,
                    sample_type = %layout.sample_type,
                    "no color model available for the sample layout"
                );
            }
            model
        }
    }
}
