/// 材质数据结构模块
///
/// 每个材质包含六个命名属性（Kd、Ka、Ke、Ks、Ns、Kn），
/// 每个属性都有颜色/强度、可选的纹理贴图以及纹理坐标变换。

use std::path::PathBuf;

use crate::texture::TextureData;

/// 材质属性槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// 漫反射颜色
    Diffuse,
    /// 环境光颜色
    Ambient,
    /// 自发光颜色
    Emissive,
    /// 高光颜色
    Specular,
    /// 高光指数
    Shininess,
    /// 法线贴图
    Normal,
}

impl PropertyKind {
    /// 所有属性，按槽位顺序
    pub const ALL: [PropertyKind; 6] = [
        PropertyKind::Diffuse,
        PropertyKind::Ambient,
        PropertyKind::Emissive,
        PropertyKind::Specular,
        PropertyKind::Shininess,
        PropertyKind::Normal,
    ];

    /// 槽位编号（0..6）
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// MTL 文件中的关键字（`Kd`、`Ka` ...）
    pub fn key(self) -> &'static str {
        match self {
            PropertyKind::Diffuse => "Kd",
            PropertyKind::Ambient => "Ka",
            PropertyKind::Emissive => "Ke",
            PropertyKind::Specular => "Ks",
            PropertyKind::Shininess => "Ns",
            PropertyKind::Normal => "Kn",
        }
    }

    /// 根据 MTL 关键字查找属性
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    fn default_color(self) -> [f32; 4] {
        match self {
            PropertyKind::Diffuse => [0.8, 0.8, 0.8, 1.0],
            PropertyKind::Ambient => [0.2, 0.2, 0.2, 1.0],
            PropertyKind::Emissive | PropertyKind::Specular => [0.0, 0.0, 0.0, 1.0],
            PropertyKind::Shininess => [8.0, 0.0, 0.0, 0.0],
            PropertyKind::Normal => [0.0; 4],
        }
    }
}

/// 单个材质属性
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialProperty {
    /// 颜色或强度（RGBA）
    pub color: [f32; 4],

    /// 贴图路径，按 MTL 中的原样保存
    pub map_path: Option<PathBuf>,

    /// 已解码的贴图
    pub texture: Option<TextureData>,

    /// 纹理坐标是否钳制到边缘
    pub clamp: bool,

    /// 纹理坐标偏移
    pub offset: [f32; 3],

    /// 纹理坐标缩放
    pub scale: [f32; 3],
}

impl MaterialProperty {
    fn with_color(color: [f32; 4]) -> Self {
        Self {
            color,
            map_path: None,
            texture: None,
            clamp: false,
            offset: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

/// 材质
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// 材质名称；未在 MTL 中找到对应 `newmtl` 时为空
    pub name: Option<String>,

    /// 按 [`PropertyKind::index`] 排列的六个属性
    pub properties: [MaterialProperty; 6],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            properties: PropertyKind::ALL.map(|kind| MaterialProperty::with_color(kind.default_color())),
        }
    }
}

impl Material {
    #[inline]
    pub fn property(&self, kind: PropertyKind) -> &MaterialProperty {
        &self.properties[kind.index()]
    }

    #[inline]
    pub fn property_mut(&mut self, kind: PropertyKind) -> &mut MaterialProperty {
        &mut self.properties[kind.index()]
    }

    /// 不透明度（漫反射颜色的 alpha 分量）
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.property(PropertyKind::Diffuse).color[3]
    }

    /// 写出时使用的名称
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let material = Material::default();

        assert!(material.name.is_none());
        assert_eq!(material.property(PropertyKind::Diffuse).color, [0.8, 0.8, 0.8, 1.0]);
        assert_eq!(material.property(PropertyKind::Ambient).color, [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(material.property(PropertyKind::Shininess).color[0], 8.0);
        assert_eq!(material.property(PropertyKind::Normal).color, [0.0; 4]);
        assert_eq!(material.alpha(), 1.0);

        for property in &material.properties {
            assert_eq!(property.scale, [1.0; 3]);
            assert_eq!(property.offset, [0.0; 3]);
            assert!(!property.clamp);
            assert!(property.map_path.is_none());
        }
    }

    #[test]
    fn test_property_keys() {
        for kind in PropertyKind::ALL {
            assert_eq!(PropertyKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(PropertyKind::from_key("Kd"), Some(PropertyKind::Diffuse));
        assert_eq!(PropertyKind::from_key("Kx"), None);
        assert_eq!(PropertyKind::Normal.index(), 5);
    }
}
