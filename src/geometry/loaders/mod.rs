/// 模型加载器模块
///
/// 提供统一的模型加载接口和具体格式的实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式，材质来自 `mtllib` 引用的 MTL 文件
///
/// # 使用示例
///
/// ```rust,no_run
/// use wavefront_mesh::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// # Ok::<(), wavefront_mesh::core::error::MeshError>(())
/// ```
use crate::core::config::LoaderConfig;
use crate::core::error::{ParseError, Result};
use crate::geometry::mesh::Mesh;
use std::path::Path;

pub mod intern;
pub mod mtl_loader;
pub mod obj_loader;

// 重新导出加载器
pub use obj_loader::ObjLoader;

/// 加载选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// 是否解码 `map_*` 引用的 TGA 贴图
    pub load_textures: bool,

    /// 解析后是否执行精简、切线计算和透明度排序
    pub post_process: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            load_textures: true,
            post_process: true,
        }
    }
}

impl From<&LoaderConfig> for LoadOptions {
    fn from(config: &LoaderConfig) -> Self {
        Self {
            load_textures: config.load_textures,
            post_process: config.post_process,
        }
    }
}

/// 网格加载器 trait
///
/// 定义统一的加载接口，所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 加载器是无状态的（使用关联函数），解析状态只存在于单次调用内
/// - 返回 CPU 侧的 `Mesh`，不涉及 GPU 资源
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 网格数组无法增长
    fn load_from_file(path: &Path) -> Result<Mesh>;

    /// 从内存数据加载网格（不查找外部引用的文件）
    fn load_from_memory(data: &[u8]) -> Result<Mesh>;

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
///
/// # 示例
///
/// ```rust,no_run
/// use wavefront_mesh::geometry::loaders::{load_mesh, LoadOptions};
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("model.obj"), &LoadOptions::default())?;
/// # Ok::<(), wavefront_mesh::core::error::MeshError>(())
/// ```
pub fn load_mesh(path: &Path, options: &LoadOptions) -> Result<Mesh> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| ParseError::UnsupportedFormat(format!("No file extension: {:?}", path)))?;

    if ObjLoader::supported_extensions().contains(&extension.as_str()) {
        ObjLoader::load_with_options(path, options)
    } else {
        Err(ParseError::UnsupportedFormat(format!("Unsupported file format: .{}", extension)).into())
    }
}
