/// 几何体加载和处理模块
///
/// 提供 Wavefront OBJ/MTL 网格的读取、编辑、后处理、优化和写出。
///
/// # 模块结构
///
/// - `vertex`: 顶点、三角形和线段定义（GPU 布局）
/// - `material`: 材质与六个属性槽
/// - `mesh`: 网格存储及其增删改查
/// - `process`: 法线、切线空间和透明度排序
/// - `optimize`: 顶点焊接与顶点缓存排序
/// - `writer`: OBJ/MTL 写出
/// - `loaders`: 模型加载器
///
/// # 架构设计
///
/// ```text
/// 文件 (OBJ + MTL)
///     ↓
/// ObjLoader（解析期顶点去重）
///     ↓
/// Mesh（CPU 侧数据） → process / optimize
///     ↓
/// MeshRenderer（上传到 GPU） / writer（写回文件）
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use wavefront_mesh::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mut mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// mesh.optimize_vertex_cache(16)?;
///
/// println!("顶点数: {}", mesh.vertex_count());
/// println!("ACMR: {:.3}", mesh.acmr(16));
///
/// # Ok::<(), wavefront_mesh::core::error::MeshError>(())
/// ```

pub mod vertex;
pub mod material;
pub mod mesh;
pub mod process;
pub mod optimize;
pub mod writer;
pub mod loaders;

// 重新导出常用类型
pub use vertex::{Index, Line, Polygon, Vertex};
pub use material::{Material, MaterialProperty, PropertyKind};
pub use mesh::{Bounds, Mesh, Surface};
