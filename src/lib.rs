//! wavefront_mesh - Wavefront OBJ/MTL 网格引擎
//!
//! 读取 OBJ/MTL 文件并对顶点去重，提供可编辑的网格存储、
//! 切线空间计算、顶点焊接、顶点缓存优化以及 OBJ/MTL 写出。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `math`: 基于 nalgebra 的数学辅助
//! - `geometry`: 网格数据、加载器、后处理、优化与写出
//! - `texture`: CPU 侧纹理数据和 TGA 读写
//! - `renderer`: 渲染适配器接口
//!
//! # 使用示例
//!
//! ```no_run
//! use wavefront_mesh::geometry::loaders::{load_mesh, LoadOptions};
//! use wavefront_mesh::geometry::writer;
//! use std::path::Path;
//!
//! let mut mesh = load_mesh(Path::new("chest.obj"), &LoadOptions::default())?;
//! mesh.weld_vertices(1e-5, 0.999)?;
//! mesh.optimize_vertex_cache(16)?;
//!
//! writer::write(&mesh, Some(Path::new("out.obj")), Some(Path::new("out.mtl")), 6)?;
//! # Ok::<(), wavefront_mesh::core::error::MeshError>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
pub mod texture;
pub mod renderer;
