//! wavefront_mesh - OBJ/MTL 网格优化工具
//!
//! 读取一个 OBJ 文件，焊接相近顶点、按顶点缓存重新排序三角形，
//! 报告优化前后的 ACMR 和包围盒，并可选地写回 OBJ/MTL。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件 wavefront_mesh.toml
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- models/chest.obj --output out/chest.obj --mtl out/chest.mtl --cache-size 24
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::{info, warn};

use wavefront_mesh::core::{log, Config};
use wavefront_mesh::geometry::loaders::{load_mesh, LoadOptions};
use wavefront_mesh::geometry::writer;

/// 应用程序入口点
///
/// # 流程
///
/// 1. 加载配置文件（wavefront_mesh.toml）
/// 2. 应用命令行参数覆盖
/// 3. 验证配置并初始化日志系统
/// 4. 加载网格，执行焊接和顶点缓存排序
/// 5. 输出统计信息，按需写出文件
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("wavefront_mesh.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    config.validate().context("Invalid configuration")?;

    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "wavefront_mesh starting");

    let Some(input) = config.files.input.clone() else {
        bail!("No input file given (use --input <path> or [files] input)");
    };

    // 4. 加载与优化
    let options = LoadOptions::from(&config.loader);
    let mut mesh = load_mesh(Path::new(&input), &options)
        .with_context(|| format!("Failed to load {}", input))?;

    let cache_size = config.optimizer.cache_size;
    info!(acmr = mesh.acmr(cache_size), cache_size, "Before optimization");

    if config.optimizer.weld {
        let merged = mesh.weld_vertices(config.optimizer.weld_epsilon, config.optimizer.weld_dot)?;
        info!(merged, vertices = mesh.vertex_count(), "Welded vertices");
    }

    if config.optimizer.sort {
        mesh.optimize_vertex_cache(cache_size)?;
    }
    info!(acmr = mesh.acmr(cache_size), cache_size, "After optimization");

    // 5. 统计与写出
    match mesh.bounds() {
        Some(bounds) => info!(
            min = ?bounds.min,
            max = ?bounds.max,
            center = ?bounds.center(),
            "Bounds"
        ),
        None => warn!("Mesh has no vertices"),
    }

    let output = config.files.output.as_ref().map(PathBuf::from);
    let mtl = config.files.mtl.as_ref().map(PathBuf::from);
    if output.is_some() || mtl.is_some() {
        writer::write(&mesh, output.as_deref(), mtl.as_deref(), config.writer.precision)
            .context("Failed to write output")?;
        info!(obj = ?output, mtl = ?mtl, "Output written");
    }

    info!("Done");
    Ok(())
}
