/// OBJ/MTL 写出
///
/// 按顶点顺序写出 `v`/`vt`/`vn` 块，然后逐表面写出 `usemtl` 与
/// 1 起始的 `f i/i/i ...`、`l i/i/i ...`。配套的 MTL 文件包含每个材质的
/// 颜色、`Ns`、`d` 以及有路径的 `map_*` 指令。
///
/// 写出失败会返回 IO 错误，磁盘上可能残留部分内容。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::error::Result;
use crate::geometry::material::{Material, PropertyKind};
use crate::geometry::mesh::Mesh;

/// 写出 OBJ 文本
///
/// `mtllib` 为写在 `mtllib` 指令中的材质库引用；`precision` 为小数位数。
pub fn write_obj<W: Write>(mesh: &Mesh, out: &mut W, mtllib: Option<&str>, precision: usize) -> Result<()> {
    let p = precision;

    if let Some(mtllib) = mtllib {
        writeln!(out, "mtllib {}", mtllib)?;
    }

    for v in mesh.vertices() {
        writeln!(out, "v {:.*} {:.*} {:.*}", p, v.position[0], p, v.position[1], p, v.position[2])?;
    }
    for v in mesh.vertices() {
        writeln!(out, "vt {:.*} {:.*}", p, v.texcoord[0], p, v.texcoord[1])?;
    }
    for v in mesh.vertices() {
        writeln!(out, "vn {:.*} {:.*} {:.*}", p, v.normal[0], p, v.normal[1], p, v.normal[2])?;
    }

    for surface in mesh.surfaces() {
        let name = mesh
            .materials()
            .get(surface.material)
            .map_or("default", Material::display_name);
        writeln!(out, "usemtl {}", name)?;

        for polygon in &surface.polygons {
            let [a, b, c] = polygon.indices.map(|i| i + 1);
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }
        for line in &surface.lines {
            let [a, b] = line.indices.map(|i| i + 1);
            writeln!(out, "l {a}/{a}/{a} {b}/{b}/{b}")?;
        }
    }

    out.flush()?;
    Ok(())
}

fn write_map<W: Write>(out: &mut W, material: &Material, kind: PropertyKind) -> Result<()> {
    let property = material.property(kind);
    let Some(path) = &property.map_path else {
        return Ok(());
    };

    write!(out, "map_{} ", kind.key())?;

    if property.clamp {
        write!(out, "-clamp on ")?;
    }

    let o = property.offset;
    if o.iter().any(|&c| c != 0.0) {
        write!(out, "-o {:.6} {:.6} {:.6} ", o[0], o[1], o[2])?;
    }

    let s = property.scale;
    if s.iter().any(|&c| c != 1.0) {
        write!(out, "-s {:.6} {:.6} {:.6} ", s[0], s[1], s[2])?;
    }

    writeln!(out, "{}", path.display())?;
    Ok(())
}

/// 写出 MTL 文本
pub fn write_mtl<W: Write>(mesh: &Mesh, out: &mut W) -> Result<()> {
    for material in mesh.materials() {
        writeln!(out, "newmtl {}", material.display_name())?;

        for kind in [
            PropertyKind::Diffuse,
            PropertyKind::Ambient,
            PropertyKind::Emissive,
            PropertyKind::Specular,
        ] {
            let c = material.property(kind).color;
            writeln!(out, "{} {:12.8} {:12.8} {:12.8}", kind.key(), c[0], c[1], c[2])?;
        }
        writeln!(out, "Ns {:12.8}", material.property(PropertyKind::Shininess).color[0])?;
        writeln!(out, "d {:12.8}", material.alpha())?;

        for kind in PropertyKind::ALL {
            write_map(out, material, kind)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// 写出 OBJ 和/或 MTL 文件
///
/// 两者都给出时，OBJ 中的 `mtllib` 引用 MTL 文件：同目录时只写文件名，
/// 否则写完整路径。
///
/// 重新读取写出的文件时，顶点按在面和线段中首次出现的顺序重新编号，
/// 因此经过顶点缓存排序的网格读回后顶点顺序会不同；三角形和线段的
/// 顺序及其各角的属性保持不变。
pub fn write(mesh: &Mesh, obj_path: Option<&Path>, mtl_path: Option<&Path>, precision: usize) -> Result<()> {
    if let Some(obj_path) = obj_path {
        let mtllib = mtl_path.map(|mtl| {
            let same_dir = mtl.parent() == obj_path.parent();
            match mtl.file_name() {
                Some(name) if same_dir => name.to_string_lossy().into_owned(),
                _ => mtl.to_string_lossy().into_owned(),
            }
        });

        let mut out = BufWriter::new(File::create(obj_path)?);
        write_obj(mesh, &mut out, mtllib.as_deref(), precision)?;
        tracing::debug!("Wrote {} vertices to {:?}", mesh.vertex_count(), obj_path);
    }

    if let Some(mtl_path) = mtl_path {
        let mut out = BufWriter::new(File::create(mtl_path)?);
        write_mtl(mesh, &mut out)?;
        tracing::debug!("Wrote {} materials to {:?}", mesh.material_count(), mtl_path);
    }

    Ok(())
}
