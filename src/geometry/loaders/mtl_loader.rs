/// MTL 材质库读取
///
/// 在 MTL 文本中查找 `newmtl <name>` 块，把其中的颜色、透明度和
/// `map_*` 贴图指令写入网格的指定材质。找不到对应块时材质保留默认值。

use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::geometry::material::PropertyKind;
use crate::geometry::mesh::Mesh;
use crate::loader_warn;
use crate::texture::TextureData;

/// `map_*` 指令解析出的贴图设置
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub clamp: bool,
    pub offset: [f32; 3],
    pub scale: [f32; 3],
    pub path: Option<PathBuf>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            clamp: false,
            offset: [0.0; 3],
            scale: [1.0; 3],
            path: None,
        }
    }
}

/// 切出第一个空白分隔的词，返回 (词, 剩余部分)
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// 读取最多三个数值；只有一个时广播到全部分量，两个时第三个取默认值
fn read_triple(mut rest: &str, default: f32) -> (Option<[f32; 3]>, &str) {
    let mut values = Vec::with_capacity(3);
    while values.len() < 3 {
        let (token, after) = next_token(rest);
        match token.parse::<f32>() {
            Ok(v) => {
                values.push(v);
                rest = after;
            }
            Err(_) => break,
        }
    }

    let triple = match *values.as_slice() {
        [] => None,
        [v] => Some([v; 3]),
        [x, y] => Some([x, y, default]),
        [x, y, z, ..] => Some([x, y, z]),
    };
    (triple, rest)
}

/// 解析 `map_*` 指令的参数部分
///
/// 支持 `-clamp on|off`、`-s sx [sy [sz]]`、`-o ox [oy [oz]]`，
/// 选项之后的剩余文本（可含空格）作为贴图路径。
/// 无法识别的选项连同其后的数值参数被跳过。
pub fn parse_map_options(args: &str) -> MapOptions {
    let mut options = MapOptions::default();
    let mut rest = args;

    loop {
        let trimmed = rest.trim();
        if trimmed.is_empty() {
            break;
        }

        let (token, after) = next_token(trimmed);
        if !token.starts_with('-') {
            options.path = Some(PathBuf::from(trimmed));
            break;
        }

        rest = match token {
            "-clamp" => {
                let (value, after) = next_token(after);
                options.clamp = value == "on";
                after
            }
            "-s" => {
                let (scale, after) = read_triple(after, 1.0);
                if let Some(scale) = scale {
                    options.scale = scale;
                }
                after
            }
            "-o" => {
                let (offset, after) = read_triple(after, 0.0);
                if let Some(offset) = offset {
                    options.offset = offset;
                }
                after
            }
            _ => {
                loader_warn!("Ignoring unsupported map option '{}'", token);
                read_triple(after, 0.0).1
            }
        };
    }

    options
}

/// 解析空白分隔的前三个浮点数，无法解析的分量保持原值
fn read_color(args: &str, color: &mut [f32; 4]) {
    for (slot, token) in color.iter_mut().zip(args.split_whitespace()).take(3) {
        if let Ok(v) = token.parse() {
            *slot = v;
        }
    }
}

fn read_scalar(args: &str) -> Option<f32> {
    args.split_whitespace().next()?.parse().ok()
}

/// 在 MTL 文本中查找名为 `name` 的材质并应用到材质 `mi`
///
/// `texture_dir` 为贴图相对路径的基准目录；为 `None` 时不加载贴图。
/// 返回是否找到了对应的 `newmtl` 块。
pub fn parse_material(
    source: &str,
    name: &str,
    mesh: &mut Mesh,
    mi: usize,
    texture_dir: Option<&Path>,
) -> Result<bool> {
    let mut found = false;

    for line in source.lines() {
        let line = line.trim();
        let (key, args) = match line.split_once(char::is_whitespace) {
            Some((key, args)) => (key, args.trim()),
            None => (line, ""),
        };
        if key.is_empty() {
            continue;
        }

        if !found {
            if key == "newmtl" && args.split_whitespace().next() == Some(name) {
                mesh.set_material_name(mi, Some(name.to_string()))?;
                found = true;
            }
            continue;
        }

        if key == "newmtl" {
            break;
        }

        if let Some(kind) = key.strip_prefix("map_").and_then(PropertyKind::from_key) {
            apply_map(mesh, mi, kind, args, texture_dir)?;
        } else if let Some(kind) = PropertyKind::from_key(key) {
            let mut color = mesh.material(mi).property(kind).color;
            read_color(args, &mut color);
            mesh.set_material_color(mi, kind, color)?;
        } else if key == "d" || key == "Tr" {
            if let Some(a) = read_scalar(args) {
                let mut color = mesh.material(mi).property(PropertyKind::Diffuse).color;
                color[3] = if key == "d" { a } else { 1.0 - a };
                mesh.set_material_color(mi, PropertyKind::Diffuse, color)?;
            }
        }
    }

    Ok(found)
}

fn apply_map(
    mesh: &mut Mesh,
    mi: usize,
    kind: PropertyKind,
    args: &str,
    texture_dir: Option<&Path>,
) -> Result<()> {
    let options = parse_map_options(args);

    mesh.set_material_clamp(mi, kind, options.clamp)?;
    mesh.set_material_offset(mi, kind, options.offset)?;
    mesh.set_material_scale(mi, kind, options.scale)?;
    mesh.set_material_map(mi, kind, options.path.clone())?;

    if let (Some(path), Some(dir)) = (&options.path, texture_dir) {
        let full = dir.join(path);
        match TextureData::load_tga(&full) {
            Ok(texture) => mesh.set_material_texture(mi, kind, Some(texture))?,
            Err(e) => loader_warn!("Failed to load texture {:?}: {}", full, e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = "\
# two materials
newmtl stone
Kd 0.1 0.2 0.3
Ns 32
map_Kd -clamp on -s 2 -o 0.5 0.25 stone diffuse.tga

newmtl glass
Kd 0.9 0.9 1.0
Ks 1 1 1
d 0.25
map_Kn normals.tga
";

    fn mesh_with_material() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_material().unwrap();
        mesh
    }

    #[test]
    fn test_parse_map_options() {
        let options = parse_map_options("-clamp on -s 2 -o 0.5 0.25 textures/a b.tga");

        assert!(options.clamp);
        assert_eq!(options.scale, [2.0, 2.0, 2.0]);
        assert_eq!(options.offset, [0.5, 0.25, 0.0]);
        assert_eq!(options.path, Some(PathBuf::from("textures/a b.tga")));
    }

    #[test]
    fn test_parse_map_options_defaults() {
        let options = parse_map_options("plain.tga");
        assert_eq!(options, MapOptions {
            path: Some(PathBuf::from("plain.tga")),
            ..MapOptions::default()
        });

        let options = parse_map_options("-clamp off -s 1 2 3 -bm 0.5 x.tga");
        assert!(!options.clamp);
        assert_eq!(options.scale, [1.0, 2.0, 3.0]);
        assert_eq!(options.path, Some(PathBuf::from("x.tga")));

        assert_eq!(parse_map_options("-clamp on").path, None);
    }

    #[test]
    fn test_parse_material_block() {
        let mut mesh = mesh_with_material();
        assert!(parse_material(LIBRARY, "stone", &mut mesh, 0, None).unwrap());

        let material = mesh.material(0);
        assert_eq!(material.name.as_deref(), Some("stone"));
        assert_eq!(material.property(PropertyKind::Diffuse).color, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(material.property(PropertyKind::Shininess).color[0], 32.0);

        let map = material.property(PropertyKind::Diffuse);
        assert!(map.clamp);
        assert_eq!(map.scale, [2.0; 3]);
        assert_eq!(map.map_path, Some(PathBuf::from("stone diffuse.tga")));
        assert!(map.texture.is_none());

        // 后一个材质块的内容不会泄漏进来
        assert_eq!(material.property(PropertyKind::Specular).color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_parse_material_alpha() {
        let mut mesh = mesh_with_material();
        assert!(parse_material(LIBRARY, "glass", &mut mesh, 0, None).unwrap());

        let material = mesh.material(0);
        assert_eq!(material.alpha(), 0.25);
        assert_eq!(
            material.property(PropertyKind::Normal).map_path,
            Some(PathBuf::from("normals.tga"))
        );

        let mut mesh = mesh_with_material();
        parse_material("newmtl m\nTr 0.25\n", "m", &mut mesh, 0, None).unwrap();
        assert_eq!(mesh.material(0).alpha(), 0.75);
    }

    #[test]
    fn test_missing_material_keeps_defaults() {
        let mut mesh = mesh_with_material();
        assert!(!parse_material(LIBRARY, "wood", &mut mesh, 0, None).unwrap());

        assert!(mesh.material(0).name.is_none());
        assert_eq!(mesh.material(0).property(PropertyKind::Diffuse).color, [0.8, 0.8, 0.8, 1.0]);
    }

    #[test]
    fn test_parse_material_loads_textures() {
        let dir = tempfile::tempdir().unwrap();
        TextureData::new_rgba8(1, 1, vec![255, 0, 0, 255])
            .save_tga(dir.path().join("red.tga"))
            .unwrap();

        let mut mesh = mesh_with_material();
        let source = "newmtl red\nmap_Kd red.tga\nmap_Ks missing.tga\n";
        assert!(parse_material(source, "red", &mut mesh, 0, Some(dir.path())).unwrap());

        let diffuse = mesh.material(0).property(PropertyKind::Diffuse);
        assert_eq!(diffuse.texture.as_ref().map(|t| t.width), Some(1));
        assert_eq!(diffuse.map_path, Some(PathBuf::from("red.tga")));

        // 缺失的贴图只产生警告
        let specular = mesh.material(0).property(PropertyKind::Specular);
        assert_eq!(specular.map_path, Some(PathBuf::from("missing.tga")));
        assert!(specular.texture.is_none());
    }
}
