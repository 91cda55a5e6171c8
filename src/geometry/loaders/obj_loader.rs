/// OBJ 文件加载器
///
/// 逐行解析 Wavefront OBJ 文本，支持 `v`、`vt`、`vn`、`f`、`l`、`s`、
/// `mtllib`、`usemtl` 指令。面和线段的顶点在解析过程中通过
/// [`ParseContext`] 去重，输出顶点数只取决于实际用到的属性组合。
///
/// 格式错误的行不会中断加载：数值缺失按 0 处理，无法解析的顶点引用
/// 结束当前指令，越界的位置索引被丢弃，每种情况都会输出警告。
use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use super::intern::{ParseContext, RawIndices, VertexKey};
use super::mtl_loader;
use super::{LoadOptions, MeshLoader};
use crate::core::error::Result;
use crate::geometry::mesh::Mesh;
use crate::geometry::vertex::Index;
use crate::math::geometry::{accumulate, face_normal};
use crate::math::{normalize_or_zero, to_array, vec3};
use crate::{loader_info, loader_warn, span_trace};

/// OBJ 格式加载器
///
/// # 使用示例
///
/// ```rust,no_run
/// use wavefront_mesh::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// println!("加载了 {} 个顶点", mesh.vertex_count());
/// # Ok::<(), wavefront_mesh::core::error::MeshError>(())
/// ```
pub struct ObjLoader;

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<Mesh> {
        Self::load_with_options(path, &LoadOptions::default())
    }

    fn load_from_memory(data: &[u8]) -> Result<Mesh> {
        Self::parse(data, None, &LoadOptions::default())
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

impl ObjLoader {
    /// 按指定选项从文件加载
    ///
    /// `mtllib` 引用的材质库相对于 OBJ 文件所在目录查找。
    pub fn load_with_options(path: &Path, options: &LoadOptions) -> Result<Mesh> {
        let span = span_trace!("load_obj");
        let _guard = span.enter();

        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let dir = path.parent().unwrap_or(Path::new("."));

        let mesh = Self::parse(reader, Some(dir), options)?;

        loader_info!(
            "Loaded {:?}: {} vertices, {} triangles, {} lines, {} surfaces, {} materials",
            path,
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.total_line_count(),
            mesh.surface_count(),
            mesh.material_count()
        );
        Ok(mesh)
    }

    /// 从任意输入流解析
    ///
    /// `base_dir` 为 `None` 时不查找材质库，`usemtl` 只创建默认材质。
    pub fn parse<R: BufRead>(mut reader: R, base_dir: Option<&Path>, options: &LoadOptions) -> Result<Mesh> {
        let mut parser = ObjParser::new(base_dir, options)?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            parser.line_no += 1;
            parser.read_line(&String::from_utf8_lossy(&buf))?;
        }

        let mut mesh = parser.mesh;
        if options.post_process {
            mesh.minimize()?;
            mesh.process()?;
        }
        Ok(mesh)
    }
}

/// 解析状态
struct ObjParser<'a> {
    mesh: Mesh,
    ctx: ParseContext,
    options: &'a LoadOptions,
    base_dir: Option<&'a Path>,

    /// 当前表面
    surface: usize,
    /// 当前平滑组（0 为关闭）
    group: i32,
    /// 最近一条 `mtllib` 指定的文件
    mtllib: Option<PathBuf>,
    /// 已读取的材质库内容
    libraries: HashMap<PathBuf, Option<String>>,

    line_no: usize,
}

impl<'a> ObjParser<'a> {
    fn new(base_dir: Option<&'a Path>, options: &'a LoadOptions) -> Result<Self> {
        let mut mesh = Mesh::new();

        // 默认材质 0 与默认表面 0
        let mi = mesh.add_material()?;
        let surface = mesh.add_surface(mi)?;

        Ok(Self {
            mesh,
            ctx: ParseContext::new(),
            options,
            base_dir,
            surface,
            group: 0,
            mtllib: None,
            libraries: HashMap::new(),
            line_no: 0,
        })
    }

    fn read_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        let (key, args) = match line.split_once(char::is_whitespace) {
            Some((key, args)) => (key, args.trim()),
            None => (line, ""),
        };

        match key {
            "v" => {
                let [x, y, z] = self.read_floats::<3>(args);
                self.ctx.push_position([x, y, z]);
            }
            "vt" => {
                let [u, v] = self.read_floats::<2>(args);
                self.ctx.push_texcoord([u, v]);
            }
            "vn" => {
                let [x, y, z] = self.read_floats::<3>(args);
                self.ctx.push_normal([x, y, z]);
            }
            "f" => self.read_face(args)?,
            "l" => self.read_polyline(args)?,
            "s" => {
                self.group = match args.split_whitespace().next() {
                    Some("off") | None => 0,
                    Some(id) => id.parse().unwrap_or_else(|_| {
                        loader_warn!("Line {}: invalid smoothing group '{}'", self.line_no, id);
                        0
                    }),
                };
            }
            "mtllib" => match args.split_whitespace().next() {
                Some(file) => self.mtllib = Some(PathBuf::from(file)),
                None => loader_warn!("Line {}: mtllib without a file name", self.line_no),
            },
            "usemtl" => match args.split_whitespace().next() {
                Some(name) => self.use_material(name)?,
                None => loader_warn!("Line {}: usemtl without a material name", self.line_no),
            },
            _ => {}
        }
        Ok(())
    }

    /// 读取最多 N 个浮点数，缺失或无法解析的分量为 0
    fn read_floats<const N: usize>(&self, args: &str) -> [f32; N] {
        let mut values = [0.0; N];
        for (slot, token) in values.iter_mut().zip(args.split_whitespace()) {
            match token.parse() {
                Ok(v) => *slot = v,
                Err(_) => loader_warn!("Line {}: invalid number '{}'", self.line_no, token),
            }
        }
        values
    }

    /// 把一行顶点引用转换为输出顶点
    fn read_vertices(&mut self, args: &str) -> Result<(Vec<Index>, Vec<VertexKey>)> {
        let mut vertices = Vec::new();
        let mut keys = Vec::new();

        for token in args.split_whitespace() {
            let Some(raw) = RawIndices::parse(token) else {
                loader_warn!("Line {}: invalid vertex reference '{}'", self.line_no, token);
                break;
            };
            let Some(key) = self.ctx.key(raw, self.group) else {
                loader_warn!("Line {}: position index {} out of range", self.line_no, raw.position);
                continue;
            };

            vertices.push(self.ctx.intern(&mut self.mesh, key)?);
            keys.push(key);
        }
        Ok((vertices, keys))
    }

    fn read_face(&mut self, args: &str) -> Result<()> {
        let (vertices, keys) = self.read_vertices(args)?;
        if vertices.len() < 3 {
            loader_warn!("Line {}: face with fewer than 3 vertices", self.line_no);
            return Ok(());
        }

        // 平滑组内且首个顶点没有法线时，把面法线累加到各顶点
        if self.group != 0 && keys[0].normal.is_none() {
            let n = face_normal(
                self.ctx.position(keys[0].position),
                self.ctx.position(keys[1].position),
                self.ctx.position(keys[2].position),
            );
            let n = to_array(&normalize_or_zero(vec3(n)));

            for &vi in &vertices {
                let mut normal = self.mesh.vertex(vi).normal;
                accumulate(&mut normal, n);
                self.mesh.set_vertex_normal(vi, normal)?;
            }
        }

        // 以第一个顶点为中心扇形三角化
        for i in 1..vertices.len() - 1 {
            self.mesh
                .add_polygon(self.surface, [vertices[0], vertices[i], vertices[i + 1]])?;
        }
        Ok(())
    }

    fn read_polyline(&mut self, args: &str) -> Result<()> {
        let (vertices, _) = self.read_vertices(args)?;
        if vertices.len() < 2 {
            loader_warn!("Line {}: line with fewer than 2 vertices", self.line_no);
            return Ok(());
        }

        for pair in vertices.windows(2) {
            self.mesh.add_line(self.surface, [pair[0], pair[1]])?;
        }
        Ok(())
    }

    /// `usemtl`：新建材质和表面，并从材质库读取定义
    fn use_material(&mut self, name: &str) -> Result<()> {
        let mi = self.mesh.add_material()?;
        let si = self.mesh.add_surface(mi)?;

        match (self.base_dir, &self.mtllib) {
            (Some(dir), Some(file)) => {
                let path = dir.join(file);
                let texture_dir = path.parent().map(Path::to_path_buf);

                let source = self
                    .libraries
                    .entry(path.clone())
                    .or_insert_with(|| match std::fs::read(&path) {
                        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                        Err(e) => {
                            loader_warn!("Failed to read material library {:?}: {}", path, e);
                            None
                        }
                    });

                if let Some(source) = source {
                    let texture_dir = texture_dir.filter(|_| self.options.load_textures);
                    let found =
                        mtl_loader::parse_material(source, name, &mut self.mesh, mi, texture_dir.as_deref())?;
                    if !found {
                        loader_warn!("Material '{}' not found in {:?}", name, path);
                    }
                }
            }
            (Some(_), None) => {
                loader_warn!("Line {}: usemtl '{}' before any mtllib", self.line_no, name);
            }
            (None, _) => {}
        }

        self.surface = si;
        Ok(())
    }
}
