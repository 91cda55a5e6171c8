//! 配置管理模块
//!
//! 提供加载器、优化器、写出器和日志系统的配置。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (wavefront_mesh.toml)
//!
//! ```toml
//! [files]
//! input = "models/chest.obj"
//! output = "out/chest.obj"
//! mtl = "out/chest.mtl"
//!
//! [loader]
//! load_textures = true
//! post_process = true
//!
//! [optimizer]
//! weld = true
//! weld_epsilon = 0.00001
//! weld_dot = 0.999
//! sort = true
//! cache_size = 16
//!
//! [writer]
//! precision = 6
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 全局配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 输入输出文件
    #[serde(default)]
    pub files: FilesConfig,

    /// 加载器配置
    #[serde(default)]
    pub loader: LoaderConfig,

    /// 优化器配置
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// 写出器配置
    #[serde(default)]
    pub writer: WriterConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 输入输出文件配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// 要加载的 OBJ 文件
    #[serde(default)]
    pub input: Option<String>,

    /// 写出的 OBJ 文件（为空则不写出）
    #[serde(default)]
    pub output: Option<String>,

    /// 写出的 MTL 文件
    #[serde(default)]
    pub mtl: Option<String>,
}

/// 加载器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// 解析 MTL 时是否解码 map_* 引用的 TGA 纹理
    #[serde(default = "default_true")]
    pub load_textures: bool,

    /// 解析完成后是否执行精简、切线计算和透明度排序
    #[serde(default = "default_true")]
    pub post_process: bool,
}

/// 优化器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// 是否焊接相近顶点
    #[serde(default = "default_true")]
    pub weld: bool,

    /// 位置与纹理坐标的逐分量容差
    #[serde(default = "default_weld_epsilon")]
    pub weld_epsilon: f32,

    /// 法线点积阈值
    #[serde(default = "default_weld_dot")]
    pub weld_dot: f32,

    /// 是否按顶点缓存重新排序三角形
    #[serde(default = "default_true")]
    pub sort: bool,

    /// 模拟的 FIFO 顶点缓存大小
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

/// 写出器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// 浮点数小数位数
    #[serde(default = "default_precision")]
    pub precision: usize,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default)]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_true() -> bool { true }
fn default_weld_epsilon() -> f32 { 1e-5 }
fn default_weld_dot() -> f32 { 0.999 }
fn default_cache_size() -> usize { 16 }
fn default_precision() -> usize { 6 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_log_file() -> String { "wavefront_mesh.log".to_string() }

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            load_textures: default_true(),
            post_process: default_true(),
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            weld: default_true(),
            weld_epsilon: default_weld_epsilon(),
            weld_dot: default_weld_dot(),
            sort: default_true(),
            cache_size: default_cache_size(),
        }
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: false,
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--input <path>` / `--output <path>` / `--mtl <path>`
    /// - `--cache-size <n>`
    /// - `--precision <n>`
    /// - `--no-textures`、`--no-weld`、`--no-sort`
    ///
    /// 第一个不以 `--` 开头、且不是某个选项取值的参数视为输入文件；
    /// 给出 `--input` 时忽略位置参数。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        let value_of = |flag: &str| -> Option<&String> {
            args.iter()
                .position(|a| a == flag)
                .and_then(|idx| args.get(idx + 1))
        };

        let explicit_input = value_of("--input").cloned();
        if let Some(output) = value_of("--output") {
            self.files.output = Some(output.clone());
        }
        if let Some(mtl) = value_of("--mtl") {
            self.files.mtl = Some(mtl.clone());
        }
        if let Some(size) = value_of("--cache-size").and_then(|v| v.parse().ok()) {
            self.optimizer.cache_size = size;
        }
        if let Some(precision) = value_of("--precision").and_then(|v| v.parse().ok()) {
            self.writer.precision = precision;
        }

        if args.iter().any(|a| a == "--no-textures") {
            self.loader.load_textures = false;
        }
        if args.iter().any(|a| a == "--no-weld") {
            self.optimizer.weld = false;
        }
        if args.iter().any(|a| a == "--no-sort") {
            self.optimizer.sort = false;
        }

        // --input 优先于位置参数
        if let Some(input) = explicit_input {
            self.files.input = Some(input);
            return;
        }

        // 位置参数（跳过程序名）
        const VALUED: [&str; 5] = ["--input", "--output", "--mtl", "--cache-size", "--precision"];
        let mut skip_next = true;
        for arg in &args {
            if skip_next {
                skip_next = false;
                continue;
            }
            if VALUED.contains(&arg.as_str()) {
                skip_next = true;
                continue;
            }
            if !arg.starts_with("--") {
                self.files.input = Some(arg.clone());
                break;
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.optimizer.cache_size < 3 {
            return Err(ConfigError::InvalidValue {
                field: "optimizer.cache_size".to_string(),
                reason: "Cache must hold at least one triangle (3 vertices)".to_string(),
            }
            .into());
        }

        if !(self.optimizer.weld_epsilon >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "optimizer.weld_epsilon".to_string(),
                reason: "Epsilon must be non-negative".to_string(),
            }
            .into());
        }

        if !(-1.0..=1.0).contains(&self.optimizer.weld_dot) {
            return Err(ConfigError::InvalidValue {
                field: "optimizer.weld_dot".to_string(),
                reason: "Dot product threshold must be within [-1, 1]".to_string(),
            }
            .into());
        }

        if self.writer.precision > 9 {
            return Err(ConfigError::InvalidValue {
                field: "writer.precision".to_string(),
                reason: "Precision must be at most 9 digits".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
