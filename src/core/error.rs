//! 错误处理模块
//!
//! 定义了网格库中使用的统一错误类型。
//!
//! # 错误分类
//!
//! - **资源耗尽**：数组增长失败，返回 `OutOfMemory`，已有数据保持不变
//! - **非法索引**：CRUD 接口收到越界索引，返回 `InvalidIndex`
//! - **解析失败**：文件格式不受支持或内容无法解析
//! - **IO 错误**：文件读写失败
//!
//! 对于 MTL 缺失、纹理无法解码等"尽力而为"的情况，加载器只记录警告，
//! 不会返回错误。

use std::fmt;

/// 库统一的 Result 类型
pub type Result<T> = std::result::Result<T, MeshError>;

/// 网格库的错误类型
#[derive(Debug)]
pub enum MeshError {
    /// 内存分配失败（数组无法增长）
    OutOfMemory {
        /// 正在增长的数组
        what: &'static str,
    },

    /// 传入的索引超出范围
    InvalidIndex {
        /// 索引所指的元素类型（vertex、surface ...）
        kind: &'static str,
        index: usize,
        count: usize,
    },

    /// 解析错误
    Parse(ParseError),

    /// IO 错误
    Io(std::io::Error),

    /// 配置错误
    Config(ConfigError),

    /// 纹理错误
    Texture(TextureError),
}

/// 解析相关的错误
#[derive(Debug)]
pub enum ParseError {
    /// 不支持的文件格式
    UnsupportedFormat(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 纹理相关的错误
#[derive(Debug)]
pub enum TextureError {
    /// 文件头不完整
    TruncatedHeader,

    /// 不支持的图像类型（仅支持未压缩真彩色）
    UnsupportedImageType(u8),

    /// 不支持的像素深度（仅支持 24/32 位）
    UnsupportedDepth(u8),

    /// 像素数据长度与尺寸不符
    SizeMismatch { expected: usize, actual: usize },

    /// 图像解码失败
    Decode(String),
}

impl MeshError {
    /// 构造一个越界索引错误
    pub fn invalid_index(kind: &'static str, index: usize, count: usize) -> Self {
        MeshError::InvalidIndex { kind, index, count }
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::OutOfMemory { what } => write!(f, "Out of memory while growing {}", what),
            MeshError::InvalidIndex { kind, index, count } => {
                write!(f, "Invalid {} index {} (count is {})", kind, index, count)
            }
            MeshError::Parse(e) => write!(f, "Parse error: {}", e),
            MeshError::Io(e) => write!(f, "IO error: {}", e),
            MeshError::Config(e) => write!(f, "Configuration error: {}", e),
            MeshError::Texture(e) => write!(f, "Texture error: {}", e),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::TruncatedHeader => write!(f, "TGA header is truncated"),
            TextureError::UnsupportedImageType(t) => {
                write!(f, "Unsupported TGA image type {} (only uncompressed true-color)", t)
            }
            TextureError::UnsupportedDepth(d) => {
                write!(f, "Unsupported TGA depth {} (only 24 or 32 bit)", d)
            }
            TextureError::SizeMismatch { expected, actual } => {
                write!(f, "Pixel data is {} bytes, expected {}", actual, expected)
            }
            TextureError::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Io(e) => Some(e),
            MeshError::Parse(e) => Some(e),
            MeshError::Config(e) => Some(e),
            MeshError::Texture(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ParseError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for TextureError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Io(err)
    }
}

impl From<ParseError> for MeshError {
    fn from(err: ParseError) -> Self {
        MeshError::Parse(err)
    }
}

impl From<ConfigError> for MeshError {
    fn from(err: ConfigError) -> Self {
        MeshError::Config(err)
    }
}

impl From<TextureError> for MeshError {
    fn from(err: TextureError) -> Self {
        MeshError::Texture(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index_message() {
        let err = MeshError::invalid_index("vertex", 7, 3);
        assert_eq!(err.to_string(), "Invalid vertex index 7 (count is 3)");
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err: MeshError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(matches!(err, MeshError::Io(_)));
    }
}
