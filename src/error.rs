//! 错误类型

use std::num::ParseFloatError;

use crate::tile::MAX_ZOOM;

pub type Result<T> = std::result::Result<T, CoordError>;

#[derive(Debug, thiserror::Error)]
pub enum CoordError {
    /// 层级超出分辨率表范围
    #[error("invalid zoom level {0} (expected 0..={max})", max = MAX_ZOOM)]
    InvalidZoom(u32),

    /// 地图缩放比例不能为 0
    #[error("invalid map level {0}")]
    InvalidLevel(u32),

    /// 屏幕坐标偏移超出 i32 范围
    #[error("screen coordinates out of range")]
    ScreenOutOfRange,

    #[error("unknown coordinate system: {0}")]
    UnknownSystem(String),

    #[error("cannot parse '{input}' as a number: {source}")]
    Parse {
        input: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// 解析十进制数字符串
pub(crate) fn parse_f64(input: &str) -> Result<f64> {
    input.trim().parse::<f64>().map_err(|source| CoordError::Parse {
        input: input.to_string(),
        source,
    })
}
