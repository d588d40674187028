use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::CoordSystem;

/// 命令行默认参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 瓦片大小 (像素)
    pub tile_size: u32,
    /// 输出小数位数
    pub precision: usize,
    /// 默认源坐标系
    pub from: CoordSystem,
    /// 默认目标坐标系
    pub to: CoordSystem,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: 256,
            precision: 6,
            from: CoordSystem::Wgs84,
            to: CoordSystem::Gcj02,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("mapcoord.json")
}

/// 读取配置, 文件不存在时返回默认值
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::debug!("配置文件 {} 不存在, 使用默认配置", path.display());
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&content)?;
    log::debug!("已加载配置: {}", path.display());
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}
