use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoordError;

/// 坐标系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordSystem {
    /// GPS 原始坐标
    Wgs84,
    /// 国测局坐标 (火星坐标, 高德/腾讯/谷歌中国)
    Gcj02,
    /// 百度坐标
    Bd09,
}

impl fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoordSystem::Wgs84 => "wgs84",
            CoordSystem::Gcj02 => "gcj02",
            CoordSystem::Bd09 => "bd09",
        };
        f.write_str(s)
    }
}

impl FromStr for CoordSystem {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wgs84" | "wgs-84" | "gps" => Ok(CoordSystem::Wgs84),
            "gcj02" | "gcj-02" | "amap" | "mars" => Ok(CoordSystem::Gcj02),
            "bd09" | "bd-09" | "baidu" => Ok(CoordSystem::Bd09),
            _ => Err(CoordError::UnknownSystem(s.to_string())),
        }
    }
}

/// 经纬度坐标 (十进制度)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// (0, 0) 表示 "无结果"
    pub const ORIGIN: GeoPoint = GeoPoint { lon: 0.0, lat: 0.0 };

    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_origin(&self) -> bool {
        self.lon == 0.0 && self.lat == 0.0
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

/// 墨卡托平面坐标, 单位米
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 屏幕像素坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 瓦片坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl TileIndex {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// 经纬度边界框, 始终满足 min <= max.
///
/// 只能通过 [`BoundingBox::from_corners`] 构造, 反序列化同样经过它.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBoundingBox")]
pub struct BoundingBox {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

/// 未经校验的边界框字段
#[derive(Deserialize)]
struct RawBoundingBox {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl From<RawBoundingBox> for BoundingBox {
    fn from(raw: RawBoundingBox) -> Self {
        BoundingBox::from_corners(
            GeoPoint::new(raw.min_lon, raw.min_lat),
            GeoPoint::new(raw.max_lon, raw.max_lat),
        )
    }
}

impl BoundingBox {
    /// 由左下、右上两个角点构造.
    ///
    /// 地图旋转可能导致左下右上互换, 这里按分量交换回来.
    pub fn from_corners(bottom_left: GeoPoint, top_right: GeoPoint) -> Self {
        if bottom_left.lon > top_right.lon || bottom_left.lat > top_right.lat {
            log::debug!(
                "bbox corners inverted: ({}, {}) / ({}, {})",
                bottom_left.lon,
                bottom_left.lat,
                top_right.lon,
                top_right.lat
            );
        }
        Self {
            min_lon: bottom_left.lon.min(top_right.lon),
            min_lat: bottom_left.lat.min(top_right.lat),
            max_lon: bottom_left.lon.max(top_right.lon),
            max_lat: bottom_left.lat.max(top_right.lat),
        }
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// WMS 请求使用的 `[minx, miny, maxx, maxy]` 顺序
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lon..=self.max_lon).contains(&point.lon)
            && (self.min_lat..=self.max_lat).contains(&point.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_system_round_trip() {
        for system in [CoordSystem::Wgs84, CoordSystem::Gcj02, CoordSystem::Bd09] {
            let parsed: CoordSystem = system.to_string().parse().unwrap();
            assert_eq!(parsed, system);
        }
        assert_eq!("Baidu".parse::<CoordSystem>().unwrap(), CoordSystem::Bd09);
        assert!(matches!(
            "utm".parse::<CoordSystem>(),
            Err(CoordError::UnknownSystem(_))
        ));
    }

    #[test]
    fn test_coord_system_serde() {
        let json = serde_json::to_string(&CoordSystem::Gcj02).unwrap();
        assert_eq!(json, "\"gcj02\"");
    }

    #[test]
    fn test_bbox_swaps_inverted_corners() {
        let bbox = BoundingBox::from_corners(GeoPoint::new(120.0, 31.0), GeoPoint::new(119.0, 30.0));
        assert_eq!(bbox.to_array(), [119.0, 30.0, 120.0, 31.0]);
    }

    #[test]
    fn test_bbox_swaps_single_axis() {
        let bbox = BoundingBox::from_corners(GeoPoint::new(119.0, 31.0), GeoPoint::new(120.0, 30.0));
        assert_eq!(bbox.min_lon(), 119.0);
        assert_eq!(bbox.max_lon(), 120.0);
        assert_eq!(bbox.min_lat(), 30.0);
        assert_eq!(bbox.max_lat(), 31.0);
        assert!(bbox.contains(GeoPoint::new(119.5, 30.5)));
        assert!(!bbox.contains(GeoPoint::new(121.0, 30.5)));
    }

    #[test]
    fn test_bbox_deserialize_normalizes() {
        let json = r#"{ "min_lon": 120.0, "min_lat": 31.0, "max_lon": 119.0, "max_lat": 30.0 }"#;
        let bbox: BoundingBox = serde_json::from_str(json).unwrap();
        assert_eq!(bbox.to_array(), [119.0, 30.0, 120.0, 31.0]);
    }

    #[test]
    fn test_bbox_serde_round_trip() {
        let bbox = BoundingBox::from_corners(GeoPoint::new(119.0, 30.0), GeoPoint::new(120.0, 31.0));
        let json = serde_json::to_value(bbox).unwrap();
        assert_eq!(json["min_lon"], 119.0);
        assert_eq!(json["max_lat"], 31.0);
        let back: BoundingBox = serde_json::from_value(json).unwrap();
        assert_eq!(back, bbox);
    }

    #[test]
    fn test_origin_sentinel() {
        assert!(GeoPoint::ORIGIN.is_origin());
        assert!(!GeoPoint::new(0.0, 1e-9).is_origin());
    }
}
