//! 坐标转换工具
//! 支持 WGS84、GCJ02 (高德) 和 BD09 (百度) 之间互转
//!
//! GCJ02 -> WGS84 为近似逆变换, 会有偏差, 但偏差在可接受范围之内

use std::f64::consts::PI;

use crate::types::{CoordSystem, GeoPoint};

const X_PI: f64 = PI * 3000.0 / 180.0;
/// 克拉索夫斯基椭球长半轴
const A: f64 = 6378245.0;
/// 椭球第一偏心率的平方
const EE: f64 = 0.006_693_421_622_965_943;

/// 中国大陆范围 (经度, 纬度)
pub const CHINA_LON_RANGE: (f64, f64) = (72.004, 137.8347);
pub const CHINA_LAT_RANGE: (f64, f64) = (0.8293, 55.8271);

/// 判断是否在国内, 不在国内则不做偏移. NaN 视为国外.
pub fn out_of_china(lon: f64, lat: f64) -> bool {
    !(CHINA_LON_RANGE.0..=CHINA_LON_RANGE.1).contains(&lon)
        || !(CHINA_LAT_RANGE.0..=CHINA_LAT_RANGE.1).contains(&lat)
}

/// WGS84 坐标转 GCJ02
pub fn wgs84_to_gcj02(lon: f64, lat: f64) -> GeoPoint {
    if out_of_china(lon, lat) {
        return GeoPoint::new(lon, lat);
    }
    let (dlon, dlat) = offset(lon, lat);
    GeoPoint::new(lon + dlon, lat + dlat)
}

/// GCJ02 坐标转 WGS84
pub fn gcj02_to_wgs84(gcj_lon: f64, gcj_lat: f64) -> GeoPoint {
    if out_of_china(gcj_lon, gcj_lat) {
        return GeoPoint::new(gcj_lon, gcj_lat);
    }
    let (dlon, dlat) = offset(gcj_lon, gcj_lat);
    let mg_lon = gcj_lon + dlon;
    let mg_lat = gcj_lat + dlat;
    GeoPoint::new(gcj_lon * 2.0 - mg_lon, gcj_lat * 2.0 - mg_lat)
}

/// GCJ02 坐标转 BD09
pub fn gcj02_to_bd09(gcj_lon: f64, gcj_lat: f64) -> GeoPoint {
    let x = gcj_lon;
    let y = gcj_lat;
    let z = (x * x + y * y).sqrt() + 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) + 0.000003 * (x * X_PI).cos();
    GeoPoint::new(z * theta.cos() + 0.0065, z * theta.sin() + 0.006)
}

/// BD09 坐标转 GCJ02
pub fn bd09_to_gcj02(bd_lon: f64, bd_lat: f64) -> GeoPoint {
    let x = bd_lon - 0.0065;
    let y = bd_lat - 0.006;
    let z = (x * x + y * y).sqrt() - 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) - 0.000003 * (x * X_PI).cos();
    GeoPoint::new(z * theta.cos(), z * theta.sin())
}

/// BD09 坐标转 WGS84
pub fn bd09_to_wgs84(bd_lon: f64, bd_lat: f64) -> GeoPoint {
    let gcj = bd09_to_gcj02(bd_lon, bd_lat);
    gcj02_to_wgs84(gcj.lon, gcj.lat)
}

/// WGS84 坐标转 BD09
pub fn wgs84_to_bd09(lon: f64, lat: f64) -> GeoPoint {
    let gcj = wgs84_to_gcj02(lon, lat);
    gcj02_to_bd09(gcj.lon, gcj.lat)
}

/// 高德 GCJ02 坐标转 WGS84 (与 gcj02_to_wgs84 相同)
pub fn amap_to_wgs84(gcj_lon: f64, gcj_lat: f64) -> GeoPoint {
    gcj02_to_wgs84(gcj_lon, gcj_lat)
}

/// 任意两个坐标系之间转换, 相同坐标系直接返回
pub fn convert(point: GeoPoint, from: CoordSystem, to: CoordSystem) -> GeoPoint {
    let GeoPoint { lon, lat } = point;
    match (from, to) {
        (CoordSystem::Wgs84, CoordSystem::Gcj02) => wgs84_to_gcj02(lon, lat),
        (CoordSystem::Gcj02, CoordSystem::Wgs84) => gcj02_to_wgs84(lon, lat),
        (CoordSystem::Gcj02, CoordSystem::Bd09) => gcj02_to_bd09(lon, lat),
        (CoordSystem::Bd09, CoordSystem::Gcj02) => bd09_to_gcj02(lon, lat),
        (CoordSystem::Wgs84, CoordSystem::Bd09) => wgs84_to_bd09(lon, lat),
        (CoordSystem::Bd09, CoordSystem::Wgs84) => bd09_to_wgs84(lon, lat),
        _ => point,
    }
}

/// 以 WGS84 为基准计算的 (经度, 纬度) 偏移量, 单位度
fn offset(lon: f64, lat: f64) -> (f64, f64) {
    let dlat = transform_lat(lon - 105.0, lat - 35.0);
    let dlon = transform_lon(lon - 105.0, lat - 35.0);
    let radlat = lat / 180.0 * PI;
    let magic = radlat.sin();
    let magic = 1.0 - EE * magic * magic;
    let sqrtmagic = magic.sqrt();
    let dlat = (dlat * 180.0) / ((A * (1.0 - EE)) / (magic * sqrtmagic) * PI);
    let dlon = (dlon * 180.0) / (A / sqrtmagic * radlat.cos() * PI);
    (dlon, dlat)
}

fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn transform_lon(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}
