//! 经纬度距离

use crate::error::{parse_f64, Result};
use crate::types::GeoPoint;

/// 地球平均半径, 单位米
pub const MEAN_EARTH_RADIUS: f64 = 6371000.0;

/// 两个经纬度之间的球面距离, 单位米
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let ax = a.lon.to_radians();
    let ay = a.lat.to_radians();
    let bx = b.lon.to_radians();
    let by = b.lat.to_radians();

    // 球心角的余弦, 舍入误差可能略微越界
    let cos = ay.cos() * by.cos() * (ax - bx).cos() + ay.sin() * by.sin();
    MEAN_EARTH_RADIUS * cos.clamp(-1.0, 1.0).acos()
}

/// 同 [`distance`], 参数为十进制字符串
pub fn distance_str(lon1: &str, lat1: &str, lon2: &str, lat2: &str) -> Result<f64> {
    let a = GeoPoint::new(parse_f64(lon1)?, parse_f64(lat1)?);
    let b = GeoPoint::new(parse_f64(lon2)?, parse_f64(lat2)?);
    Ok(distance(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoordError;

    #[test]
    fn test_same_point_is_near_zero() {
        let p = GeoPoint::new(116.404, 39.915);
        // acos 在 1 附近精度较差
        assert!(distance(p, p) < 0.5);
    }

    #[test]
    fn test_one_degree_on_equator() {
        let d = distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 111194.93).abs() < 0.01, "d = {}", d);
    }

    #[test]
    fn test_beijing_to_shanghai() {
        let d = distance(GeoPoint::new(116.404, 39.915), GeoPoint::new(121.4737, 31.2304));
        assert!((d - 1_068_512.2).abs() < 1.0, "d = {}", d);
    }

    #[test]
    fn test_distance_str() {
        let d = distance_str("0", "0", "1", "0").unwrap();
        assert!((d - 111194.93).abs() < 0.01);
        assert!(matches!(
            distance_str("0", "x", "1", "0"),
            Err(CoordError::Parse { .. })
        ));
    }
}
