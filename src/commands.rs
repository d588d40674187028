use serde::{Deserialize, Serialize};

use crate::coords::{convert, out_of_china};
use crate::distance::distance;
use crate::error::Result;
use crate::mercator::{lonlat_to_mercator, mercator_to_wgs84};
use crate::tile::{resolution, tile_bbox, xyz_to_baidu_tile};
use crate::types::{BoundingBox, CoordSystem, GeoPoint, PlanarPoint, TileIndex};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResult {
    pub from: CoordSystem,
    pub to: CoordSystem,
    pub input: GeoPoint,
    pub output: GeoPoint,
    pub out_of_china: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnprojectResult {
    pub input: PlanarPoint,
    pub output: GeoPoint,
    /// 无匹配分带, output 为 (0, 0)
    pub no_result: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileBoundsResult {
    pub tile: TileIndex,
    pub tile_size: u32,
    pub resolution: f64,
    pub bbox: BoundingBox,
    pub baidu_tile: (i64, i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResult {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub meters: f64,
}

pub fn convert_point(point: GeoPoint, from: CoordSystem, to: CoordSystem) -> ConvertResult {
    let output = convert(point, from, to);
    log::info!(
        "{} -> {}: ({}, {}) -> ({}, {})",
        from,
        to,
        point.lon,
        point.lat,
        output.lon,
        output.lat
    );
    ConvertResult {
        from,
        to,
        input: point,
        output,
        out_of_china: out_of_china(point.lon, point.lat),
    }
}

pub fn project_point(point: GeoPoint) -> PlanarPoint {
    lonlat_to_mercator(point.lon, point.lat)
}

pub fn unproject_point(point: PlanarPoint) -> UnprojectResult {
    let output = mercator_to_wgs84(point.x, point.y);
    if output.is_origin() {
        log::warn!("墨卡托坐标 ({}, {}) 无法反算", point.x, point.y);
    }
    UnprojectResult {
        input: point,
        output,
        no_result: output.is_origin(),
    }
}

pub fn tile_bounds(tile: TileIndex, tile_size: u32) -> Result<TileBoundsResult> {
    let bbox = tile_bbox(tile_size, tile.x, tile.y, tile.z)?;
    Ok(TileBoundsResult {
        tile,
        tile_size,
        resolution: resolution(tile.z)?,
        bbox,
        baidu_tile: xyz_to_baidu_tile(tile)?,
    })
}

pub fn point_distance(from: GeoPoint, to: GeoPoint) -> DistanceResult {
    DistanceResult {
        from,
        to,
        meters: distance(from, to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoordError;

    #[test]
    fn test_convert_point() {
        let result = convert_point(GeoPoint::new(116.404, 39.915), CoordSystem::Wgs84, CoordSystem::Bd09);
        assert!(!result.out_of_china);
        assert!((result.output.lon - 116.41662724378733).abs() < 1e-9);

        let result = convert_point(GeoPoint::new(-74.006, 40.7128), CoordSystem::Wgs84, CoordSystem::Gcj02);
        assert!(result.out_of_china);
        assert_eq!(result.output, result.input);
    }

    #[test]
    fn test_project_then_unproject_serializes() {
        let planar = project_point(GeoPoint::new(116.404, 39.915));
        let result = unproject_point(planar);
        assert!(!result.no_result);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["no_result"], false);
        assert!(json["output"]["lon"].is_f64());
    }

    #[test]
    fn test_unproject_sentinel() {
        let result = unproject_point(PlanarPoint::new(1.0, f64::NAN));
        assert!(result.no_result);
        assert_eq!(result.output, GeoPoint::ORIGIN);
    }

    #[test]
    fn test_tile_bounds() {
        let result = tile_bounds(TileIndex::new(0, 0, 18), 256).unwrap();
        assert_eq!(result.resolution, 1.0);
        assert_eq!(result.baidu_tile, (-131072, 131071));
        assert!(result.bbox.min_lat() <= result.bbox.max_lat());
        assert!(result.bbox.min_lat() >= 0.0);

        assert!(matches!(
            tile_bounds(TileIndex::new(0, 0, 31), 256),
            Err(CoordError::InvalidZoom(31))
        ));
    }

    #[test]
    fn test_point_distance() {
        let result = point_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((result.meters - 111194.93).abs() < 0.01);
    }
}
