//! 百度地图瓦片工具
//!
//! 通过瓦片 x, y, z 计算 WMS 瓦片 BBox, 以及 XYZ 与百度瓦片编号互转.

use once_cell::sync::Lazy;

use crate::error::{CoordError, Result};
use crate::mercator::mercator_to_wgs84;
use crate::types::{BoundingBox, GeoPoint, ScreenPoint, TileIndex};

/// 分辨率表长度为 30, 有效层级 0..=29
pub const MAX_ZOOM: u32 = 29;

/// 每个层级的分辨率 (米/像素), `2^(18 - z)`
static RESOLUTIONS: Lazy<[f64; MAX_ZOOM as usize + 1]> = Lazy::new(|| {
    let mut zooms = [0.0; MAX_ZOOM as usize + 1];
    for (z, res) in zooms.iter_mut().enumerate() {
        *res = 2f64.powi(18 - z as i32);
    }
    zooms
});

/// 获取层级对应的分辨率
pub fn resolution(z: u32) -> Result<f64> {
    RESOLUTIONS
        .get(z as usize)
        .copied()
        .ok_or(CoordError::InvalidZoom(z))
}

/// 通过瓦片图 x, y, z 获取 WMS 瓦片 BBox
pub fn tile_bbox(tile_size: u32, x: u32, y: u32, z: u32) -> Result<BoundingBox> {
    let res = resolution(z)?;
    let size = tile_size as f64;
    let min_x = x as f64 * size * res;
    let min_y = y as f64 * size * res;
    let max_x = (x as f64 + 1.0) * size * res;
    let max_y = (y as f64 + 1.0) * size * res;

    // 百度墨卡托坐标 -> 经纬度
    let bottom_left = mercator_to_wgs84(min_x, min_y);
    let top_right = mercator_to_wgs84(max_x, max_y);

    Ok(BoundingBox::from_corners(bottom_left, top_right))
}

/// 同 [`tile_bbox`], 参数为瓦片坐标
pub fn tile_index_bbox(tile_size: u32, tile: TileIndex) -> Result<BoundingBox> {
    tile_bbox(tile_size, tile.x, tile.y, tile.z)
}

/// 地图屏幕坐标与经纬度之间的投影, 由地图 SDK 提供
pub trait ScreenProjection {
    fn to_screen(&self, point: GeoPoint) -> ScreenPoint;

    fn from_screen(&self, point: ScreenPoint) -> GeoPoint;
}

/// 通过点击的经纬度与屏幕点位获取瓦片图层的大概 BBox.
///
/// `level` 为地图当前缩放比例, `layer_size` 为瓦片图层大小 (百度一般为 256).
/// 结果为近似值.
pub fn screen_bbox<P: ScreenProjection + ?Sized>(
    level: u32,
    projection: &P,
    layer_size: u32,
    point: GeoPoint,
) -> Result<BoundingBox> {
    if level == 0 {
        return Err(CoordError::InvalidLevel(level));
    }
    let scale = i32::try_from(layer_size / level).map_err(|_| CoordError::ScreenOutOfRange)?;
    let screen = projection.to_screen(point);

    // 左下角: x 左移, y 下移; 右上角: x 右移, y 上移
    let shift = |dx: i32, dy: i32| -> Result<ScreenPoint> {
        match (screen.x.checked_add(dx), screen.y.checked_add(dy)) {
            (Some(x), Some(y)) => Ok(ScreenPoint::new(x, y)),
            _ => Err(CoordError::ScreenOutOfRange),
        }
    };
    let bottom_left = shift(-scale, scale)?;
    let top_right = shift(scale, -scale)?;

    Ok(BoundingBox::from_corners(
        projection.from_screen(bottom_left),
        projection.from_screen(top_right),
    ))
}

/// 标准 XYZ 瓦片编号转百度瓦片编号.
///
/// 标准 XYZ 原点在左上角, Y 向下增加; 百度原点在 (经度0, 纬度0), Y 向上增加.
/// 层级范围与分辨率表一致.
pub fn xyz_to_baidu_tile(tile: TileIndex) -> Result<(i64, i64)> {
    if tile.z > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(tile.z));
    }
    let center = (1i64 << tile.z) / 2;
    let bx = tile.x as i64 - center;
    let by = center - 1 - tile.y as i64;
    Ok((bx, by))
}
