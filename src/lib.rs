//! WGS84 / GCJ02 / BD09 坐标转换与百度瓦片工具

pub mod commands;
pub mod config;
pub mod coords;
pub mod distance;
pub mod error;
pub mod mercator;
pub mod tile;
pub mod types;

pub use coords::{
    amap_to_wgs84, bd09_to_gcj02, bd09_to_wgs84, convert, gcj02_to_bd09, gcj02_to_wgs84,
    out_of_china, wgs84_to_bd09, wgs84_to_gcj02,
};
pub use distance::distance;
pub use error::{CoordError, Result};
pub use mercator::{lonlat_to_mercator, mercator_to_wgs84};
pub use tile::{screen_bbox, tile_bbox, xyz_to_baidu_tile, ScreenProjection, MAX_ZOOM};
pub use types::{BoundingBox, CoordSystem, GeoPoint, PlanarPoint, ScreenPoint, TileIndex};
