//! 墨卡托投影
//!
//! 正向为标准球面墨卡托; 反向为百度墨卡托分带多项式近似.

use std::f64::consts::PI;

use crate::types::{GeoPoint, PlanarPoint};

/// 地球赤道半径, 单位米
pub const EARTH_RADIUS: f64 = 6378137.0;

/// 百度墨卡托纬度分带阈值 (降序)
pub const MC_BANDS: [f64; 6] = [12890594.86, 8362377.87, 5591021.0, 3481989.83, 1678043.12, 0.0];

/// 每个分带的反算系数.
///
/// `[0..2]` 为经度线性项, `[2..9]` 为纬度六次多项式, `[9]` 为纬度归一化因子.
#[allow(clippy::excessive_precision)]
static MC_TO_LL: [[f64; 10]; 6] = [
    [
        1.410526172116255e-8, 0.00000898305509648872, -1.9939833816331, 200.9824383106796,
        -187.2403703815547, 91.6087516669843, -23.38765649603339, 2.57121317296198,
        -0.03801003308653, 17337981.2,
    ],
    [
        -7.435856389565537e-9, 0.000008983055097726239, -0.78625201886289, 96.32687599759846,
        -1.85204757529826, -59.36935905485877, 47.40033549296737, -16.50741931063887,
        2.28786674699375, 10260144.86,
    ],
    [
        -3.030883460898826e-8, 0.00000898305509983578, 0.30071316287616, 59.74293618442277,
        7.357984074871, -25.38371002664745, 13.45380521110908, -3.29883767235584,
        0.32710905363475, 6856817.37,
    ],
    [
        -1.981981304930552e-8, 0.000008983055099779535, 0.03278182852591, 40.31678527705744,
        0.65659298677277, -4.44255534477492, 0.85341911805263, 0.12923347998204,
        -0.04625736007561, 4482777.06,
    ],
    [
        3.09191371068437e-9, 0.000008983055096812155, 0.00006995724062, 23.10934304144901,
        -0.00023663490511, -0.6321817810242, -0.00663494467273, 0.03430082397953,
        -0.00466043876332, 2555164.4,
    ],
    [
        2.890871144776878e-9, 0.000008983055095805407, -3.068298e-8, 7.47137025468032,
        -0.00000353937994, -0.02145144861037, -0.00001234426596, 0.00010322952773,
        -0.00000323890364, 826088.5,
    ],
];

/// 经纬度转球面墨卡托.
///
/// 纬度 ±90° 处对数发散, 调用方自行避免.
pub fn lonlat_to_mercator(lon: f64, lat: f64) -> PlanarPoint {
    let x = lon * PI / 180.0 * EARTH_RADIUS;
    let a = lat * PI / 180.0;
    let y = EARTH_RADIUS / 2.0 * ((1.0 + a.sin()) / (1.0 - a.sin())).ln();
    PlanarPoint::new(x, y)
}

/// 百度墨卡托坐标转经纬度.
///
/// 找不到匹配分带时返回 [`GeoPoint::ORIGIN`], 调用方需要检查.
pub fn mercator_to_wgs84(x: f64, y: f64) -> GeoPoint {
    let abs_x = x.abs();
    let abs_y = y.abs();

    let Some(coef) = band_for(abs_y) else {
        log::debug!("no mercator band for y={}", y);
        return GeoPoint::ORIGIN;
    };

    let lon = coef[0] + coef[1] * abs_x;
    let t = abs_y / coef[9];
    let lat = coef[2..9]
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * t + c);

    // 分带常数项可能使 0 附近的结果为负, 符号只取决于输入
    GeoPoint::new(
        if x < 0.0 { -lon.abs() } else { lon.abs() },
        if y < 0.0 { -lat.abs() } else { lat.abs() },
    )
}

/// 同 [`mercator_to_wgs84`], 参数为平面坐标点
pub fn mercator_point_to_wgs84(point: PlanarPoint) -> GeoPoint {
    mercator_to_wgs84(point.x, point.y)
}

fn band_for(abs_y: f64) -> Option<&'static [f64; 10]> {
    let index = MC_BANDS.iter().position(|threshold| abs_y >= *threshold)?;
    log::trace!("mercator band {} for |y|={}", index, abs_y);
    Some(&MC_TO_LL[index])
}
