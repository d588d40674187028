//! mapcoord 命令行
//!
//! 坐标系转换、百度墨卡托反算、瓦片 BBox 与距离计算.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process;

use mapcoord::commands::{convert_point, point_distance, project_point, tile_bounds, unproject_point};
use mapcoord::config::{default_config_path, load_settings};
use mapcoord::{CoordError, CoordSystem, GeoPoint, PlanarPoint, TileIndex};

#[derive(Parser)]
#[command(name = "mapcoord")]
#[command(about = "Convert coordinates between WGS84, GCJ02 and BD09", long_about = None)]
struct Args {
    /// Settings file (defaults to ./mapcoord.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a point between coordinate systems
    Convert {
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Source system: wgs84, gcj02 or bd09
        #[arg(long)]
        from: Option<CoordSystem>,
        /// Target system: wgs84, gcj02 or bd09
        #[arg(long)]
        to: Option<CoordSystem>,
    },
    /// Project lon/lat to spherical Mercator meters
    Mercator {
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
    },
    /// Convert Baidu Mercator meters back to lon/lat
    Unmercator {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Geographic bounding box of a Baidu tile
    TileBbox {
        x: u32,
        y: u32,
        z: u32,
        /// Tile size in pixels (defaults to the configured size)
        #[arg(long)]
        tile_size: Option<u32>,
    },
    /// Great-circle distance in meters
    Distance {
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
    },
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CoordError> {
    let path = args.config.clone().unwrap_or_else(default_config_path);
    let settings = load_settings(&path)?;
    let p = settings.precision;

    match args.command {
        Command::Convert { lon, lat, from, to } => {
            let from = from.unwrap_or(settings.from);
            let to = to.unwrap_or(settings.to);
            let result = convert_point(GeoPoint::new(lon, lat), from, to);
            emit(args.json, &result, || {
                format!("{:.p$} {:.p$}", result.output.lon, result.output.lat)
            })
        }
        Command::Mercator { lon, lat } => {
            let result = project_point(GeoPoint::new(lon, lat));
            emit(args.json, &result, || format!("{:.p$} {:.p$}", result.x, result.y))
        }
        Command::Unmercator { x, y } => {
            let result = unproject_point(PlanarPoint::new(x, y));
            emit(args.json, &result, || {
                if result.no_result {
                    "no result".to_string()
                } else {
                    format!("{:.p$} {:.p$}", result.output.lon, result.output.lat)
                }
            })
        }
        Command::TileBbox { x, y, z, tile_size } => {
            let tile_size = tile_size.unwrap_or(settings.tile_size);
            let result = tile_bounds(TileIndex::new(x, y, z), tile_size)?;
            emit(args.json, &result, || {
                let [min_lon, min_lat, max_lon, max_lat] = result.bbox.to_array();
                format!("{:.p$},{:.p$},{:.p$},{:.p$}", min_lon, min_lat, max_lon, max_lat)
            })
        }
        Command::Distance { lon1, lat1, lon2, lat2 } => {
            let result = point_distance(GeoPoint::new(lon1, lat1), GeoPoint::new(lon2, lat2));
            emit(args.json, &result, || format!("{:.2}", result.meters))
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), CoordError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let args = Args::try_parse_from([
            "mapcoord", "convert", "116.404", "39.915", "--from", "wgs84", "--to", "bd09",
        ])
        .unwrap();
        match args.command {
            Command::Convert { lon, lat, from, to } => {
                assert_eq!(lon, 116.404);
                assert_eq!(lat, 39.915);
                assert_eq!(from, Some(CoordSystem::Wgs84));
                assert_eq!(to, Some(CoordSystem::Bd09));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let args = Args::try_parse_from(["mapcoord", "--json", "unmercator", "-100", "-200"]).unwrap();
        assert!(args.json);
        assert!(matches!(args.command, Command::Unmercator { x, y } if x == -100.0 && y == -200.0));
    }

    #[test]
    fn test_parse_unknown_system_fails() {
        let result = Args::try_parse_from(["mapcoord", "convert", "1", "2", "--from", "utm"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_tile_bbox_invalid_zoom() {
        let args = Args::try_parse_from(["mapcoord", "tile-bbox", "0", "0", "30"]).unwrap();
        assert!(matches!(run(args), Err(CoordError::InvalidZoom(30))));
    }
}
