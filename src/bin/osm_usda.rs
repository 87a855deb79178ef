//! Convert a saved Overpass extract into a USDA road and building scene
//!
//! Usage:
//!   osm_usda --print-query [--bbox s,w,n,e | --center lat,lon --radius-km R]
//!   osm_usda --input extract.json [--bbox ...] [--output data/paris_roads.usda]
//!
//! The tool never touches the network: run the printed query against an
//! Overpass endpoint yourself and pass the saved JSON via `--input`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use osm_usda::geo::{bbox_from_center, build_query};
use osm_usda::{generate_scene, scene_to_file, BBox, HighwayFilter, OverpassExtract, SceneConfig};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "osm_usda", version, about = "OpenStreetMap roads and buildings to USDA")]
struct Args {
    /// Saved Overpass JSON response
    #[arg(long)]
    input: Option<PathBuf>,

    /// Bounding box as south,west,north,east
    #[arg(long, default_value = "48.815,2.224,48.902,2.469")]
    bbox: BBox,

    /// Center point as lat,lon; replaces --bbox
    #[arg(long, value_parser = parse_lat_lon, requires = "radius_km")]
    center: Option<(f64, f64)>,

    /// Radius around --center in kilometers
    #[arg(long, requires = "center")]
    radius_km: Option<f64>,

    /// Regex over highway tag values
    #[arg(long)]
    highway: Option<String>,

    /// Skip building footprints
    #[arg(long)]
    no_buildings: bool,

    /// Road width in meters
    #[arg(long)]
    width: Option<f64>,

    /// Multiplier applied to --width
    #[arg(long)]
    width_scale: Option<f64>,

    /// Lane stripe width in meters (0 disables)
    #[arg(long)]
    lane_width: Option<f64>,

    /// Lane stripe height above the road surface
    #[arg(long)]
    lane_height: Option<f64>,

    /// Road simplification tolerance in meters (0 disables)
    #[arg(long)]
    simplify: Option<f64>,

    /// Building simplification tolerance (defaults to --simplify)
    #[arg(long)]
    building_simplify: Option<f64>,

    /// Scale applied to projected coordinates
    #[arg(long)]
    scale: Option<f64>,

    /// Maximum number of road ways (0 = unlimited)
    #[arg(long)]
    max_ways: Option<usize>,

    /// Maximum number of building ways (0 = unlimited)
    #[arg(long)]
    max_buildings: Option<usize>,

    /// JSON file with scene settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "data/paris_roads.usda")]
    output: PathBuf,

    /// Print the Overpass query for the area and exit
    #[arg(long)]
    print_query: bool,

    /// Force debug logging
    #[arg(long)]
    debug: bool,
}

fn parse_lat_lon(value: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err("expected lat,lon".to_string());
    }
    let lat = parts[0].parse::<f64>().map_err(|e| format!("bad latitude '{}': {}", parts[0], e))?;
    let lon = parts[1].parse::<f64>().map_err(|e| format!("bad longitude '{}': {}", parts[1], e))?;
    Ok((lat, lon))
}

impl Args {
    fn area(&self) -> Result<BBox> {
        match (self.center, self.radius_km) {
            (Some((lat, lon)), Some(radius_km)) => Ok(bbox_from_center(lat, lon, radius_km)?),
            _ => Ok(self.bbox),
        }
    }

    fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::from_json_file(path)?,
            None => SceneConfig::default(),
        };

        if let Some(highway) = &self.highway {
            config.highway_filter = highway.clone();
        }
        if self.no_buildings {
            config.include_buildings = false;
        }
        if let Some(v) = self.width {
            config.road_width = v;
        }
        if let Some(v) = self.width_scale {
            config.width_scale = v;
        }
        if let Some(v) = self.lane_width {
            config.lane_width = v;
        }
        if let Some(v) = self.lane_height {
            config.lane_height = v;
        }
        if let Some(v) = self.simplify {
            config.simplify = v;
        }
        if self.building_simplify.is_some() {
            config.building_simplify = self.building_simplify;
        }
        if let Some(v) = self.scale {
            config.scale = v;
        }
        if let Some(v) = self.max_ways {
            config.max_ways = v;
        }
        if let Some(v) = self.max_buildings {
            config.max_buildings = v;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let bbox = args.area()?;
    let config = args.scene_config()?;

    if args.print_query {
        println!("{}", build_query(&bbox, &config.highway_filter, config.include_buildings));
        return Ok(());
    }

    let Some(input) = &args.input else {
        bail!("--input is required; use --print-query to get the Overpass query for {}", bbox);
    };

    let start = Instant::now();
    let extract = OverpassExtract::from_file(input)?;
    info!("Loaded {} elements from {}", extract.element_count(), input.display());

    let filter = HighwayFilter::new(&config.highway_filter)
        .with_context(|| format!("Invalid --highway pattern '{}'", config.highway_filter))?;
    let data = extract.into_map_data(&filter, config.include_buildings);

    let (scene, stats) = generate_scene(&data, &bbox, &config)?;
    scene_to_file(&scene, &args.output)?;

    info!(
        "Roads: {} emitted, {} dropped; buildings: {} emitted, {} dropped",
        stats.road_ways_emitted,
        stats.road_ways_dropped,
        stats.building_ways_emitted,
        stats.building_ways_dropped
    );
    info!("Finished in {:.2}s", start.elapsed().as_secs_f64());
    println!("Wrote {}", args.output.display());
    Ok(())
}
