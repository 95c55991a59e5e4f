//! Constellation Geometry CLI
//!
//! Usage:
//!   sat-geometry to-ecef --lat 45 --lon 7.5 --alt-m 1200
//!   sat-geometry link --a 3 --b 13 --planes 6 --per-plane 10
//!   sat-geometry footprint --lat 23 --lon -47 --altitude-km 10500 --format geojson
//!   sat-geometry track --tle iss.tle --minutes 30 --format canvas
//!   sat-geometry track --tle iss.tle --site-lat 51.5 --site-lon -0.1

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use constellation_geometry::propagation::{is_ascending, sub_satellite_point};
use constellation_geometry::visibility::look_angles_at;
use constellation_geometry::{GeometryConfig, OrbitalPlaneInfo, Propagator, Sgp4Propagator};
use geometry_cli::{load_config, render, resolve_shape, resolve_site, OutputFormat};
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "sat-geometry",
    about = "Coordinate transforms, link eligibility and ground footprints for satellite constellations"
)]
struct Args {
    /// Geometry config JSON (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Geodetic to ECEF
    ToEcef {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        alt_m: f64,
    },

    /// ECEF (meters) to geodetic
    ToGeodetic {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, allow_negative_numbers = true)]
        z: f64,
    },

    /// Whether two satellites may form an inter-satellite link
    Link {
        #[arg(long)]
        a: usize,
        #[arg(long)]
        b: usize,
        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Every satellite one satellite may link with
    Partners {
        #[arg(long)]
        index: usize,
        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Footprint polygon for a sub-satellite point
    Footprint {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        altitude_km: f64,
        #[command(flatten)]
        output: FootprintArgs,
    },

    /// Propagate a TLE and build the footprint under it
    Track {
        /// File holding two TLE lines, optionally preceded by a name line
        #[arg(long)]
        tle: PathBuf,
        /// Minutes after the TLE epoch
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        minutes: f64,
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        output: FootprintArgs,
    },
}

#[derive(clap::Args, Debug)]
struct ShapeArgs {
    /// Number of orbital planes (overrides config)
    #[arg(long)]
    planes: Option<usize>,
    /// Satellites per plane (overrides config)
    #[arg(long)]
    per_plane: Option<usize>,
}

/// Ground site for look angles; both coordinates or neither
#[derive(clap::Args, Debug)]
struct SiteArgs {
    #[arg(long, requires = "site_lon", allow_negative_numbers = true)]
    site_lat: Option<f64>,
    #[arg(long, requires = "site_lat", allow_negative_numbers = true)]
    site_lon: Option<f64>,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    site_alt_m: f64,
}

#[derive(clap::Args, Debug)]
struct FootprintArgs {
    /// Polygon point count including the closing point (overrides config)
    #[arg(long)]
    points: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(args.config.as_deref())
        .with_context(|| format!("loading config {:?}", args.config))?;
    let transform = config.transform();

    let output = match args.command {
        Command::ToEcef { lat, lon, alt_m } => {
            let ecef = transform.to_ecef(lat, lon, alt_m)?;
            render::position(&ecef)
        }
        Command::ToGeodetic { x, y, z } => {
            let ecef = transform.to_geodetic(x, y, z)?;
            render::position(&ecef)
        }
        Command::Link { a, b, shape } => {
            let shape = resolve_shape(&config, shape.planes, shape.per_plane)?;
            let report = render::link(&shape, a, b)?;
            info!(
                "{} <-> {}: {} ({} planes x {})",
                a,
                b,
                if report.eligible { "eligible" } else { "not eligible" },
                shape.plane_count(),
                shape.satellites_per_plane()
            );
            serde_json::to_value(report)?
        }
        Command::Partners { index, shape } => {
            let shape = resolve_shape(&config, shape.planes, shape.per_plane)?;
            render::partners(&shape, index)?
        }
        Command::Footprint {
            lat,
            lon,
            altitude_km,
            output,
        } => footprint(&config, lat, lon, altitude_km, &output)?,
        Command::Track {
            tle,
            minutes,
            site,
            output,
        } => {
            let text = std::fs::read_to_string(&tle)
                .with_context(|| format!("reading TLE file {:?}", tle))?;
            let propagator = Sgp4Propagator::from_tle_text(&text)?;
            info!(
                "Tracking {} (NORAD {}) from epoch {}",
                propagator.name().unwrap_or("<unnamed>"),
                propagator.norad_id(),
                propagator.epoch()
            );

            let sub_point = sub_satellite_point(&propagator, &transform, minutes)?;
            let ascending = is_ascending(&propagator, &transform, minutes)?;
            let look = match resolve_site(site.site_lat, site.site_lon, site.site_alt_m) {
                Some(site) => {
                    let look = look_angles_at(&propagator, &transform, minutes, &site)?;
                    info!(
                        "From ({:.4}, {:.4}): elevation {:.2} deg, azimuth {:.2} deg, range {:.1} km",
                        site.latitude_deg,
                        site.longitude_deg,
                        look.elevation_deg,
                        look.azimuth_deg,
                        look.range_m / 1000.0
                    );
                    Some(look)
                }
                None => None,
            };
            let footprint = footprint(
                &config,
                sub_point.latitude_deg,
                sub_point.longitude_deg,
                sub_point.altitude_km(),
                &output,
            )?;

            json!({
                "name": propagator.name(),
                "norad_id": propagator.norad_id(),
                "minutes_since_epoch": minutes,
                "raan_deg": propagator.raan_deg(),
                "inclination_deg": propagator.inclination_deg(),
                "sub_satellite": sub_point,
                "ascending": ascending,
                "look_angles": look,
                "footprint": footprint
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn footprint(
    config: &GeometryConfig,
    lat: f64,
    lon: f64,
    altitude_km: f64,
    output: &FootprintArgs,
) -> Result<serde_json::Value> {
    let point_count = output.points.unwrap_or(config.footprint_points);
    let polygon = config.footprint_generator().generate(
        lat,
        lon,
        altitude_km,
        config.earth_radius_km,
        point_count,
    )?;
    info!(
        "Footprint at ({:.4}, {:.4}): {} points, half-angle {:.3} deg",
        lat,
        lon,
        polygon.len(),
        polygon.half_angle_rad().to_degrees()
    );
    Ok(render::footprint(&polygon, output.format, &config.canvas))
}
