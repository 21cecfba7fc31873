use anyhow::{anyhow, Context};
use areo::{
    timed, ArcFormula, CoordinateCodec, Direction, GeodesyConfig, Kilometer,
    MapViewport, Planet, SphericalCoordinate,
};
use config::{Config, File};
use log::{info, LevelFilter};
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::{
    fmt,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for doing geodesy on the surface of a planet. Coordinates are given as
/// text, e.g. "35.6780 S 63.5532 W" or "-35.678 -63.5532". Quote them so
/// they're passed as a single argument.
#[derive(Debug, StructOpt)]
#[structopt(name = "areo")]
struct Opt {
    /// Path to a config file that defines the planet, and how coordinates are
    /// parsed and formatted. Supported formats: JSON, TOML. If not given, the
    /// default config (Mars, English glyphs) is used.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// How results are printed. Supported formats: text, json
    #[structopt(short, long, default_value = "text")]
    output: OutputFormat,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Great circle distance between two coordinates
    Distance {
        #[structopt(allow_hyphen_values = true)]
        from: String,
        #[structopt(allow_hyphen_values = true)]
        to: String,
        /// Formula used to calculate the arc angle. Supported formulas:
        /// haversine, law-of-cosines, vincenty
        #[structopt(long, default_value = "haversine")]
        formula: ArcFormula,
    },
    /// Initial compass bearing from one coordinate towards another
    Bearing {
        #[structopt(allow_hyphen_values = true)]
        from: String,
        #[structopt(allow_hyphen_values = true)]
        to: String,
    },
    /// Travel from a coordinate in a direction, following plumb line steps
    Destination {
        #[structopt(allow_hyphen_values = true)]
        from: String,
        /// Compass direction, in degrees clockwise from north
        #[structopt(short, long, allow_hyphen_values = true)]
        direction: f64,
        /// Distance to travel, in kilometers. Negative distances travel the
        /// opposite way.
        #[structopt(short = "k", long, allow_hyphen_values = true)]
        distance: f64,
    },
    /// Parse a coordinate and print it in every supported form
    Convert {
        #[structopt(allow_hyphen_values = true)]
        coordinate: String,
    },
    /// Find the pixel a coordinate lands on, in a map centered on another
    Project {
        #[structopt(allow_hyphen_values = true)]
        center: String,
        #[structopt(allow_hyphen_values = true)]
        coordinate: String,
        /// Radius of the rendered globe, in pixels
        #[structopt(long, default_value = "300")]
        globe_radius: f64,
        /// Half the width of the map, in pixels
        #[structopt(long, default_value = "150")]
        half_width: i32,
        /// Half the height of the map, in pixels
        #[structopt(long, default_value = "150")]
        half_height: i32,
    },
    /// Print the full config in use, with defaults filled in
    ShowConfig,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    /// One human-readable line per value
    Text,
    /// A single JSON object
    Json,
}

/// The result of a command, printed in the requested output format
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Report {
    Distance {
        kilometers: f64,
        arc_radians: f64,
        formula: String,
    },
    Bearing {
        degrees: f64,
    },
    Destination {
        formatted: String,
        signed_decimal: String,
    },
    Convert {
        formatted: String,
        parenthesized: String,
        signed_decimal: String,
        phi: f64,
        theta: f64,
    },
    Project {
        x: i32,
        y: i32,
        visible: bool,
    },
    Config(GeodesyConfig),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance {
                kilometers,
                arc_radians,
                formula,
            } => write!(
                f,
                "{} ({:.6} rad, {})",
                Kilometer(*kilometers),
                arc_radians,
                formula
            ),
            Self::Bearing { degrees } => write!(f, "{:.2}°", degrees),
            Self::Destination {
                formatted,
                signed_decimal,
            } => write!(f, "{}\n{}", formatted, signed_decimal),
            Self::Convert {
                formatted,
                parenthesized,
                signed_decimal,
                phi,
                theta,
            } => write!(
                f,
                "{}\n{}\n{}\nphi={} theta={}",
                formatted, parenthesized, signed_decimal, phi, theta
            ),
            Self::Project { x, y, visible } => {
                write!(f, "({}, {})", x, y)?;
                if !visible {
                    write!(f, " (hidden, on the far side)")?;
                }
                Ok(())
            }
            Self::Config(config) => {
                // Only fails if the config isn't serializable (a bug)
                let text =
                    toml::to_string_pretty(config).map_err(|_| fmt::Error)?;
                write!(f, "{}", text.trim_end())
            }
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<GeodesyConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

fn parse_coordinate(
    codec: &CoordinateCodec,
    text: &str,
) -> anyhow::Result<SphericalCoordinate> {
    codec
        .parse_str(text)
        .with_context(|| format!("invalid coordinate {:?}", text))
}

/// Execute a single command against a planet
fn execute(planet: &Planet, command: Command) -> anyhow::Result<Report> {
    let codec = planet.codec();
    let report = match command {
        Command::Distance { from, to, formula } => {
            let from = parse_coordinate(&codec, &from)?;
            let to = parse_coordinate(&codec, &to)?;
            let arc_radians = from.angle_with(&to, formula);
            Report::Distance {
                kilometers: Kilometer::from_arc(arc_radians, planet.radius()).0,
                arc_radians,
                formula: formula.to_string(),
            }
        }
        Command::Bearing { from, to } => {
            let from = parse_coordinate(&codec, &from)?;
            let to = parse_coordinate(&codec, &to)?;
            Report::Bearing {
                degrees: planet.bearing(from, to).degrees(),
            }
        }
        Command::Destination {
            from,
            direction,
            distance,
        } => {
            if !distance.is_finite() {
                return Err(anyhow!(
                    "distance must be finite, got {}",
                    distance
                ));
            }
            let from = parse_coordinate(&codec, &from)?;
            let to = planet.destination(
                from,
                Direction::from_degrees(direction),
                Kilometer(distance),
            );
            Report::Destination {
                formatted: codec.format(to),
                signed_decimal: to.to_signed_decimal(),
            }
        }
        Command::Convert { coordinate } => {
            let coord = parse_coordinate(&codec, &coordinate)?;
            Report::Convert {
                formatted: codec.format(coord),
                parenthesized: codec.format_parenthesized(coord),
                signed_decimal: coord.to_signed_decimal(),
                phi: coord.phi(),
                theta: coord.theta(),
            }
        }
        Command::Project {
            center,
            coordinate,
            globe_radius,
            half_width,
            half_height,
        } => {
            let center = parse_coordinate(&codec, &center)?;
            let coord = parse_coordinate(&codec, &coordinate)?;
            let projector = planet.projector(center, globe_radius, MapViewport {
                half_width,
                half_height,
                low_edge_x: 0,
                low_edge_y: 0,
            });
            let pixel = projector.to_pixel(coord);
            Report::Project {
                x: pixel.x,
                y: pixel.y,
                visible: projector.is_visible(coord),
            }
        }
        Command::ShowConfig => Report::Config(planet.config().clone()),
    };
    Ok(report)
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match &opt.config {
        Some(config_path) => {
            let config = load_config(config_path)?;
            info!("Loaded config from {:?}", config_path);
            config
        }
        None => GeodesyConfig::default(),
    };
    let planet = Planet::new(config)?;

    let report = timed!("Command", execute(&planet, opt.command))?;
    match opt.output {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .context("error serializing output")?
        ),
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
