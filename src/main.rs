use env_logger::Env;
use geofeature_editor::coordinate::{format_multiline, parse_multiline};
use geofeature_editor::{codec, import, viewport, FitOptions, GeometryKind};
use serde_json::to_string;
use std::error::Error;
use std::io::{self, Read};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "geofeature_editor",
    about = "Convert, validate and frame single-feature GeoJSON locations"
)]
struct Opt {
    /// Print debug logs (RUST_LOG takes precedence)
    #[structopt(short, long)]
    verbose: bool,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Read "lng, lat" lines from stdin and print a GeoJSON FeatureCollection
    Parse {
        /// Point, MultiPoint, LineString or Polygon
        #[structopt(short, long, default_value = "LineString")]
        kind: GeometryKind,

        /// Feature name, defaults to a label for the kind
        #[structopt(short, long, default_value = "")]
        name: String,
    },
    /// Read GeoJSON from stdin and print its vertices as "lng, lat" lines
    Decode,
    /// Read "lng, lat" lines from stdin and print the viewport framing them
    Fit {
        /// Never zoom in further than this level
        #[structopt(long)]
        cap: Option<u8>,

        /// Frame all points, capping the zoom at 16
        #[structopt(long)]
        all: bool,
    },
    /// Read GeoJSON from stdin and check that it decodes
    Validate,
}

fn read_stdin() -> Result<String, Box<dyn Error>> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    let default_level = if opt.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let input = read_stdin()?;
    match opt.cmd {
        Command::Parse { kind, name } => {
            let feature = import::from_multiline(&name, kind, &input)?;
            println!("{}", codec::to_geojson_string(&feature)?);
        }
        Command::Decode => {
            let feature = codec::from_geojson_string(&input)?;
            println!("{}", format_multiline(feature.geometry.vertices()));
        }
        Command::Fit { cap, all } => {
            let options = match (cap, all) {
                (Some(cap), _) => FitOptions {
                    cap_zoom: Some(cap),
                },
                (None, true) => FitOptions::fit_all(),
                (None, false) => FitOptions::default(),
            };
            let points = parse_multiline(&input)?;
            let viewport =
                viewport::fit_with(&points, &options).ok_or("no coordinates given")?;
            println!("{}", to_string(&viewport)?);
        }
        Command::Validate => {
            let feature = codec::from_geojson_string(&input)?;
            let kind: GeometryKind = feature.geometry.kind();
            println!(
                "valid {} \"{}\" with {} vertices",
                kind,
                feature.display_name(),
                feature.geometry.vertices().len()
            );
        }
    }
    Ok(())
}
