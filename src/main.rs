extern crate log;
pub mod dataset;
pub mod geofile;
pub mod interaction;
pub mod loader;
pub mod map_view;
pub mod overlay;
pub mod style;
use crate::dataset::DatasetPreset;
use crate::geofile::geojson::write_styled_geojson;
use crate::interaction::controller::PointerEvent;
use crate::interaction::viewport::MapViewport;
use crate::loader::{DataLoader, DataSource};
use crate::map_view::{LoadState, MapView, TileLayer, ViewConfig};
use crate::style::color_scale::{Bucket, ColorScale};
use crate::style::StyleEngine;
use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs, fs::read_to_string, path::Path};

/// Style a region dataset as a choropleth and replay pointer interactions against it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
struct Config {
    dataset: DatasetPreset,
    source: DataSource,
    #[serde(default)]
    view: ViewConfig,
    #[serde(default)]
    tile_layer: TileLayer,
    /// Color buckets in ascending order. The density scale is used when absent.
    #[serde(default)]
    scale: Option<Vec<Bucket>>,
    /// Width and height of the map surface in pixels.
    #[serde(default = "default_viewport_size")]
    viewport_size: (f64, f64),
    output_dir: PathBuf,
    /// YAML list of pointer events to replay once the regions are loaded.
    #[serde(default)]
    events_filepath: Option<PathBuf>,
}

fn default_viewport_size() -> (f64, f64) {
    (1024.0, 768.0)
}

fn read_events(filepath: &Path) -> anyhow::Result<Vec<PointerEvent>> {
    let contents = read_to_string(filepath)
        .with_context(|| format!("Reading events file {:?}", filepath))?;
    Ok(serde_yaml::from_str(&contents)?)
}

fn build_style_engine(scale: Option<Vec<Bucket>>) -> anyhow::Result<StyleEngine> {
    let scale = match scale {
        Some(buckets) => ColorScale::new(buckets).context("Invalid color scale in config")?,
        None => ColorScale::default(),
    };
    Ok(StyleEngine::new(scale))
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    if !Path::new(&args.config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", &args.config_filepath));
    }
    let config_contents = read_to_string(args.config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;
    let dataset = config.dataset.resolve();

    let viewport = MapViewport::new(
        config.view.center,
        config.view.zoom,
        config.viewport_size,
        config.tile_layer.max_zoom,
    );
    let engine = build_style_engine(config.scale)?;
    let mut map_view = MapView::new(
        config.view,
        config.tile_layer,
        &dataset,
        engine.clone(),
        viewport,
    );
    log::info!(
        "Base layer {} at ({}, {}) zoom {}",
        map_view.tile_layer.url_template,
        map_view.view.center.lat,
        map_view.view.center.lng,
        map_view.view.zoom
    );
    log::info!("Tiles {}", map_view.attribution_markup());

    let loader = DataLoader {
        source: config.source,
        keys: dataset.keys.clone(),
        synthesize: dataset.synthesize.clone(),
    };
    map_view.resolve(loader.load());
    if map_view.load_state() != LoadState::Loaded {
        return Err(anyhow!("No regions loaded, nothing to write"));
    }

    fs::create_dir_all(&config.output_dir)?;
    fs::write(
        config.output_dir.join("attribution.html"),
        map_view.attribution_markup(),
    )?;
    if let Some(features) = map_view.features() {
        let styled_filepath = config.output_dir.join("styled.geojson");
        log::info!("Writing styled regions to {:?}", &styled_filepath);
        write_styled_geojson(features, &engine, &dataset.keys, &styled_filepath)?;
    }
    if let Some(legend_markup) = map_view.legend_markup() {
        fs::write(config.output_dir.join("legend.html"), legend_markup)?;
    }

    if let Some(events_filepath) = &config.events_filepath {
        let events = read_events(events_filepath)?;
        log::info!("Replaying {} pointer events", events.len());
        for event in events {
            map_view.handle(event);
            log::info!("{:?} -> {}", event, map_view.info_markup());
        }
        let viewport = map_view.controller().viewport();
        log::info!(
            "Final view ({:.4}, {:.4}) zoom {} after {} fit requests",
            viewport.center.lat,
            viewport.center.lng,
            viewport.zoom,
            viewport.fit_requests()
        );
    }
    fs::write(config.output_dir.join("info.html"), map_view.info_markup())?;
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use testdir::testdir;

    use super::{build_style_engine, read_events, Config};
    use crate::dataset::DatasetConfig;
    use crate::interaction::controller::PointerEvent;

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_yaml::from_str(
            r#"
dataset: UsStates
source: !File
  path: assets/us-states.json
output_dir: out
"#,
        )
        .unwrap();
        assert_eq!(DatasetConfig::us_states(), config.dataset.resolve());
        assert_eq!(37.8, config.view.center.lat);
        assert_eq!(19.0, config.tile_layer.max_zoom);
        assert_eq!((1024.0, 768.0), config.viewport_size);
        assert!(config.events_filepath.is_none());
        assert!(config.scale.is_none());
        let engine = build_style_engine(config.scale).unwrap();
        assert_eq!("#800026", engine.color_for(1001.0).as_str());
    }

    #[test]
    fn test_config_custom_scale() {
        let config: Config = serde_yaml::from_str(
            r##"
dataset: WorldCountries
source: !Url
  url: http://localhost/countries.geojson
output_dir: out
scale:
  - lower_bound: 0
    color: "#EFF3FF"
  - lower_bound: 500
    color: "#6BAED6"
  - lower_bound: 1000
    color: "#08519C"
"##,
        )
        .unwrap();
        let engine = build_style_engine(config.scale).unwrap();
        let breakpoints: Vec<f64> = engine.scale().breakpoints().collect();
        assert_eq!(vec![0.0, 500.0, 1000.0], breakpoints);
        assert_eq!("#EFF3FF", engine.color_for(500.0).as_str());
        assert_eq!("#6BAED6", engine.color_for(501.0).as_str());
        assert_eq!("#08519C", engine.color_for(1400.0).as_str());
    }

    #[test]
    fn test_config_rejects_descending_scale() {
        let config: Config = serde_yaml::from_str(
            r##"
dataset: UsStates
source: !File
  path: assets/us-states.json
output_dir: out
scale:
  - lower_bound: 100
    color: "#000000"
  - lower_bound: 10
    color: "#FFFFFF"
"##,
        )
        .unwrap();
        assert!(build_style_engine(config.scale).is_err());
    }

    #[test]
    fn test_read_events() {
        let events_filepath = testdir!().join("events.yaml");
        std::fs::write(
            &events_filepath,
            "- event: enter\n  feature: 1\n- event: click\n  feature: 1\n",
        )
        .unwrap();
        assert_eq!(
            vec![
                PointerEvent::Enter { feature: 1 },
                PointerEvent::Click { feature: 1 }
            ],
            read_events(&events_filepath).unwrap()
        );
    }
}
