use anyhow::Context;
use clap::{Parser, ValueEnum};
use quakemap::{load_earthquake_map, MapBuilder, MapProfile, UsgsFeed};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// Street tiles and the depth legend
    Basic,
    /// Street, satellite and grayscale tiles with a layer switcher
    Layered,
}

impl From<Profile> for MapProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Basic => MapProfile::Basic,
            Profile::Layered => MapProfile::Layered,
        }
    }
}

/// Fetch the USGS earthquake feed and render it as a map scene
#[derive(Debug, Parser)]
#[command(name = "quakemap-app", version, about)]
struct Args {
    /// Map layout
    #[arg(long, value_enum, default_value_t = Profile::Basic)]
    profile: Profile,

    /// Feed URL returning a GeoJSON FeatureCollection
    #[arg(long, conflicts_with = "feed")]
    feed_url: Option<String>,

    /// USGS summary feed name, e.g. all_week or 2.5_day
    #[arg(long)]
    feed: Option<String>,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the styled GeoJSON FeatureCollection instead of the scene
    #[arg(long)]
    styled_geojson: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut builder = MapBuilder::from_profile(args.profile.into());
    if let Some(url) = args.feed_url {
        builder = builder.with_feed_url(url);
    }
    if let Some(name) = args.feed {
        let feed: UsgsFeed = name.parse()?;
        builder = builder.with_usgs_feed(feed);
    }
    let config = builder.into_config();
    let feed_url = config.feed_url.clone();

    let (map, scene) = load_earthquake_map(config)
        .await
        .with_context(|| format!("could not build the earthquake map from {}", feed_url))?;

    let json = if args.styled_geojson {
        let geojson = map
            .earthquake_layer()
            .map(|layer| layer.to_styled_geojson())
            .context("map has no earthquake layer")?;
        serde_json::to_string_pretty(&geojson)?
    } else {
        scene.to_json()?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("could not write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
