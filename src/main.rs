use bevy::prelude::*;
use bevy_hanabi::HanabiPlugin;
use bevy_kira_audio::AudioPlugin;
use bonus_unlocks::level::{CurrentLevel, LevelCatalog};
use bonus_unlocks::scene::audio::plugin as audio_plugin;
use bonus_unlocks::states::GameState;
use bonus_unlocks::store::{MemoryStore, RonFileStore, SaveData};
use bonus_unlocks::game_plugin;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Bonus collectibles unlocked by items gathered across levels")]
struct Args {
    /// Level catalog in RON; the built-in demo catalog is used otherwise
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Save file in RON; progress is kept in memory otherwise
    #[arg(long)]
    save: Option<PathBuf>,

    /// Map to start on
    #[arg(long)]
    map: Option<String>,
}

fn load_catalog(path: Option<&PathBuf>) -> LevelCatalog {
    let Some(path) = path else {
        return LevelCatalog::demo();
    };
    match LevelCatalog::load(path) {
        Ok(catalog) => {
            info!("Loaded {} levels from {}", catalog.levels.len(), path.display());
            catalog
        }
        Err(err) => {
            error!("Could not load level catalog {}: {err}; using the demo catalog", path.display());
            LevelCatalog::demo()
        }
    }
}

fn open_save(path: Option<PathBuf>) -> SaveData {
    let Some(path) = path else {
        return SaveData::new(MemoryStore::new());
    };
    match RonFileStore::open(&path) {
        Ok(store) => {
            info!("Using save file {}", store.path().display());
            SaveData::new(store)
        }
        Err(err) => {
            // Nothing is revealed or written back while the save is unreadable
            error!("Could not open save file {}: {err}; progress will not be kept", path.display());
            SaveData::new(MemoryStore::unavailable())
        }
    }
}

fn start_map(catalog: &LevelCatalog, requested: Option<String>) -> String {
    if let Some(map_id) = requested {
        if catalog.level(&map_id).is_some() {
            return map_id;
        }
        warn!("Map {map_id:?} is not in the level catalog; starting on the first map");
    }
    catalog.first_map().unwrap_or_default().to_string()
}

fn main() {
    let args = Args::parse();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins)
        .add_plugins((AudioPlugin, HanabiPlugin))
        .add_plugins(audio_plugin)
        .init_state::<GameState>();

    let catalog = load_catalog(args.catalog.as_ref());
    if let Some(tuning) = catalog.tuning.clone() {
        app.insert_resource(tuning);
    }
    let map_id = start_map(&catalog, args.map);
    info!("Starting on map {map_id:?}");

    app.insert_resource(open_save(args.save))
        .insert_resource(CurrentLevel::new(map_id))
        .insert_resource(catalog)
        .add_plugins(game_plugin)
        .run();
}
