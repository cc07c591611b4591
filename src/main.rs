//! Map Feature Editor (headless).
//!
//! Spielt eine Intent-Sequenz gegen einen Feature-Bestand ab und gibt
//! den Ergebnisbestand sowie alle gemeldeten Ereignisse als JSON aus.

use anyhow::Context;
use map_feature_editor::{AppController, AppIntent, AppState, EditorOptions, FeatureCollection};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Map Feature Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [options_path, features_path, intents_path] = args.as_slice() else {
        anyhow::bail!("Aufruf: map-feature-editor <optionen.toml> <features.json> <intents.json>");
    };

    let options = EditorOptions::load_from_file(Path::new(options_path));
    let collection: FeatureCollection = read_json(features_path)?;
    let intents: Vec<AppIntent> = read_json(intents_path)?;

    let mut state = AppState::with_options(options);
    let mut controller = AppController::new();
    controller.handle_intent(&mut state, AppIntent::FeaturesLoaded { collection })?;

    let mut events = controller.drain_events(&mut state);
    for intent in intents {
        controller.handle_intent(&mut state, intent)?;
        events.extend(controller.drain_events(&mut state));
    }
    log::info!(
        "{} Commands ausgeführt, {} Features im Bestand",
        state.command_log.len(),
        state.feature_count()
    );

    let output = serde_json::json!({
        "features": state.store.to_collection(),
        "events": events,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("{} nicht lesbar", path))?;
    serde_json::from_str(&content).with_context(|| format!("{} ist kein gültiges JSON", path))
}
