use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use blockfall::game_loop::{GameLoop, LoopConfig};
use blockfall::images::ImageRegistry;
use blockfall::random::SeededRandom;
use blockfall::render::window_size;
use blockfall::settings::{GameSettings, SettingsStore};
use clap::Parser;
use engine::app::{AppConfig, run_game};
use engine::surface::SurfaceSize;
use log::info;

#[derive(Debug, Parser)]
#[command(name = "blockfall")]
#[command(about = "Falling-block puzzle in a window")]
struct Cli {
    /// Settings file; defaults to $BLOCKFALL_SETTINGS_PATH or the XDG config dir.
    #[arg(long)]
    settings: Option<PathBuf>,
    #[arg(long)]
    drop_interval_ms: Option<u64>,
    #[arg(long)]
    cell_size: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    /// PNG used for piece blocks; repeat to register several.
    #[arg(long = "image", value_name = "PATH")]
    images: Vec<PathBuf>,
    /// Write the merged settings back to the settings file and exit.
    #[arg(long, default_value_t = false)]
    save_settings: bool,
}

impl Cli {
    fn apply(&self, mut settings: GameSettings) -> GameSettings {
        if let Some(ms) = self.drop_interval_ms {
            settings.drop_interval = Duration::from_millis(ms);
        }
        if let Some(cell_size) = self.cell_size {
            settings.cell_size = cell_size;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        for path in &self.images {
            if !settings.images.contains(path) {
                settings.images.push(path.clone());
            }
        }
        settings.sanitized()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let store = match &cli.settings {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::from_env(),
    };
    let settings = cli.apply(store.load());

    if cli.save_settings {
        store
            .save(&settings)
            .with_context(|| format!("failed to write {}", store.path().display()))?;
        info!("settings written to {}", store.path().display());
        return Ok(());
    }

    let rng = match settings.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };

    let mut images = ImageRegistry::new();
    for path in &settings.images {
        images.add_path(path);
    }

    let (width, height) = window_size(settings.cell_size);
    let game = GameLoop::new(rng, LoopConfig::from(&settings)).with_images(images);

    info!("opening {width}x{height} window");
    run_game(
        AppConfig {
            title: "Blockfall".to_string(),
            size: SurfaceSize::new(width, height),
            resizable: true,
        },
        game,
    )
    .map_err(|err| anyhow!("game window failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_file_values() {
        let cli = Cli::parse_from([
            "blockfall",
            "--drop-interval-ms",
            "250",
            "--seed",
            "9",
            "--image",
            "a.png",
            "--image",
            "b.png",
        ]);
        let file = GameSettings {
            seed: Some(1),
            images: vec![PathBuf::from("base.png")],
            ..GameSettings::default()
        };

        let merged = cli.apply(file);
        assert_eq!(merged.drop_interval, Duration::from_millis(250));
        assert_eq!(merged.seed, Some(9));
        assert_eq!(
            merged.images,
            vec![
                PathBuf::from("base.png"),
                PathBuf::from("a.png"),
                PathBuf::from("b.png")
            ]
        );
    }

    #[test]
    fn repeated_image_flags_are_stored_once() {
        let cli = Cli::parse_from([
            "blockfall",
            "--save-settings",
            "--image",
            "x.png",
            "--image",
            "x.png",
        ]);
        let once = cli.apply(GameSettings::default());
        assert_eq!(once.images, vec![PathBuf::from("x.png")]);

        let twice = cli.apply(once.clone());
        assert_eq!(twice.images, once.images);
    }

    #[test]
    fn cli_values_are_sanitized() {
        let cli = Cli::parse_from(["blockfall", "--drop-interval-ms", "0", "--cell-size", "2"]);
        let merged = cli.apply(GameSettings::default());
        assert_eq!(merged.drop_interval, Duration::from_millis(1));
        assert_eq!(merged.cell_size, 8);
    }
}
