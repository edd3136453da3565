use air_canvas::replay::{self, LogSink, ScriptedInput};
use air_canvas::session::SessionController;
use air_canvas::settings::{AppSettings, SETTINGS_FILE_NAME};
use anyhow::{bail, Context};
use std::path::PathBuf;

const USAGE: &str = "usage: air_canvas [settings.json] <frames.jsonl>";

fn main() -> anyhow::Result<()> {
    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let (settings_path, frames_path) = match args.as_slice() {
        [frames] => (PathBuf::from(SETTINGS_FILE_NAME), frames.clone()),
        [settings, frames] => (settings.clone(), frames.clone()),
        _ => bail!(USAGE),
    };

    let settings = AppSettings::load(&settings_path)
        .with_context(|| format!("load settings from {}", settings_path.display()))?;
    air_canvas::logging::init(settings.debug_logging, settings.log_file.as_deref())?;
    tracing::info!(
        settings = %settings_path.display(),
        frames = %frames_path.display(),
        "starting headless session"
    );

    let mut input = ScriptedInput::open(&frames_path)?;
    let mut sink = LogSink::default();
    let mut session = SessionController::new(settings);
    let frames = replay::run(&mut session, &mut input, &mut sink)?;

    tracing::info!(
        frames,
        entries = session.buffer().len(),
        game_active = session.game().is_active(),
        "session finished"
    );
    Ok(())
}
