//! `forma` command-line driver: loads a scene, replays a command script
//! against the headless editor and writes the resulting document.

use std::path::PathBuf;
use std::process::ExitCode;

use forma_editor::command::execute_json_batch;
use forma_editor::state::EditorSettings;
use forma_editor::Editor;
use tracing::{error, info, warn};

#[derive(Debug, Default)]
struct Args {
    scene: Option<PathBuf>,
    commands: Option<PathBuf>,
    out: Option<PathBuf>,
    autosave: bool,
    resume: bool,
}

const USAGE: &str = "usage: forma [--scene <file>] [--resume] [--commands <file>] [--out <file>] [--autosave]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forma=info,forma_editor=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let mut editor = Editor::new(EditorSettings::load());

    if args.resume && !editor.resume_autosave() {
        warn!("No autosave to resume from");
    }

    if let Some(path) = &args.scene {
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| editor.import_scene(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(()) => info!(
                path = %path.display(),
                shapes = editor.scene().shapes().len(),
                "Loaded scene"
            ),
            Err(e) => {
                error!(path = %path.display(), "Failed to load scene: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(path) = &args.commands {
        let script = match std::fs::read_to_string(path) {
            Ok(script) => script,
            Err(e) => {
                error!(path = %path.display(), "Failed to read command script: {e}");
                return ExitCode::FAILURE;
            }
        };
        match execute_json_batch(&mut editor, &script) {
            Ok(responses) => {
                for (i, response) in responses.iter().enumerate() {
                    match &response.error {
                        Some(e) => warn!(command = i, "Command failed: {e}"),
                        None => info!(command = i, data = ?response.data, "Command ok"),
                    }
                }
            }
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        }
        for event in editor.drain_notifications() {
            if let Ok(json) = serde_json::to_string(&event) {
                info!(target: "forma::events", "{json}");
            }
        }
    }

    let json = match editor.export_scene() {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to export scene: {e}");
            return ExitCode::FAILURE;
        }
    };

    match &args.out {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &json) {
                error!(path = %path.display(), "Failed to write scene: {e}");
                return ExitCode::FAILURE;
            }
            info!(path = %path.display(), "Wrote scene");
        }
        None => println!("{json}"),
    }

    if args.autosave {
        match editor.scene().autosave() {
            Ok(Some(path)) => info!(path = %path.display(), "Autosaved"),
            Ok(None) => warn!("No data directory for autosave"),
            Err(e) => error!("Autosave failed: {e}"),
        }
    }

    ExitCode::SUCCESS
}

fn parse_args(mut iter: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scene" => args.scene = Some(value(&mut iter, &arg)?),
            "--commands" => args.commands = Some(value(&mut iter, &arg)?),
            "--out" => args.out = Some(value(&mut iter, &arg)?),
            "--autosave" => args.autosave = true,
            "--resume" => args.resume = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf, String> {
    iter.next()
        .map(PathBuf::from)
        .ok_or_else(|| format!("{flag} needs a value"))
}
