//! Headless inspection run: load the twin, click a screen point, print the panel.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use turbine_twin::options::Options;
use turbine_twin::scene::SceneStatus;
use turbine_twin::viewer::{TwinViewer, ViewerCommand};

const MESH_WAIT: Duration = Duration::from_secs(30);

struct Args {
    options: Option<String>,
    point: Option<(f32, f32)>,
}

fn parse_args(mut args: Vec<String>) -> Result<Args, String> {
    let options = if args.first().is_some_and(|a| a.ends_with(".toml")) {
        Some(args.remove(0))
    } else {
        None
    };

    let point = match args.as_slice() {
        [] => None,
        [x, y] => {
            let x = x.parse().map_err(|_| format!("bad x coordinate: {x}"))?;
            let y = y.parse().map_err(|_| format!("bad y coordinate: {y}"))?;
            Some((x, y))
        }
        _ => {
            return Err(
                "usage: turbine-twin [options.toml] [x y]".to_owned(),
            )
        }
    };

    Ok(Args { options, point })
}

fn run(args: &Args) -> Result<(), String> {
    let options = match &args.options {
        Some(path) => Options::load(Path::new(path)).map_err(|e| e.to_string())?,
        None => Options::default(),
    };

    let mut viewer =
        TwinViewer::from_options(&options).map_err(|e| e.to_string())?;

    match viewer.wait_for_mesh(MESH_WAIT) {
        SceneStatus::Ready => {}
        SceneStatus::Failed => {
            return Err(viewer.failure().unwrap_or("mesh load failed").to_owned())
        }
        SceneStatus::Loading => {
            return Err(format!(
                "mesh still loading after {}s",
                MESH_WAIT.as_secs()
            ))
        }
    }

    let (width, height) = viewer.viewport();
    let (x, y) = args
        .point
        .unwrap_or((width as f32 / 2.0, height as f32 / 2.0));

    if !viewer.execute(ViewerCommand::Select { x, y }) {
        log::info!("no part under ({x}, {y})");
    }

    let mut out = io::stdout().lock();
    writeln!(out, "{}", viewer.panel_view()).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1).collect()) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
