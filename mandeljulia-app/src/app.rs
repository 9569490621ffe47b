use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use mandeljulia_render::{export_png, ExportMetadata, PixelSink, RenderBuffer};

use crate::config::{Args, LaunchConfig};
use crate::controller::{AppState, InteractionController};
use crate::error::AppError;
use crate::events::{Event, EventSource};
use crate::params::RenderParams;
use crate::script::ScriptEventSource;

/// Initial render, then the scripted events, then the PNG export.
pub fn run(args: Args) -> Result<(), AppError> {
    let config = LaunchConfig::resolve(&args)?;
    let params = RenderParams::from_config(&config);
    let sink = RenderBuffer::for_panels(config.width, config.height);
    let mut controller =
        InteractionController::new(AppState::new(params), sink, config.width, config.height);

    controller.start();

    if let Some(path) = &args.script {
        let mut source = open_script(path)?;
        let handled = drain_events(&mut controller, &mut source);
        info!(
            "Handled {handled} scripted events, {} commands in history",
            controller.state().history.len()
        );
    }

    export(&controller, &args.output)?;
    Ok(())
}

/// Feed events to the controller until the source runs dry or asks to quit.
///
/// Returns the number of events handled, `Quit` excluded.
pub fn drain_events<S, E>(controller: &mut InteractionController<S>, source: &mut E) -> usize
where
    S: PixelSink,
    E: EventSource + ?Sized,
{
    let mut handled = 0;
    while let Some(event) = source.next_event() {
        if event == Event::Quit {
            info!("Quit requested");
            break;
        }
        if let Err(e) = controller.handle(event) {
            warn!("{e}");
        }
        handled += 1;
    }
    handled
}

fn open_script(path: &Path) -> Result<ScriptEventSource<Box<dyn BufRead>>, AppError> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(path).map_err(|source| AppError::Script {
            path: path.to_path_buf(),
            source,
        })?;
        Box::new(BufReader::new(file))
    };
    Ok(ScriptEventSource::new(reader))
}

fn export(controller: &InteractionController<RenderBuffer>, path: &Path) -> Result<(), AppError> {
    let buffer = controller.sink();
    let state = controller.state();
    let metadata = ExportMetadata {
        caption: buffer.caption().to_string(),
        power: state.params.fractal.power,
        max_iterations: state.params.fractal.max_iterations,
        escape_radius: state.params.fractal.escape_radius,
        palette_name: state.params.palette_name().map(str::to_string),
        mandelbrot: state.viewports.mandelbrot,
        julia: state.viewports.julia,
        seed: state.viewports.seed,
    };
    export_png(&buffer.pixels, buffer.width, buffer.height, path, &metadata)?;
    info!(
        "Wrote {}x{} image to {} after {} renders",
        buffer.width,
        buffer.height,
        path.display(),
        buffer.frames_presented()
    );
    Ok(())
}
