//! Event-driven state machine tying input to renders and the command stack.

use thiserror::Error;
use tracing::{debug, info};

use mandeljulia_core::{Complex, CoreError, Julia, Mandelbrot, Panel, ViewportState};
use mandeljulia_render::{render_into, ColorMapper, PixelSink};

use crate::command::{Command, ParseError};
use crate::events::{Event, Key, MouseButton};
use crate::history::CommandHistory;
use crate::params::{Adjustable, RenderParams, MIN_MAX_ITERATIONS};

/// Non-fatal outcomes reported back to the event loop.
#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
    #[error("command rejected: {0}")]
    Parse(#[from] ParseError),

    #[error("unknown palette {0:?}, using procedural coloring")]
    UnresolvedPalette(String),

    #[error("no earlier command to step back to")]
    EmptyHistory,

    #[error("zoom ignored: {0}")]
    InvalidZoom(CoreError),
}

/// Everything the controller mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub viewports: ViewportState,
    pub params: RenderParams,
    pub history: CommandHistory,
}

impl AppState {
    pub fn new(params: RenderParams) -> Self {
        Self {
            viewports: ViewportState::new(params.fractal.power),
            params,
            history: CommandHistory::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Left button held; `anchor` is the press point in plane coordinates.
    DraggingZoom { panel: Panel, anchor: Complex },
}

pub struct InteractionController<S: PixelSink> {
    state: AppState,
    sink: S,
    drag: DragState,
    panel_width: u32,
    panel_height: u32,
}

impl<S: PixelSink> InteractionController<S> {
    /// `sink` must span `2 * panel_width` by `panel_height` pixels.
    pub fn new(state: AppState, sink: S, panel_width: u32, panel_height: u32) -> Self {
        Self {
            state,
            sink,
            drag: DragState::Idle,
            panel_width,
            panel_height,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Render both panels once, Mandelbrot first, pushing both commands.
    pub fn start(&mut self) {
        self.redraw(Panel::Mandelbrot);
        self.redraw(Panel::Julia);
    }

    pub fn handle(&mut self, event: Event) -> Result<(), ControlError> {
        match event {
            Event::MouseDown { button, x, y } => self.mouse_down(button, x, y),
            Event::MouseUp { button, x, y } => self.mouse_up(button, x, y),
            Event::KeyPress { key, shift } => self.key(key, shift),
            Event::SubmitCommand(text) => self.submit_command(&text),
            Event::SubmitPalette(name) => self
                .state
                .params
                .set_palette(&name)
                .map_err(ControlError::UnresolvedPalette),
            Event::StepBack => self.step_back(),
            Event::Quit => Ok(()),
        }
    }

    fn mouse_down(&mut self, button: MouseButton, x: f64, y: f64) -> Result<(), ControlError> {
        let (panel, px) = Panel::at(x, self.panel_width);
        let point = self.to_plane(panel, px, y);
        match button {
            MouseButton::Left => {
                debug!("Zoom anchor on {} at {point}", panel.label());
                self.drag = DragState::DraggingZoom {
                    panel,
                    anchor: point,
                };
            }
            MouseButton::Middle => {
                self.state
                    .viewports
                    .reset(panel, self.state.params.fractal.power);
                self.redraw(panel);
            }
            MouseButton::Right => {
                if panel == Panel::Mandelbrot {
                    self.state.viewports.seed = point;
                    self.redraw(Panel::Julia);
                }
            }
        }
        Ok(())
    }

    fn mouse_up(&mut self, button: MouseButton, x: f64, y: f64) -> Result<(), ControlError> {
        if button != MouseButton::Left {
            return Ok(());
        }
        let DragState::DraggingZoom { panel, anchor } = self.drag else {
            return Ok(());
        };
        self.drag = DragState::Idle;

        let px = x - panel.x_offset(self.panel_width) as f64;
        let release = self.to_plane(panel, px, y);
        self.state
            .viewports
            .apply_zoom(panel, anchor, release, self.state.params.square_zoom)
            .map_err(ControlError::InvalidZoom)?;
        self.redraw(panel);
        Ok(())
    }

    fn key(&mut self, key: Key, shift: bool) -> Result<(), ControlError> {
        let (adjustable, decrease) = match key {
            Key::Backspace => return self.step_back(),
            Key::Down => (Adjustable::Depth, false),
            Key::Up => (Adjustable::Depth, true),
            Key::Right => (Adjustable::Power, false),
            Key::Left => (Adjustable::Power, true),
            Key::Char(c) => {
                let shift = shift || c.is_ascii_uppercase();
                let adjustable = match c.to_ascii_lowercase() {
                    'm' => {
                        self.redraw(Panel::Mandelbrot);
                        return Ok(());
                    }
                    'j' => {
                        self.redraw(Panel::Julia);
                        return Ok(());
                    }
                    'c' => {
                        let color = &mut self.state.params.color;
                        color.invert_convergence();
                        info!("Convergence color {:?}", color.convergence);
                        return Ok(());
                    }
                    's' => {
                        self.state.params.toggle_square_zoom();
                        return Ok(());
                    }
                    // Text prompts arrive as SubmitCommand / SubmitPalette.
                    'i' | 'n' => return Ok(()),
                    'd' => Adjustable::Depth,
                    'p' => Adjustable::Power,
                    'a' => Adjustable::EscapeRadius,
                    'e' => Adjustable::ColorExponent,
                    'f' => Adjustable::ColorFactor,
                    'r' => Adjustable::Red,
                    'g' => Adjustable::Green,
                    'b' => Adjustable::Blue,
                    other => {
                        debug!("Key {other:?} is not bound");
                        return Ok(());
                    }
                };
                (adjustable, shift)
            }
        };
        self.state.params.adjust(adjustable, decrease);
        Ok(())
    }

    fn submit_command(&mut self, text: &str) -> Result<(), ControlError> {
        match Command::parse(text) {
            Ok(command) => {
                self.dispatch(command, true);
                Ok(())
            }
            Err(e) if e.is_ignorable() => {
                debug!("Ignoring command record: {e}");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn step_back(&mut self) -> Result<(), ControlError> {
        let command = self
            .state
            .history
            .step_back()
            .ok_or(ControlError::EmptyHistory)?;
        self.dispatch(command, false);
        Ok(())
    }

    /// Load a command's parameters into the state and render it.
    ///
    /// The shared depth never drops below its floor; the render itself
    /// still uses the command's own `nmax`.
    fn dispatch(&mut self, command: Command, push: bool) {
        self.state.params.fractal.max_iterations = command.nmax().max(MIN_MAX_ITERATIONS);
        self.state
            .viewports
            .set_viewport(command.panel(), command.viewport());
        if let Command::PlotJulia { seed, .. } = command {
            self.state.viewports.seed = seed;
        }
        self.render(&command);
        if push {
            self.state.history.push(command);
        }
    }

    /// Render a panel from the current state and push the matching command.
    fn redraw(&mut self, panel: Panel) {
        let viewport = self.state.viewports.viewport(panel);
        let nmax = self.state.params.fractal.max_iterations;
        let command = match panel {
            Panel::Mandelbrot => Command::PlotMandelbrot { viewport, nmax },
            Panel::Julia => Command::PlotJulia {
                viewport,
                nmax,
                seed: self.state.viewports.seed,
            },
        };
        self.render(&command);
        self.state.history.push(command);
    }

    fn render(&mut self, command: &Command) {
        info!("{}", command.serialize());
        self.sink.set_caption(&command.caption());

        let (width, height) = (self.panel_width, self.panel_height);
        let x_offset = command.panel().x_offset(width);
        let params = &self.state.params;
        let fractal_params = params.fractal.with_max_iterations(command.nmax());
        let mapper = ColorMapper::new(&params.color, params.palette.as_ref());
        let sink = &mut self.sink;
        let result = match command {
            Command::PlotMandelbrot { viewport, .. } => render_into(
                &Mandelbrot::new(fractal_params),
                viewport,
                width,
                height,
                &mapper,
                sink,
                x_offset,
            ),
            Command::PlotJulia { viewport, seed, .. } => render_into(
                &Julia::new(*seed, fractal_params),
                viewport,
                width,
                height,
                &mapper,
                sink,
                x_offset,
            ),
        };
        debug!("{} panel done in {:.1?}", command.panel().label(), result.elapsed);
    }

    fn to_plane(&self, panel: Panel, px: f64, py: f64) -> Complex {
        self.state.viewports.viewport(panel).screen_to_plane(
            px,
            py,
            self.panel_width,
            self.panel_height,
        )
    }
}
