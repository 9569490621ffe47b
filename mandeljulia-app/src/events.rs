use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

/// Input delivered to the controller. Mouse positions are window
/// coordinates spanning both panels.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MouseDown { button: MouseButton, x: f64, y: f64 },
    MouseUp { button: MouseButton, x: f64, y: f64 },
    KeyPress { key: Key, shift: bool },
    /// Command text to parse and render.
    SubmitCommand(String),
    /// Palette to switch to.
    SubmitPalette(String),
    StepBack,
    Quit,
}

/// Anything that can hand the controller its next event.
pub trait EventSource {
    /// `None` once the source is exhausted.
    fn next_event(&mut self) -> Option<Event>;
}

impl EventSource for VecDeque<Event> {
    fn next_event(&mut self) -> Option<Event> {
        self.pop_front()
    }
}
