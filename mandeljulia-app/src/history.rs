use crate::command::Command;

/// Stack of rendered commands, most recent last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandHistory {
    commands: Vec<Command>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Discard the current command and take the one below it.
    ///
    /// Both are removed, so the stack shrinks by two and the returned command
    /// is expected to be re-rendered without being pushed again. A single
    /// entry is dropped and `None` returned; an empty history is unchanged.
    pub fn step_back(&mut self) -> Option<Command> {
        self.commands.pop()?;
        self.commands.pop()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Command> {
        self.commands.last()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandeljulia_core::{Complex, Viewport};

    fn cmd(nmax: u32) -> Command {
        Command::PlotMandelbrot {
            viewport: Viewport::default_mandelbrot(2),
            nmax,
        }
    }

    #[test]
    fn step_back_pops_two_and_returns_second() {
        let mut history = CommandHistory::new();
        for n in 1..=5 {
            history.push(cmd(n));
        }
        assert_eq!(history.step_back(), Some(cmd(4)));
        assert_eq!(history.len(), 3);
        assert_eq!(history.last(), Some(&cmd(3)));
    }

    #[test]
    fn shrink_law_for_every_size() {
        for k in 0..6usize {
            let mut history = CommandHistory::new();
            for n in 0..k {
                history.push(cmd(n as u32 + 1));
            }
            let second_from_top = k.checked_sub(2).map(|i| cmd(i as u32 + 1));
            assert_eq!(history.step_back(), second_from_top, "k={k}");
            assert_eq!(history.len(), k.saturating_sub(2), "k={k}");
        }
    }

    #[test]
    fn single_entry_is_dropped() {
        let mut history = CommandHistory::new();
        history.push(Command::PlotJulia {
            viewport: Viewport::default_julia(),
            nmax: 100,
            seed: Complex::new(0.5, 0.0),
        });
        assert_eq!(history.step_back(), None);
        assert!(history.is_empty());
        assert_eq!(history.step_back(), None);
        assert_eq!(history.iter().count(), 0);
    }
}
