use crossterm::event::Event;

/// Inputs from the terminal side; player events travel on their own channel.
#[derive(Debug)]
pub enum AppEvent {
    Input(Event),
    Tick,
}
