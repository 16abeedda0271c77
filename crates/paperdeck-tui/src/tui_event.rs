use paperdeck_core::{LoadError, Paper};

/// Events flowing from the background load task to the TUI.
#[derive(Debug)]
pub enum LoadEvent {
    /// The dataset fetch finished, successfully or not.
    Finished(Result<Vec<Paper>, LoadError>),
}
