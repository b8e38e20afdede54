use crate::app::main::App;

/// Drives the app from the UI thread until the user leaves.
pub trait Frontend {
    fn run(self: Box<Self>, app: App) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
