use tracing::Level;

pub struct Logger;

impl Logger {
    /// Installs the global fmt subscriber. Output goes to stderr so it stays
    /// out of the menu on stdout.
    pub fn init(level: Level) {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
