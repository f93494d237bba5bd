//! Demo configuration.

use clap::Parser;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "scene_demo", about = "Round-trip example entities through scene serialization")]
pub struct Args {
    /// Number of entities to spawn before saving.
    #[arg(short = 'n', long, default_value_t = 3)]
    pub entities: usize,

    /// Default log directive, used when `RUST_LOG` does not override it.
    #[arg(long, default_value = "scene_demo=info")]
    pub log: String,
}

/// Configuration for a demo run.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Number of entities to spawn before saving.
    pub entity_count: usize,
    /// Default `tracing` directive.
    pub log_directive: String,
}

impl DemoConfig {
    /// Create a config that spawns `entity_count` entities.
    #[must_use]
    pub fn new(entity_count: usize) -> Self {
        Self {
            entity_count,
            log_directive: "scene_demo=info".to_string(),
        }
    }

    /// Override the default log directive.
    #[must_use]
    pub fn with_log_directive(mut self, directive: impl Into<String>) -> Self {
        self.log_directive = directive.into();
        self
    }
}

impl From<Args> for DemoConfig {
    fn from(args: Args) -> Self {
        Self::new(args.entities).with_log_directive(args.log)
    }
}
