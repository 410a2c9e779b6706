//! Logger construction

use std::sync::Arc;

use tokio::runtime::Handle;

use super::core::Logger;
use crate::config::{ConfigPatch, Environment, LoggerConfig};
use crate::console::{SharedConsole, StdConsole};
use crate::probe::{HostProbe, SharedProbe};
use crate::report::{HttpTransport, SharedTransport};
use crate::storage::{LogStorage, MemoryStorage};

/// Assembles a [`Logger`] from its collaborators
///
/// Anything not supplied gets a default:
/// - config: defaults for [`Environment::detect`]
/// - storage: [`MemoryStorage`]
/// - transport: [`HttpTransport`] with no API base (relative report URLs fail)
/// - probe: [`HostProbe`]
/// - console: [`StdConsole`]
/// - runtime: the ambient tokio runtime, if `build` is called inside one
#[derive(Default)]
pub struct LoggerBuilder {
    config: Option<LoggerConfig>,
    patch: ConfigPatch,
    storage: Option<Arc<dyn LogStorage>>,
    transport: Option<SharedTransport>,
    probe: Option<SharedProbe>,
    console: Option<SharedConsole>,
    runtime: Option<Handle>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete configuration
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overlay a partial configuration on top of the base one
    pub fn patch(mut self, patch: ConfigPatch) -> Self {
        self.patch = self.patch.overlay(&patch);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn LogStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn transport(mut self, transport: SharedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn probe(mut self, probe: SharedProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn console(mut self, console: SharedConsole) -> Self {
        self.console = Some(console);
        self
    }

    /// Runtime used for background auto-reports
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Build the logger, loading any persisted buffer from storage
    pub fn build(self) -> Logger {
        let config = self
            .config
            .unwrap_or_else(|| LoggerConfig::for_environment(Environment::detect()))
            .merged(&self.patch);

        Logger::from_parts(
            config,
            self.storage.unwrap_or_else(|| Arc::new(MemoryStorage::new())),
            self.transport.unwrap_or_else(|| Arc::new(HttpTransport::new(""))),
            self.probe.unwrap_or_else(|| Arc::new(HostProbe::new())),
            self.console.unwrap_or_else(|| Arc::new(StdConsole::new())),
            self.runtime.or_else(|| Handle::try_current().ok()),
        )
    }
}
