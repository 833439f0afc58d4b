use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::OnceCell;

pub mod command;
pub mod keys;
pub mod msg;
pub mod runtime;
pub mod screen;
pub mod screens;
pub mod stack;
pub mod state;

#[cfg(test)]
mod test_runtime;

#[cfg(test)]
mod test_stack;

pub use command::{Command, NavRequest};
pub use keys::KeyBinding;
pub use msg::Msg;
pub use runtime::Runtime;
pub use screen::{Lifecycle, Screen, ThemeAware};
pub use stack::NavStack;
pub use state::{RuntimeConfig, Theme, ThemeVariant};

// Global RuntimeConfig instance (ArcSwap for lock-free atomic updates)
static RUNTIME_CONFIG: OnceCell<ArcSwap<RuntimeConfig>> = OnceCell::new();

fn runtime_config_cell() -> &'static ArcSwap<RuntimeConfig> {
    RUNTIME_CONFIG.get_or_init(|| ArcSwap::from_pointee(RuntimeConfig::default()))
}

/// Get a clone of the current RuntimeConfig Arc.
pub fn global_runtime_config() -> Arc<RuntimeConfig> {
    runtime_config_cell().load_full()
}

/// Replace the global RuntimeConfig (startup, or a theme change at runtime).
pub fn store_runtime_config(config: RuntimeConfig) {
    runtime_config_cell().store(Arc::new(config));
}
