use statfacet_core::config::HierarchyConfig;

/// Shared application state
pub struct AppState {
    /// Nesting applied when a request does not supply its own
    pub hierarchies: HierarchyConfig,
}

impl AppState {
    pub fn new(hierarchies: HierarchyConfig) -> Self {
        Self { hierarchies }
    }
}
