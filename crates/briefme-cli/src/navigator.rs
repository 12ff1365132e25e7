use briefme_core::session::Navigator;

/// Navigator for a terminal session: the "current view" is given on the
/// command line and a navigation is reported instead of performed.
pub struct CliNavigator {
    current: String,
}

impl CliNavigator {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }
}

impl Navigator for CliNavigator {
    fn current_path(&self) -> String {
        self.current.clone()
    }

    fn navigate(&self, path: &str) {
        tracing::info!("[Navigator] Redirecting from {} to {}", self.current, path);
        eprintln!("Session expired, please sign in again ({})", path);
    }
}
