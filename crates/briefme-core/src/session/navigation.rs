//! Navigation seam for code that cannot reach the session store reactively.

/// Path of the login screen.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Paths reachable without a session. Visiting them never forces a redirect.
pub const DEFAULT_PUBLIC_PATHS: [&str; 3] = ["/", "/login", "/onboarding"];

/// Current location and full navigation, as provided by the hosting shell.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;

    /// Performs a full navigation to `path`.
    fn navigate(&self, path: &str);
}
