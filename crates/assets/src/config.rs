/// Configure how a [`ResourceLoader`](crate::ResourceLoader) resolves and reads locators
#[derive(Clone, Debug, Default)]
pub struct LoaderConfig {
    root: Option<String>,
    threads: usize,
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix joined to relative locators.
    ///
    /// Locators with a scheme (`http://`, `file://`...) are left untouched, as
    /// are absolute paths on native targets. On wasm a leading `/` is treated as
    /// relative to the root.
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Threads used to read files natively (0 lets rayon decide)
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn thread_count(&self) -> usize {
        self.threads
    }

    pub(crate) fn resolve(&self, locator: &str) -> String {
        match &self.root {
            Some(root) if !has_scheme(locator) && !is_absolute_path(locator) => {
                let root = root.trim_end_matches('/');
                let locator = locator.trim_start_matches('/');
                if root.is_empty() {
                    format!("/{locator}")
                } else {
                    format!("{root}/{locator}")
                }
            }
            _ => locator.to_string(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn is_absolute_path(locator: &str) -> bool {
    std::path::Path::new(locator).is_absolute()
}

#[cfg(target_arch = "wasm32")]
fn is_absolute_path(_locator: &str) -> bool {
    false
}

pub(crate) fn has_scheme(locator: &str) -> bool {
    locator.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_root_is_passthrough() {
        let config = LoaderConfig::new();
        assert_eq!(config.resolve("/config.json"), "/config.json");
        assert_eq!(config.resolve("img/hero.png"), "img/hero.png");
    }

    #[test]
    fn test_root_is_joined() {
        let config = LoaderConfig::new().root("assets/");
        assert_eq!(config.resolve("config.json"), "assets/config.json");
        assert_eq!(config.resolve("img/hero.png"), "assets/img/hero.png");
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_paths_skip_root() {
        let config = LoaderConfig::new().root("assets");
        assert_eq!(
            config.resolve("/tmp/data/config.json"),
            "/tmp/data/config.json"
        );
    }

    #[cfg(windows)]
    #[test]
    fn test_absolute_paths_skip_root() {
        let config = LoaderConfig::new().root("assets");
        assert_eq!(
            config.resolve("C:\\data\\config.json"),
            "C:\\data\\config.json"
        );
    }

    #[test]
    fn test_slash_root() {
        let config = LoaderConfig::new().root("/");
        assert_eq!(config.resolve("config.json"), "/config.json");
    }

    #[test]
    fn test_urls_skip_root() {
        let config = LoaderConfig::new().root("assets");
        assert_eq!(
            config.resolve("https://cdn.example.com/hero.png"),
            "https://cdn.example.com/hero.png"
        );
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("http://localhost/a.json"));
        assert!(has_scheme("file:///tmp/a.json"));
        assert!(!has_scheme("a.json"));
        assert!(!has_scheme("://a.json"));
        assert!(!has_scheme("some dir/x://y"));
    }
}
