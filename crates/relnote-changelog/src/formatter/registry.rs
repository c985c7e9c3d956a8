//! Formatter registry

use std::path::Path;
use std::sync::Arc;

use super::{ChangelogFormatter, JsonFormatter, TemplateFormatter};

/// Registry of available changelog formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl FormatterRegistry {
    /// Create a new registry with all built-in formatters
    pub fn new() -> Self {
        Self {
            formatters: vec![Arc::new(TemplateFormatter::new()), Arc::new(JsonFormatter)],
        }
    }

    /// Get formatter by file extension
    pub fn get(&self, extension: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters
            .iter()
            .find(|f| f.extension() == extension)
            .cloned()
    }

    /// Formatter for an output path; unknown extensions get the first formatter
    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn ChangelogFormatter>> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.get(e))
            .or_else(|| self.formatters.first().cloned())
    }

    /// Get all supported file extensions
    pub fn extensions(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.extension()).collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.extensions(), vec!["md", "json"]);
    }

    #[test]
    fn test_get_by_extension() {
        let registry = FormatterRegistry::new();
        assert!(registry.get("md").is_some());
        assert!(registry.get("html").is_none());
    }

    #[test]
    fn test_for_path() {
        let registry = FormatterRegistry::new();
        let json = registry.for_path(Path::new("notes/next.json")).unwrap();
        assert_eq!(json.extension(), "json");
        let fallback = registry.for_path(Path::new("RELEASES")).unwrap();
        assert_eq!(fallback.extension(), "md");
    }
}
