use serde::{Deserialize, Serialize};

/// A selectable map definition. Immutable for the lifetime of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    /// Identity name used in commands and config references.
    pub name: String,
    /// Name shown to players in menus and broadcasts.
    pub display_name: String,
}

impl Arena {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
        }
    }
}

/// Resolve an arena by identity name, ignoring ASCII case.
pub fn by_name<'a>(arenas: &'a [Arena], name: &str) -> Option<&'a Arena> {
    arenas.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}

/// Load an arena catalog from a JSON file, returning `None` if the file is
/// missing or invalid.
pub fn load_catalog_from_file(path: &str) -> Option<Vec<Arena>> {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Vec<Arena>>(&content) {
            Ok(arenas) => Some(arenas),
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}");
                None
            },
        },
        Err(_) => None,
    }
}

/// Load the arena catalog from the conventional location.
///
/// Checks env var `MISSILEWARS_ARENAS` (default `config/arenas.json`) and
/// falls back to an empty catalog if the file is missing or unparseable.
pub fn load_catalog() -> Vec<Arena> {
    let path =
        std::env::var("MISSILEWARS_ARENAS").unwrap_or_else(|_| "config/arenas.json".to_string());
    load_catalog_from_file(&path).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_ignores_case() {
        let arenas = vec![
            Arena::new("oceanic", "Oceanic"),
            Arena::new("skybound", "Skybound"),
        ];
        assert_eq!(by_name(&arenas, "SkyBound").unwrap().display_name, "Skybound");
        assert_eq!(by_name(&arenas, "oceanic").unwrap().name, "oceanic");
        assert!(by_name(&arenas, "volcano").is_none());
    }

    #[test]
    fn load_from_missing_file_returns_none() {
        assert!(load_catalog_from_file("/nonexistent/path/arenas.json").is_none());
    }

    #[test]
    fn load_catalog_falls_back_to_empty() {
        // Point at a nonexistent file so no JSON is found.
        unsafe {
            std::env::set_var("MISSILEWARS_ARENAS", "/nonexistent/arenas.json");
        }
        assert!(load_catalog().is_empty());
        unsafe {
            std::env::remove_var("MISSILEWARS_ARENAS");
        }
    }

    #[test]
    fn json_roundtrip_preserves_catalog() {
        let arenas = vec![
            Arena::new("oceanic", "Oceanic"),
            Arena::new("skybound", "Skybound"),
        ];
        let json = serde_json::to_string(&arenas).unwrap();
        let loaded: Vec<Arena> = serde_json::from_str(&json).unwrap();
        assert_eq!(arenas, loaded);
    }
}
