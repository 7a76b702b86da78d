//! Embedded stylesheet loading and caching.

use std::{collections::HashMap, sync::OnceLock};

static CSS_CACHE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

pub struct ResourceLoader;

impl ResourceLoader {
    fn get_all_styles() -> HashMap<&'static str, &'static str> {
        let mut m = HashMap::new();
        macro_rules! style {
            ($n:expr, $p:expr) => {
                m.insert($n, include_str!(concat!(env!("CARGO_MANIFEST_DIR"), $p)));
            };
        }
        style!("main", "/assets/styles/main.css");
        style!("auth", "/assets/styles/auth.css");
        style!("table", "/assets/styles/table.css");
        m
    }

    /// Gets a stylesheet by name, or an empty string if it is unknown.
    pub fn get_css(name: &str) -> &'static str {
        CSS_CACHE
            .get_or_init(Self::get_all_styles)
            .get(name)
            .copied()
            .unwrap_or("")
    }

    /// All stylesheets the shell needs, concatenated.
    pub fn get_app_css() -> String {
        ["main", "table"]
            .iter()
            .map(|name| Self::get_css(name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
