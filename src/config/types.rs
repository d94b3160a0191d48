// Configuration type definitions

use serde::Deserialize;

/// Rate-limiter intervals and animation timings, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub scroll_throttle_ms: u64,
    pub parallax_throttle_ms: u64,
    pub search_debounce_ms: u64,
    /// Grace period before a blurred search box hides its suggestions, so a
    /// click on a suggestion still lands
    pub blur_grace_ms: u64,
    pub toast_duration_ms: u64,
    pub toast_exit_ms: u64,
    pub bottom_nav_toast_ms: u64,
    pub fade_pulse_ms: u64,
    pub click_flash_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            scroll_throttle_ms: 100,
            parallax_throttle_ms: 50,
            search_debounce_ms: 300,
            blur_grace_ms: 200,
            toast_duration_ms: 3000,
            toast_exit_ms: 300,
            bottom_nav_toast_ms: 1500,
            fade_pulse_ms: 600,
            click_flash_ms: 300,
        }
    }
}

/// Scroll-offset thresholds in pixels
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub back_to_top_offset: f64,
    pub header_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            back_to_top_offset: 300.0,
            header_offset: 100.0,
        }
    }
}

/// Lazy image loading section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LazyConfig {
    /// Images load once they are this close below the viewport
    #[serde(default = "default_root_margin_bottom")]
    pub root_margin_bottom: f64,
}

fn default_root_margin_bottom() -> f64 {
    200.0
}

impl Default for LazyConfig {
    fn default() -> Self {
        LazyConfig {
            root_margin_bottom: default_root_margin_bottom(),
        }
    }
}

/// Search suggestion section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,
}

fn default_min_query_chars() -> usize {
    2
}

fn default_suggestions() -> Vec<String> {
    [
        "Design Software",
        "Office Software",
        "Developer Tools",
        "Video Editing",
        "Music Production",
        "Adobe Photoshop",
        "Microsoft Office",
        "Visual Studio Code",
        "Final Cut Pro",
        "Ableton Live",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_query_chars: default_min_query_chars(),
            suggestions: default_suggestions(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub lazy: LazyConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();
        assert_eq!(config.timing.scroll_throttle_ms, 100);
        assert_eq!(config.timing.parallax_throttle_ms, 50);
        assert_eq!(config.timing.search_debounce_ms, 300);
        assert_eq!(config.timing.blur_grace_ms, 200);
        assert_eq!(config.timing.toast_duration_ms, 3000);
        assert_eq!(config.scroll.back_to_top_offset, 300.0);
        assert_eq!(config.scroll.header_offset, 100.0);
        assert_eq!(config.lazy.root_margin_bottom, 200.0);
        assert_eq!(config.search.min_query_chars, 2);
        assert_eq!(config.search.suggestions.len(), 10);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_custom_suggestions() {
        let toml = r#"
[search]
suggestions = ["Blender", "Krita"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.search.suggestions, vec!["Blender", "Krita"]);
        assert_eq!(config.search.min_query_chars, 2);
    }

    #[test]
    fn test_parse_scroll_thresholds() {
        let toml = r#"
[scroll]
header_offset = 40.0
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.scroll.header_offset, 40.0);
        assert_eq!(config.scroll.back_to_top_offset, 300.0);
    }

    #[test]
    fn test_wrong_type_fails_to_parse() {
        let toml = r#"
[timing]
scroll_throttle_ms = "fast"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // Any subset of timing fields parses; missing fields keep their defaults.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_partial_timing_uses_defaults(
            scroll in proptest::option::of(1u64..1000),
            debounce in proptest::option::of(1u64..1000)
        ) {
            let mut toml_content = String::from("[timing]\n");
            if let Some(v) = scroll {
                toml_content.push_str(&format!("scroll_throttle_ms = {}\n", v));
            }
            if let Some(v) = debounce {
                toml_content.push_str(&format!("search_debounce_ms = {}\n", v));
            }

            let config: Config = toml::from_str(&toml_content).unwrap();
            let defaults = TimingConfig::default();
            prop_assert_eq!(config.timing.scroll_throttle_ms, scroll.unwrap_or(defaults.scroll_throttle_ms));
            prop_assert_eq!(config.timing.search_debounce_ms, debounce.unwrap_or(defaults.search_debounce_ms));
            prop_assert_eq!(config.timing.fade_pulse_ms, defaults.fade_pulse_ms);
        }
    }
}
