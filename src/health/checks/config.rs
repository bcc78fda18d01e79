//! Configuration system health check

use tracing_subscriber::EnvFilter;

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that configuration can be loaded for all profiles
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    /// Creates a config check with custom profiles
    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failed = 0;

        for profile in &self.profiles {
            let problems = match AppConfig::load(profile) {
                Ok(config) => {
                    let problems = validate(&config);
                    if problems.is_empty() {
                        details.push(format!(
                            "  ✓ Profile '{}': {}x{}, fps overlay {}, mouse as touch {}",
                            profile,
                            config.window.width,
                            config.window.height,
                            config.overlay.show_fps,
                            config.input.mouse_as_touch
                        ));
                    }
                    problems
                }
                Err(e) => vec![format!("failed to load - {}", e)],
            };
            if !problems.is_empty() {
                failed += 1;
                for problem in problems {
                    details.push(format!("  ✗ Profile '{}': {}", profile, problem));
                }
            }
        }

        let env_warning = match AppConfig::load_from_env() {
            Ok(config) => {
                details.push(format!(
                    "  ✓ Environment config: profile '{}' loaded",
                    config.profile
                ));
                false
            }
            Err(e) => {
                details.push(format!("  ⚠ Environment config: {}", e));
                true
            }
        };

        let details = details.join("\n");

        if failed > 0 {
            CheckResult::fail(format!("{} config profile(s) invalid", failed)).with_details(details)
        } else if env_warning {
            CheckResult::warn("Config loaded with warnings").with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}

/// Values that load fine but would break the app at start-up
fn validate(config: &AppConfig) -> Vec<String> {
    let mut problems = Vec::new();

    let window = &config.window;
    if !(window.width > 0.0 && window.height > 0.0) {
        problems.push(format!(
            "window size {}x{} leaves nothing to paint",
            window.width, window.height
        ));
    }
    if let Err(e) = EnvFilter::try_new(&config.logging.filter) {
        problems.push(format!("logging filter '{}': {}", config.logging.filter, e));
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&AppConfig::default()).is_empty());
    }

    #[test]
    fn test_validate_flags_empty_window_and_bad_filter() {
        let mut config = AppConfig::default();
        config.window.height = 0.0;
        config.logging.filter = "info,touch_tint=loud".to_string();

        let problems = validate(&config);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("window size"));
        assert!(problems[1].contains("logging filter"));
    }
}
