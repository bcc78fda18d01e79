//! Window creation from configuration

use super::config::WindowConfig;
use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated);

    if config.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_follow_config() {
        let config = WindowConfig {
            title: "Tint".to_string(),
            resizable: false,
            ..Default::default()
        };
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Tint");
        assert!(!attrs.resizable);
        assert!(attrs.fullscreen.is_none());
    }

    #[test]
    fn test_fullscreen_requested() {
        let config = WindowConfig {
            fullscreen: true,
            ..Default::default()
        };
        let attrs = window_attributes_from_config(&config);
        assert!(attrs.fullscreen.is_some());
    }
}
