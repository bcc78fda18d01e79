use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use touch_tint::app::{App, AppConfig, PaintRequest};
use touch_tint::build_info;

fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load_from_env();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // RUST_LOG wins over the profile's filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = &loaded {
        warn!(error = %e, "Failed to load config, using default configuration");
    }
    info!(
        version = %build_info::version_string(),
        git = build_info::git_sha_short(),
        built = build_info::BUILD_TIMESTAMP,
        "Build info"
    );

    let event_loop = EventLoop::<PaintRequest>::with_user_event().build()?;
    // Frames are driven by self-posted paint requests, so the loop can sleep
    // between events
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, event_loop.create_proxy())?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
