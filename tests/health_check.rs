//! Integration tests for the health check system

use touch_tint::health::{self, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    // Print report for debugging if tests fail
    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Config check failed: {}",
        result.message
    );
}

#[test]
fn test_config_check_reports_missing_profile() {
    let result = ConfigCheck::with_profiles(vec!["does-not-exist"]).check();
    assert!(result.status.is_fail());
}

#[test]
fn test_backdrop_check() {
    let result = BackdropCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Backdrop check failed: {}",
        result.message
    );
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Build info check failed: {}",
        result.message
    );
}

#[test]
fn test_system_info_check() {
    let result = SystemInfoCheck::new().check();
    assert!(
        result.status.is_ok(),
        "System info check failed: {}",
        result.message
    );
}

#[test]
fn test_frame_timer_check() {
    let result = FrameTimerCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Frame timer check failed: {}",
        result.message
    );
}

#[test]
fn test_overlay_layout_check() {
    let result = OverlayLayoutCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Overlay layout check failed: {}",
        result.message
    );
}

#[test]
fn test_graphics_backend_check() {
    // Headless machines only warn
    let result = GraphicsBackendCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Graphics backend check failed: {}",
        result.message
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(BackdropCheck::new())
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);
}
