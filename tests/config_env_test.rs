//! `ClientConfig::from_env` against the real process environment.

use std::time::Duration;

use frontline::error::FrontlineError;
use frontline::startup::config::{
    ClientConfig, ENV_API_URL, ENV_AUTO_ADVANCE, ENV_DOUBLE_TAP_MS, ENV_DRAG_THRESHOLD,
    ENV_LONG_PRESS_MS, ENV_POLL_MS,
};
use frontline::sync::AutoAdvancePolicy;
use serial_test::serial;

const ALL: [&str; 6] = [
    ENV_API_URL,
    ENV_POLL_MS,
    ENV_LONG_PRESS_MS,
    ENV_DOUBLE_TAP_MS,
    ENV_DRAG_THRESHOLD,
    ENV_AUTO_ADVANCE,
];

fn clear_env() {
    for key in ALL {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_unset_environment_gives_defaults() {
    clear_env();
    assert_eq!(ClientConfig::from_env().unwrap(), ClientConfig::default());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    std::env::set_var(ENV_API_URL, "http://rules.internal:7000/");
    std::env::set_var(ENV_POLL_MS, "1500");
    std::env::set_var(ENV_DOUBLE_TAP_MS, "250");
    std::env::set_var(ENV_AUTO_ADVANCE, "withdrawer");

    let config = ClientConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.api_base_url, "http://rules.internal:7000/");
    assert_eq!(config.poll_interval, Duration::from_millis(1500));
    assert_eq!(config.gesture.double_tap_window, Duration::from_millis(250));
    assert_eq!(config.gesture.long_press, Duration::from_millis(500));
    assert_eq!(config.auto_advance, AutoAdvancePolicy::WithdrawingPlayerOnly);
}

#[test]
#[serial]
fn test_blank_url_keeps_default() {
    clear_env();
    std::env::set_var(ENV_API_URL, "   ");
    let config = ClientConfig::from_env().unwrap();
    clear_env();
    assert_eq!(config.api_base_url, ClientConfig::default().api_base_url);
}

#[test]
#[serial]
fn test_malformed_threshold_is_rejected() {
    clear_env();
    std::env::set_var(ENV_DRAG_THRESHOLD, "far");
    let result = ClientConfig::from_env();
    clear_env();

    match result {
        Err(FrontlineError::Config(message)) => assert!(message.contains(ENV_DRAG_THRESHOLD)),
        other => panic!("expected a config error, got {other:?}"),
    }
}
