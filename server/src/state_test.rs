use std::sync::Arc;

use super::test_helpers::{MockAuth, MockBackend, test_config, unconfigured_app_state};
use super::*;

#[test]
fn missing_services_are_unavailable() {
    let state = unconfigured_app_state();
    assert!(matches!(state.auth(), Err(ApiError::Unavailable("auth provider"))));
    assert!(matches!(state.backend(), Err(ApiError::Unavailable("research backend"))));
}

#[test]
fn configured_services_are_returned() {
    let state = AppState::new(
        test_config(),
        Some(Arc::new(MockAuth::default())),
        Some(Arc::new(MockBackend::default())),
    );
    assert!(state.auth().is_ok());
    assert!(state.backend().is_ok());
}

#[test]
fn clones_share_config() {
    let state = unconfigured_app_state();
    let clone = state.clone();
    assert!(Arc::ptr_eq(&state.config, &clone.config));
}
