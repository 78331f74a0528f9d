mod support;

use scout_core::ExpansionConfig;
use scout_harvest::{expand_comments, StopReason};
use support::{Control, FakeSession};

fn fast_config(selectors: &[&str]) -> ExpansionConfig {
    ExpansionConfig {
        settle_ms: 0,
        click_settle_ms: 0,
        control_selectors: selectors.iter().map(ToString::to_string).collect(),
        ..ExpansionConfig::default()
    }
}

#[tokio::test]
async fn test_converges_after_threshold_once_growth_stops() {
    // baseline 100, grows three times, then flat
    let session = FakeSession::new().with_heights(&[100, 200, 300, 400]);

    let report = expand_comments(&session, &fast_config(&[])).await;

    assert_eq!(report.stop_reason, StopReason::Converged);
    assert_eq!(report.iterations, 3 + 3);
    assert_eq!(report.final_height, 400);
    assert_eq!(session.count_actions("scroll"), 6);
}

#[tokio::test]
async fn test_static_page_stops_after_threshold() {
    let session = FakeSession::new().with_heights(&[500]);

    let report = expand_comments(&session, &fast_config(&[".more"])).await;

    assert!(report.converged());
    assert_eq!(report.iterations, 3);
    assert_eq!(report.final_height, 500);
    assert_eq!(report.controls_activated, 0);
}

#[tokio::test]
async fn test_threshold_of_zero_behaves_as_one() {
    let session = FakeSession::new().with_heights(&[500]);
    let config = ExpansionConfig {
        no_growth_threshold: 0,
        ..fast_config(&[])
    };

    let report = expand_comments(&session, &config).await;

    assert_eq!(report.iterations, 1);
    assert!(report.converged());
}

#[tokio::test]
async fn test_control_failures_are_skipped() {
    let session = FakeSession::new()
        .with_heights(&[100, 200])
        .with_controls(
            ".more",
            &[Control::Visible, Control::Hidden, Control::Broken],
        );

    let report = expand_comments(&session, &fast_config(&[".more"])).await;

    assert!(report.converged());
    assert_eq!(report.iterations, 1 + 3);
    assert_eq!(report.controls_activated, 1);
    // the broken control fails once per control pass; there are three
    assert_eq!(report.failed_actions, 3);
}

#[tokio::test]
async fn test_control_pass_runs_on_every_non_terminal_iteration() {
    let session = FakeSession::new()
        .with_heights(&[100])
        .with_controls(".more", &[Control::Hidden]);

    let report = expand_comments(&session, &fast_config(&[".more"])).await;

    assert_eq!(report.iterations, 3);
    assert_eq!(session.count_actions("click_displayed .more"), 2);
}

#[tokio::test]
async fn test_no_actions_after_convergence() {
    let session = FakeSession::new()
        .with_heights(&[100])
        .with_controls(".more", &[Control::Hidden]);

    expand_comments(&session, &fast_config(&[".more"])).await;

    let log = session.log();
    assert_eq!(log.last().map(String::as_str), Some("height"));
}

#[tokio::test]
async fn test_shrinking_page_counts_as_no_growth() {
    let session = FakeSession::new().with_heights(&[1000, 800, 900, 700]);

    let report = expand_comments(&session, &fast_config(&[])).await;

    assert!(report.converged());
    assert_eq!(report.iterations, 3);
    assert_eq!(report.final_height, 1000);
}

#[tokio::test]
async fn test_session_loss_ends_loop_with_partial_result() {
    let session = FakeSession::new()
        .with_heights(&[100, 200, 300, 400])
        .lose_session_after(3);

    let report = expand_comments(&session, &fast_config(&[])).await;

    assert!(matches!(report.stop_reason, StopReason::SessionLost(_)));
    assert_eq!(report.iterations, 2);
    assert_eq!(report.final_height, 300);
}

#[tokio::test]
async fn test_session_lost_before_baseline() {
    let session = FakeSession::new().lose_session_after(0);

    let report = expand_comments(&session, &fast_config(&[])).await;

    assert!(matches!(report.stop_reason, StopReason::SessionLost(_)));
    assert_eq!(report.iterations, 0);
    assert_eq!(session.count_actions("scroll"), 0);
}

#[tokio::test]
async fn test_iteration_cap_bounds_endless_growth() {
    let session = FakeSession::new().with_unbounded_growth();
    let config = ExpansionConfig {
        max_iterations: 5,
        ..fast_config(&[])
    };

    let report = expand_comments(&session, &config).await;

    assert_eq!(report.stop_reason, StopReason::IterationCap);
    assert_eq!(report.iterations, 5);
    assert!(!report.converged());
}

#[tokio::test]
async fn test_zero_iteration_cap_still_measures() {
    let session = FakeSession::new().with_heights(&[500]);
    let config = ExpansionConfig {
        max_iterations: 0,
        ..fast_config(&[])
    };

    let report = expand_comments(&session, &config).await;

    assert!(report.converged());
    assert_eq!(report.iterations, 3);
    assert_eq!(session.count_actions("scroll"), 3);
}

#[tokio::test]
async fn test_cap_below_threshold_lets_static_page_converge() {
    let session = FakeSession::new().with_heights(&[500]);
    let config = ExpansionConfig {
        max_iterations: 2,
        ..fast_config(&[])
    };

    let report = expand_comments(&session, &config).await;

    assert_eq!(report.stop_reason, StopReason::Converged);
    assert_eq!(report.iterations, 3);
}

#[tokio::test]
async fn test_controls_inserted_by_a_click_do_not_shift_the_pass() {
    // each toggle reveals a nested toggle directly after itself
    let session = FakeSession::new()
        .with_heights(&[100, 200])
        .with_controls(".replies", &[Control::Expands, Control::Expands]);

    let report = expand_comments(&session, &fast_config(&[".replies"])).await;

    let activations: Vec<_> = session
        .log()
        .into_iter()
        .filter(|a| a.starts_with("activate"))
        .collect();
    // first pass hits both originals, second pass the two nested ones
    assert_eq!(
        activations,
        vec![
            "activate .replies#0",
            "activate .replies#1",
            "activate .replies#2",
            "activate .replies#3",
        ]
    );
    assert_eq!(report.controls_activated, 4);
    assert_eq!(report.failed_actions, 0);
}
