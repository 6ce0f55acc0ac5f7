use crate::report::{DetectionReport, REDACTED_TOKEN_PLACEHOLDER};
use crate::session::Detection;

use models::{DetectionMode, ListeningPorts, ProcessInfoBuilder};

fn detection(extension_port: u16, ports: &[u16]) -> Detection {
    Detection {
        process: ProcessInfoBuilder::default()
            .with_pid(4321)
            .with_extension_port(extension_port)
            .with_csrf_token("ab12-cd34")
            .build()
            .expect("valid process info"),
        listening_ports: ListeningPorts::from_ports(ports.iter().copied()),
    }
}

/// **VALUE**: Verifies the token is withheld unless explicitly requested.
///
/// **WHY THIS MATTERS**: Reports end up in terminals, CI logs and bug reports.
#[test]
fn given_show_token_off_when_building_report_then_token_is_placeholder() {
    // WHEN: Building a report without --show-token
    let report = DetectionReport::new(&detection(9090, &[]), DetectionMode::Legacy, false);

    // THEN: Placeholder, and the JSON does not contain the value
    assert_eq!(report.csrf_token, REDACTED_TOKEN_PLACEHOLDER);
    let json = serde_json::to_string(&report).expect("serializable");
    assert!(!json.contains("ab12-cd34"));
}

#[test]
fn given_show_token_on_when_building_report_then_token_is_included() {
    let report = DetectionReport::new(&detection(9090, &[]), DetectionMode::Structured, true);

    assert_eq!(report.csrf_token, "ab12-cd34");
    assert_eq!(report.mode, DetectionMode::Structured);
}

#[test]
fn given_no_extension_port_when_building_report_then_effective_port_is_lowest_listener() {
    let report = DetectionReport::new(&detection(0, &[9100, 9001]), DetectionMode::Legacy, false);

    assert_eq!(report.extension_port, 0);
    assert_eq!(report.listening_ports, vec![9001, 9100]);
    assert_eq!(report.effective_port, Some(9001));
}

#[test]
fn given_extension_port_when_building_report_then_it_wins_over_listeners() {
    let report = DetectionReport::new(&detection(9090, &[9001]), DetectionMode::Legacy, false);

    assert_eq!(report.effective_port, Some(9090));
}

#[test]
fn given_no_ports_at_all_when_building_report_then_effective_port_is_none() {
    let report = DetectionReport::new(&detection(0, &[]), DetectionMode::Legacy, false);

    assert_eq!(report.effective_port, None);
}
