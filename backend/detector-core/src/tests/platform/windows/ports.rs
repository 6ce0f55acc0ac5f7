use crate::platform::windows::ports::parse_listening_ports;

const NETSTAT_OUTPUT: &str = "
  TCP    127.0.0.1:42100        0.0.0.0:0              LISTENING       4321
  TCP    127.0.0.1:42101        0.0.0.0:0              LISTENING       4321
  TCP    0.0.0.0:42102          0.0.0.0:0              LISTENING       4321
  TCP    127.0.0.1:42100        127.0.0.1:50000        ESTABLISHED     4321
  TCP    [::1]:42103            [::]:0                 LISTENING       4321
";

/// **VALUE**: Verifies only loopback IPv4 listeners are reported.
///
/// **WHY THIS MATTERS**: The language server only accepts connections on 127.0.0.1.
/// Reporting a wildcard or established socket would point the caller at the wrong port.
#[test]
fn given_mixed_socket_rows_when_parsing_then_keeps_loopback_listeners_only() {
    // WHEN: Parsing netstat output with wildcard, established and IPv6 rows
    let ports = parse_listening_ports(NETSTAT_OUTPUT);

    // THEN: Only the two loopback listeners remain
    assert_eq!(ports.as_slice(), &[42100, 42101]);
}

#[test]
fn given_out_of_range_port_when_parsing_then_ignores_it() {
    let stdout = "  TCP    127.0.0.1:70000        0.0.0.0:0              LISTENING       1\n\
                  TCP    127.0.0.1:8080         0.0.0.0:0              LISTENING       1";

    assert_eq!(parse_listening_ports(stdout).as_slice(), &[8080]);
}

#[test]
fn given_empty_output_when_parsing_then_returns_empty_list() {
    assert!(parse_listening_ports("").is_empty());
    assert!(parse_listening_ports("INFO: No tasks are running").is_empty());
}
