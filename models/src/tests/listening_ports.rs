use crate::ListeningPorts;

/// **VALUE**: Verifies the sorted, de-duplicated invariant holds for any input order.
///
/// **WHY THIS MATTERS**: Callers pick `first()` as the fallback port. Unsorted input
/// from netstat would make that choice depend on socket table order.
#[test]
fn given_unsorted_ports_with_duplicates_when_collected_then_sorted_and_unique() {
    // GIVEN: Ports in netstat order, with repeats and a zero
    let raw = [9090, 8080, 0, 9090, 8080, 443];

    // WHEN: Building ListeningPorts
    let ports = ListeningPorts::from_ports(raw);

    // THEN: Ascending, distinct, no zero
    assert_eq!(ports.as_slice(), &[443, 8080, 9090]);
    assert_eq!(ports.first(), Some(443));
    assert_eq!(ports.len(), 3);
}

#[test]
fn given_no_ports_when_collected_then_empty() {
    let ports: ListeningPorts = std::iter::empty().collect();

    assert!(ports.is_empty());
    assert_eq!(ports.first(), None);
    assert_eq!(ports.into_vec(), Vec::<u16>::new());
}

#[test]
fn given_ports_when_serialized_then_plain_array() {
    let ports = ListeningPorts::from_ports([9090, 8080]);

    let json = serde_json::to_string(&ports).expect("serializable");

    assert_eq!(json, "[8080,9090]");
}
