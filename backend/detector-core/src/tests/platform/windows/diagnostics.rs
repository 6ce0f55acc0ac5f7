use crate::DEFAULT_PROCESS_NAME;
use crate::platform::windows::diagnostics::{PROCESS_NOT_FOUND, error_messages};

use models::DetectionMode;

#[test]
fn given_any_mode_when_getting_messages_then_process_not_found_is_fixed() {
    assert_eq!(
        error_messages(DetectionMode::Legacy).process_not_found,
        PROCESS_NOT_FOUND
    );
    assert_eq!(
        error_messages(DetectionMode::Structured).process_not_found,
        PROCESS_NOT_FOUND
    );
}

/// **VALUE**: Verifies the "command unavailable" text names the tool actually used.
///
/// **WHY THIS MATTERS**: Telling a user to fix wmic when PowerShell failed sends them
/// down the wrong path.
#[test]
fn given_each_mode_when_getting_messages_then_command_text_names_the_tool() {
    // WHEN: Getting messages for both modes
    let legacy = error_messages(DetectionMode::Legacy);
    let structured = error_messages(DetectionMode::Structured);

    // THEN: Each names its own tool
    assert!(legacy.command_not_available.contains("wmic"));
    assert!(structured.command_not_available.contains("PowerShell"));
    assert_ne!(legacy.command_not_available, structured.command_not_available);
}

#[test]
fn given_each_mode_when_getting_requirements_then_three_ordered_items() {
    for mode in [DetectionMode::Legacy, DetectionMode::Structured] {
        let requirements = error_messages(mode).requirements;

        assert_eq!(requirements.len(), 3);
        assert!(requirements[0].contains("host application"));
        assert!(requirements[1].contains(DEFAULT_PROCESS_NAME));
    }

    assert!(error_messages(DetectionMode::Legacy).requirements[2].contains("wmic"));
    assert!(error_messages(DetectionMode::Structured).requirements[2].contains("PowerShell"));
}
