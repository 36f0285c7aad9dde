use gym_registry::{
    Console, MemberDetails, MemberRegistry, RegistryConfig, RegistryError,
};
use std::io::Cursor;

#[test]
fn test_registry_scenario() {
    let mut registry = MemberRegistry::new();

    let alice = registry
        .add(MemberDetails::new("Alice", 30, "1234567890", "Gold"), "2024-03-26")
        .unwrap();
    let bob = registry
        .add(MemberDetails::new("Bob", 25, "0987654321", "Silver"), "2024-03-26")
        .unwrap();
    assert_eq!((alice, bob), (1, 2));

    registry.delete(1).unwrap();

    let listed = registry.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), 2);
    assert_eq!(listed[0].name(), "Bob");

    registry
        .update(2, MemberDetails::new("Bob Lee", 26, "0987654321", "Gold"))
        .unwrap();
    let bob = registry.find_by_id(2).unwrap();
    assert_eq!(bob.name(), "Bob Lee");
    assert_eq!(bob.age(), 26);
    assert_eq!(bob.membership_type(), "Gold");
    assert_eq!(bob.registration_date(), "2024-03-26");

    assert_eq!(
        registry.update(1, MemberDetails::new("Alice", 30, "1234567890", "Gold")),
        Err(RegistryError::NotFound(1))
    );
}

#[test]
fn test_console_scenario() {
    let script = [
        "1", "Alice", "30", "1234567890", "Gold",
        "1", "Bob", "25", "0987654321", "Silver",
        "4", "1",
        "3", "2", "Bob Lee", "26", "0987654321", "Gold",
        "2",
        "5",
    ]
    .join("\n");

    let config = RegistryConfig {
        registration_date: "2025-06-01".to_string(),
        ..RegistryConfig::default()
    };
    let mut console = Console::new(Cursor::new(script.into_bytes()), Vec::new(), config);
    console.run().unwrap();

    let (registry, output) = console.into_parts();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Member added successfully with ID: 1"));
    assert!(output.contains("Member added successfully with ID: 2"));
    assert!(output.contains("Member deleted successfully."));
    assert!(output.contains("Member details updated successfully."));
    assert!(output.contains("Bob Lee"));
    assert!(output.trim_end().ends_with("Exiting system..."));

    assert_eq!(registry.len(), 1);
    let bob = registry.find_by_id(2).unwrap();
    assert_eq!(bob.name(), "Bob Lee");
    assert_eq!(bob.registration_date(), "2025-06-01");
}
