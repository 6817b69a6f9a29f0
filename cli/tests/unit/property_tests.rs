//! Property-based tests for worker-name generation.

use proptest::prelude::*;
use stoker_cli::domain::worker::generate_worker_name;
use stoker_common::validate_worker_name;

proptest! {
    /// Whatever the framework identifier looks like, the generated worker
    /// name must be a valid application name.
    #[test]
    fn generated_names_always_validate(fw in "[a-zA-Z0-9._-]{0,40}") {
        let name = generate_worker_name(&fw);
        prop_assert!(
            validate_worker_name(&name).is_ok(),
            "framework {fw:?} produced invalid name {name:?}"
        );
    }

    /// The random suffix keeps names unique even for identical frameworks.
    #[test]
    fn generated_names_carry_a_hex_suffix(fw in "[a-z][a-z0-9-]{0,20}") {
        let name = generate_worker_name(&fw);
        let suffix = name.rsplit('-').next().unwrap_or("");
        prop_assert_eq!(suffix.len(), 8);
        prop_assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
