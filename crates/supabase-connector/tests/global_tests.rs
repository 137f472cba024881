//! Tests for the process-wide connector.
//!
//! Kept in their own test binary because they touch process environment
//! variables and the global slot.

use std::sync::Arc;

use mock_table::MemoryTransport;
use supabase_connector::{ConnectorConfig, ConnectorError, SupabaseConnector};

#[test]
fn test_global_lifecycle() {
    // Scenario 1: no credentials, initialization fails and is not cached
    std::env::remove_var("SUPABASE_URL");
    std::env::remove_var("SUPABASE_ANON_KEY");
    let err = supabase_connector::global().unwrap_err();
    assert!(matches!(err, ConnectorError::Configuration(_)));

    // Scenario 2: credentials appear, initialization succeeds
    std::env::set_var("SUPABASE_URL", "https://env.supabase.co");
    std::env::set_var("SUPABASE_ANON_KEY", "env-key");
    let first = supabase_connector::global().unwrap();
    assert_eq!(first.config().url, "https://env.supabase.co");

    // Scenario 3: later calls share the same instance, even if the env changes
    std::env::set_var("SUPABASE_URL", "https://other.supabase.co");
    let second = supabase_connector::global().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // Scenario 4: concurrent callers all see one instance
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| supabase_connector::global().unwrap()))
        .collect();
    for handle in handles {
        assert!(Arc::ptr_eq(&first, &handle.join().unwrap()));
    }

    // Scenario 5: an explicit connector replaces the global one
    let replacement = SupabaseConnector::with_transport(
        ConnectorConfig::new("https://test.supabase.co", "test-key"),
        Arc::new(MemoryTransport::new()),
    )
    .unwrap();
    let installed = supabase_connector::set_global(replacement);
    let current = supabase_connector::global().unwrap();
    assert!(Arc::ptr_eq(&installed, &current));
    assert_eq!(current.transport().name(), "MemoryTransport");

    std::env::remove_var("SUPABASE_URL");
    std::env::remove_var("SUPABASE_ANON_KEY");
}
