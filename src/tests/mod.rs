// Test modules for prompt-enhancer crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities
pub mod helpers;

pub mod shell;

// NOTE: Dispatcher HTTP behavior is covered by integration tests
// (tests/dispatch_integration_tests.rs) since it needs a mock HTTP server.
