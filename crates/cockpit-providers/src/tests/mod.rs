//! Internal tests for provider implementations
