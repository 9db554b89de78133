//! Recovery flow test suite
