//! Utilities for setting up throwaway databases in integration tests and local tooling.
pub mod prepare_env;
