//! Shared helpers for tests. Compiled only under `cfg(test)`.
