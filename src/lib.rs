//! Workspace root package. It carries no code and exists so `rusty-hook`
//! can install the pre-commit hook configured in `Cargo.toml`.
