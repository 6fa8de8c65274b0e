#[path = "integration/common.rs"]
mod common;

#[path = "integration/session_store.rs"]
mod session_store;

#[path = "integration/bootstrap_failure.rs"]
mod bootstrap_failure;
