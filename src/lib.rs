//! Workspace root package; exists only to host workspace-level tooling.
