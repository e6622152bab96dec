//! Public library API for decoding Ion binary robot-session recordings.

/// Ion binary cursor, value tree, and recursive document parser.
pub mod ion;
/// Session recording view, payload helpers, and decode offloading.
pub mod session;
