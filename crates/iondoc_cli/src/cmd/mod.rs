/// Dump the parsed document tree.
pub mod dump;
/// Nearest message to a playback position.
pub mod frame;
/// Decode image topics to files.
pub mod images;
/// Summarize a recording.
pub mod info;
/// Extract the bot model or map payload.
pub mod model;
/// Tree printing helpers.
pub mod print;
/// List recorded topics.
pub mod topics;
/// Shared loading and JSON helpers.
pub mod util;
