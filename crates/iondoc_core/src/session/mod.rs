mod error;
mod file;
mod image;
mod payload;
mod pool;
mod state;
mod timeline;

/// Error and result aliases.
pub use error::{Result, SessionError};
/// Typed view over the conventional recording layout.
pub use file::{BotModel, MapData, Message, Metadata, SessionFile, SessionInfo, Topic};
/// Image payload decoding.
pub use image::{ImageEncoding, decode_byte_escape, decode_image_payload, decode_image_text};
/// Payload decompression and model extraction.
pub use payload::{Codec, GZIP_MAGIC, ZSTD_MAGIC, decompress_payload, extract_obj_model, looks_like_obj};
/// Decode worker pool.
pub use pool::{DecodePool, PoolOptions, TaskHandle};
/// Caller-owned parse progress and the loading wrapper.
pub use state::{ParseState, load_session};
/// Timestamp ordering and playback lookup.
pub use timeline::{Timeline, elapsed_millis, playback_target_millis, timestamp_millis};
