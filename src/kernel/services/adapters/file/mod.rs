//! Local filesystem adapter.

pub mod codec;
pub mod local;
pub mod sniff;

pub use codec::{decode_text, encode_text};
pub use local::LocalFileProvider;
pub use sniff::sniff_mime;
