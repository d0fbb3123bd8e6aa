//! Local device storage.

mod key_value;

pub use key_value::JsonKeyValueStore;
