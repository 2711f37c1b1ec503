pub mod loader;

pub use loader::{load_from_file, most_common_length, playable, words_from_slice};
