pub mod codec;
pub mod files;

pub use codec::{load, save, CodecError};
pub use files::{atomic_write, ensure_data_dir, get_data_dir, init_local_dir, read_file, tasks_file};
