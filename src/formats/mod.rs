pub mod gif;
pub mod output;

pub use gif::{encode_gif, stored_delay_ms, write_gif};
pub use output::{
    ensure_output_dir, output_file_name, output_path, Clock, NamingScheme, SystemClock,
    DEFAULT_OUTPUT_DIR,
};
