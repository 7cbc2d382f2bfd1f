//! CSV reading utilities.

mod reader;

pub use reader::{
    check_file_size, check_file_size_with_limit, read_csv_bytes, read_csv_path,
    validate_dataframe_shape,
};
