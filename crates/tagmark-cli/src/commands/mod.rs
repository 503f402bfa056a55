//! Command implementations.
//!
//! Each command returns the text to print so `main` owns stdout.

pub mod bookmarks;
pub mod classify;

pub use self::bookmarks::{
    execute_add, execute_delete, execute_expired, execute_get, execute_list, execute_update,
};
pub use self::classify::{collect_inputs, execute_classify};
