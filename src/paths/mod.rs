//! Pure path helpers plus globbing.

mod expand;
mod glob;
mod join;
mod names;

pub use self::expand::{expand, expand_all};
pub use self::glob::{aglob_in, bglob_in, expand_word, glob_paths, has_magic};
pub use self::join::{pjoin, pjoin_dir};
pub use self::names::{basename, root_files, stem};
