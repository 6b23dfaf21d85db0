//! Theme model shared by checks and the CLI.
//!
//! - `root`: project root discovery (`.git` / `.theme-check.yml` markers)
//! - `path`: separator normalization
//! - `snapshot`: immutable in-memory view of a theme's files
//! - `locale`: locale file naming, default locale context and its cache
//! - `translation`: classified translation trees

pub mod locale;
pub mod path;
pub mod root;
pub mod snapshot;
pub mod translation;

pub use locale::{LocaleContext, LocaleContextCache, LocaleFile, LocaleFileKind};
pub use root::{file_exists, find_root, find_root_uri};
pub use snapshot::ProjectSnapshot;
pub use translation::TranslationNode;
