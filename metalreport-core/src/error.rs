//! Fatal load errors. Everything past loading degrades silently instead of
//! failing, so this taxonomy is the complete set of ways a run can abort.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Workbook missing or unreadable.
    #[error("cannot open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Workbook opened but contains no worksheets.
    #[error("workbook {} has no worksheets", path.display())]
    NoSheets { path: PathBuf },

    /// The requested worksheet does not exist.
    #[error("worksheet '{sheet}' not found in {}", path.display())]
    SheetNotFound { sheet: String, path: PathBuf },

    /// The worksheet exists but its cells could not be read.
    #[error("cannot read worksheet '{sheet}' in {}: {source}", path.display())]
    Read {
        sheet: String,
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// No row is available to serve as the header.
    #[error("no header row in worksheet '{sheet}' of {}", path.display())]
    NoHeader { sheet: String, path: PathBuf },
}
