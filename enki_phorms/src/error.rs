// Error taxonomy for the transformation surface.
//
// Two local failure classes — a version name the configuration collaborator
// got wrong (caller-correctable) and a structurally invalid transformed
// record (fatal per-record) — plus a wrapper for construction errors
// bubbling up from the triangle core, so the full-run entry point can
// propagate with `?`.

use enki_triangle::error::TriangleError;
use std::fmt;

/// Fatal errors raised by the phorms surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhormsError {
    /// The requested mod-table version does not exist. The message lists
    /// the valid names so the caller can correct the configuration.
    UnknownVersion(String),
    /// A transformed record violated the structural contract (wrong row
    /// count or row width). Raised immediately, never coerced.
    BadStructure { record: usize, reason: String },
    /// A construction error from the triangle core.
    Triangle(TriangleError),
}

impl fmt::Display for PhormsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhormsError::UnknownVersion(name) => {
                write!(
                    f,
                    "unknown phorms mod table version '{name}'; available: {}",
                    crate::table::PhormsVersion::NAMES.join(", ")
                )
            }
            PhormsError::BadStructure { record, reason } => {
                write!(f, "record {record} produced an invalid structure: {reason}")
            }
            PhormsError::Triangle(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PhormsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PhormsError::Triangle(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TriangleError> for PhormsError {
    fn from(err: TriangleError) -> Self {
        PhormsError::Triangle(err)
    }
}
