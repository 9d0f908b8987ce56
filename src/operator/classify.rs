//! Error classification
//!
//! The control plane does not expose structured codes on every path, so errors are
//! classified by message markers. The markers live here and nowhere else.

use super::services::ServiceError;
use std::fmt;

/// Returned while another operation holds the resource lock upstream
pub const ERR_WAIT: &str = "Please wait and try again once it is done";

/// Returned when the addressed resource does not exist
pub const ERR_NOT_FOUND: &str = "notFound";

/// Classification of a mutation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The call succeeded
    None,
    /// Another operation is in flight for this resource
    Busy,
    /// The resource does not exist
    Absent,
    /// Anything else; surfaced without retry
    Fatal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorClass::None => "none",
            ErrorClass::Busy => "busy",
            ErrorClass::Absent => "absent",
            ErrorClass::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

/// Maps a control-plane error to an [`ErrorClass`]
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, err: Option<&ServiceError>) -> ErrorClass;
}

/// Classifier matching the [`ERR_WAIT`] and [`ERR_NOT_FOUND`] markers in error text
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerClassifier;

impl ErrorClassifier for MarkerClassifier {
    fn classify(&self, err: Option<&ServiceError>) -> ErrorClass {
        let Some(err) = err else {
            return ErrorClass::None;
        };

        let message = err.to_string();
        if message.contains(ERR_WAIT) {
            ErrorClass::Busy
        } else if message.contains(ERR_NOT_FOUND) {
            ErrorClass::Absent
        } else {
            ErrorClass::Fatal
        }
    }
}
