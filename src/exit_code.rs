//! Process exit codes.

use crate::error::{ErrorKind, ZoinksError};

/// Exit codes the `zoinks` binary may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Program completed normally.
    Success = 0,
    /// The user interrupted the program's execution.
    UserInterrupt = 1,
    /// A bad or missing value for an option or argument.
    BadArg = 2,
    /// A problem with a file or directory.
    FileError = 3,
    /// A problem communicating with Zotero, including missing records.
    ZoteroError = 4,
    /// Any other fatal error.
    Exception = 5,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<&ZoinksError> for ExitCode {
    fn from(err: &ZoinksError) -> Self {
        match err.kind() {
            ErrorKind::InvalidIdentifier | ErrorKind::BadArgument => Self::BadArg,
            ErrorKind::File => Self::FileError,
            ErrorKind::RecordNotFound | ErrorKind::ServiceError => Self::ZoteroError,
            ErrorKind::Other => Self::Exception,
        }
    }
}
