//! Error type shared by every fallible operation in the crate.

use thiserror::Error as ThisError;

use crate::result_code::ResultCode;

/// Failure of a wrapper operation.
///
/// [`Error::Call`] reports a native call that returned a negative code and is
/// the only kind that may be worth retrying. Every other kind is a
/// precondition violation detected locally and carries only its message.
/// `Display` prints the message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A libgphoto2 call returned a value below zero.
    #[error("{message}")]
    Call {
        /// Code returned by the failing call.
        code: ResultCode,
        /// Human-readable description of the failure.
        message: String,
    },

    /// The linked libgphoto2 is older than supported or unreadable.
    #[error("{0}")]
    InvalidLinkedVersion(String),

    /// Misuse of the camera wrapper itself.
    #[error("{0}")]
    CameraWrapper(String),

    /// A conversion helper received input it cannot represent.
    #[error("{0}")]
    Helper(String),

    /// No camera is attached or detected.
    #[error("{0}")]
    NoCameraFound(String),

    /// An argument failed validation.
    #[error("{0}")]
    Argument(String),

    /// A widget's declared type does not match the requested view.
    #[error("{0}")]
    InvalidWidgetType(String),

    /// A widget handle was null.
    #[error("{0}")]
    NullWidget(String),

    /// An index was past the end of a widget's children or choices.
    #[error("{0}")]
    IndexOutOfRange(String),

    /// A value was outside the range or choices a widget accepts.
    #[error("{0}")]
    ValueOutOfLimits(String),
}

/// Fieldless discriminant of [`Error`], for matching without borrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Call`].
    Call,
    /// See [`Error::InvalidLinkedVersion`].
    InvalidLinkedVersion,
    /// See [`Error::CameraWrapper`].
    CameraWrapper,
    /// See [`Error::Helper`].
    Helper,
    /// See [`Error::NoCameraFound`].
    NoCameraFound,
    /// See [`Error::Argument`].
    Argument,
    /// See [`Error::InvalidWidgetType`].
    InvalidWidgetType,
    /// See [`Error::NullWidget`].
    NullWidget,
    /// See [`Error::IndexOutOfRange`].
    IndexOutOfRange,
    /// See [`Error::ValueOutOfLimits`].
    ValueOutOfLimits,
}

impl Error {
    /// Build a [`Error::Call`] from a code and a message.
    pub fn call<C, M>(code: C, message: M) -> Self
    where
        C: Into<ResultCode>,
        M: Into<String>,
    {
        Self::Call {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The result code of a failed native call, `None` for local errors.
    #[must_use]
    pub const fn result_code(&self) -> Option<ResultCode> {
        match self {
            Self::Call { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The error message, exactly as constructed.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Call { message, .. }
            | Self::InvalidLinkedVersion(message)
            | Self::CameraWrapper(message)
            | Self::Helper(message)
            | Self::NoCameraFound(message)
            | Self::Argument(message)
            | Self::InvalidWidgetType(message)
            | Self::NullWidget(message)
            | Self::IndexOutOfRange(message)
            | Self::ValueOutOfLimits(message) => message,
        }
    }

    /// The kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Call { .. } => ErrorKind::Call,
            Self::InvalidLinkedVersion(_) => ErrorKind::InvalidLinkedVersion,
            Self::CameraWrapper(_) => ErrorKind::CameraWrapper,
            Self::Helper(_) => ErrorKind::Helper,
            Self::NoCameraFound(_) => ErrorKind::NoCameraFound,
            Self::Argument(_) => ErrorKind::Argument,
            Self::InvalidWidgetType(_) => ErrorKind::InvalidWidgetType,
            Self::NullWidget(_) => ErrorKind::NullWidget,
            Self::IndexOutOfRange(_) => ErrorKind::IndexOutOfRange,
            Self::ValueOutOfLimits(_) => ErrorKind::ValueOutOfLimits,
        }
    }

    /// Whether the failure came from the device and may clear on retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.result_code().is_some_and(ResultCode::is_transient)
    }
}

/// Result type for wrapper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Turn a libgphoto2 return value into a `Result`.
///
/// Non-negative values are passed through since several calls return a
/// count. Negative values become [`Error::Call`] naming `method`.
pub fn check_response(rc: i32, method: &str) -> Result<i32> {
    if rc >= 0 {
        return Ok(rc);
    }
    let code = ResultCode::from_raw(rc);
    log::debug!("{method} returned {code}");
    Err(Error::call(
        code,
        format!("{method} failed: {}", code.description()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_error_carries_code_and_message() {
        let err = Error::call(-110, "camera busy");
        assert_eq!(err.result_code(), Some(ResultCode::CameraBusy));
        assert_eq!(err.message(), "camera busy");
        assert_eq!(err.to_string(), "camera busy");
        assert_eq!(err.kind(), ErrorKind::Call);
        assert!(err.is_transient());
    }

    #[test]
    fn test_call_error_with_unknown_code() {
        let err = Error::call(-9, "odd failure");
        assert_eq!(err.result_code(), Some(ResultCode::Unknown(-9)));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_fatal_call_error_is_not_transient() {
        let err = Error::call(ResultCode::CorruptedData, "bad data");
        assert!(!err.is_transient());
    }

    #[test]
    fn test_message_only_kinds_keep_message_verbatim() {
        let msg = "  exact: message (unchanged)  ";
        let errors = [
            (Error::InvalidLinkedVersion(msg.to_owned()), ErrorKind::InvalidLinkedVersion),
            (Error::CameraWrapper(msg.to_owned()), ErrorKind::CameraWrapper),
            (Error::Helper(msg.to_owned()), ErrorKind::Helper),
            (Error::NoCameraFound(msg.to_owned()), ErrorKind::NoCameraFound),
            (Error::Argument(msg.to_owned()), ErrorKind::Argument),
            (Error::InvalidWidgetType(msg.to_owned()), ErrorKind::InvalidWidgetType),
            (Error::NullWidget(msg.to_owned()), ErrorKind::NullWidget),
            (Error::IndexOutOfRange(msg.to_owned()), ErrorKind::IndexOutOfRange),
            (Error::ValueOutOfLimits(msg.to_owned()), ErrorKind::ValueOutOfLimits),
        ];

        for (err, kind) in errors {
            assert_eq!(err.to_string(), msg);
            assert_eq!(err.message(), msg);
            assert_eq!(err.kind(), kind);
            assert_eq!(err.result_code(), None);
            assert!(!err.is_transient());
        }
    }

    #[test]
    fn test_check_response_passes_counts_through() {
        assert_eq!(check_response(0, "gp_camera_init"), Ok(0));
        assert_eq!(check_response(7, "gp_widget_count_children"), Ok(7));
    }

    #[test]
    fn test_check_response_wraps_failures() {
        let err = check_response(-53, "gp_camera_init").expect_err("negative code must fail");
        assert_eq!(err.result_code(), Some(ResultCode::IoUsbClaim));
        assert_eq!(
            err.message(),
            "gp_camera_init failed: Could not claim the USB device"
        );
    }

    #[test]
    fn test_errors_usable_as_std_error() {
        fn boxed(err: Error) -> Box<dyn std::error::Error> {
            Box::new(err)
        }
        assert_eq!(boxed(Error::Argument("bad".to_owned())).to_string(), "bad");
    }
}
