//! libgphoto2 return codes as a typed enumeration.
//!
//! Every libgphoto2 call returns an `int`: zero or a positive count on
//! success, a negative code on failure. [`ResultCode`] names the codes the
//! library documents and keeps anything else as [`ResultCode::Unknown`]
//! instead of guessing a neighbouring variant.

use std::fmt;
use std::str::FromStr;

/// Declares the code table once and derives the enum, the conversions and
/// the descriptions from it.
macro_rules! result_codes {
    ($($(#[$meta:meta])* $name:ident = $code:literal => $desc:literal,)+) => {
        /// libgphoto2 return code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ResultCode {
            $($(#[$meta])* $name,)+
            /// A code outside the documented table, kept verbatim.
            Unknown(i32),
        }

        impl ResultCode {
            /// Every named code, in table order.
            pub const KNOWN: &'static [Self] = &[$(Self::$name,)+];

            /// Map a raw return value to its named variant.
            ///
            /// Values outside the table map to [`ResultCode::Unknown`].
            #[must_use]
            pub const fn from_raw(code: i32) -> Self {
                match code {
                    $($code => Self::$name,)+
                    other => Self::Unknown(other),
                }
            }

            /// The raw libgphoto2 value of this code.
            #[must_use]
            pub const fn as_raw(self) -> i32 {
                match self {
                    $(Self::$name => $code,)+
                    Self::Unknown(code) => code,
                }
            }

            /// Variant name, e.g. `"CameraBusy"`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)+
                    Self::Unknown(_) => "Unknown",
                }
            }

            /// Short English description of the failure.
            #[must_use]
            pub const fn description(self) -> &'static str {
                match self {
                    $(Self::$name => $desc,)+
                    Self::Unknown(_) => "Unknown error",
                }
            }
        }
    };
}

result_codes! {
    /// Everything is okay.
    Ok = 0 => "No error",

    // I/O library errors
    /// Generic error.
    Error = -1 => "Generic error",
    /// Bad parameters passed.
    BadParameters = -2 => "Bad parameters",
    /// Out of memory.
    NoMemory = -3 => "Out of memory",
    /// Error in the camera driver.
    Library = -4 => "Error in the camera driver",
    /// Unknown libgphoto2 port passed.
    UnknownPort = -5 => "Unknown port",
    /// Functionality not supported.
    NotSupported = -6 => "Unsupported operation",
    /// Generic I/O error.
    Io = -7 => "I/O problem",
    /// Buffer overflow of an internal structure.
    FixedLimitExceeded = -8 => "Fixed limit exceeded",
    /// Operation timed out.
    TimeOut = -10 => "Timeout reading from or writing to the port",
    /// Serial ports not supported.
    IoSupportedSerial = -20 => "Serial port not supported",
    /// USB ports not supported.
    IoSupportedUsb = -21 => "USB port not supported",
    /// Error initialising I/O.
    IoInit = -31 => "Error initializing the port",
    /// I/O during read.
    IoRead = -34 => "Error reading from the port",
    /// I/O during write.
    IoWrite = -35 => "Error writing to the port",
    /// I/O during update of settings.
    IoUpdate = -37 => "Error updating the port settings",
    /// Specified serial speed not possible.
    IoSerialSpeed = -41 => "Error setting the serial port speed",
    /// Error during USB clear halt.
    IoUsbClearHalt = -51 => "Error clearing a halt condition on the USB port",
    /// Error when trying to find the USB device.
    IoUsbFind = -52 => "Could not find the requested device on the USB port",
    /// Error when trying to claim the USB device.
    IoUsbClaim = -53 => "Could not claim the USB device",
    /// Error when trying to lock the device.
    IoLock = -60 => "Could not lock the device",
    /// Unspecified error when talking to HAL.
    Hal = -70 => "libhal error",

    // Camera library errors
    /// Corrupted data received.
    CorruptedData = -102 => "Corrupted data received",
    /// File already exists.
    FileExists = -103 => "File already exists",
    /// Specified camera model was not found.
    ModelNotFound = -105 => "Unknown model",
    /// Specified directory was not found.
    DirectoryNotFound = -107 => "Directory not found",
    /// Specified file was not found.
    FileNotFound = -108 => "File not found",
    /// Specified directory already exists.
    DirectoryExists = -109 => "Directory exists",
    /// The camera is already busy.
    CameraBusy = -110 => "Camera is busy",
    /// Path is not absolute.
    PathNotAbsolut = -111 => "Path not absolute",
    /// Cancellation successful.
    Cancel = -112 => "Cancelled",
    /// Unspecified camera error.
    CameraError = -113 => "Unspecified camera error",
    /// Unspecified failure of the operating system.
    OsFailure = -114 => "Unspecified failure of the operating system",
    /// Not enough space.
    NoSpace = -115 => "Not enough space",
}

impl ResultCode {
    /// Whether this is the success code.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Whether retrying the same call later may succeed.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(
            self,
            Self::CameraBusy | Self::TimeOut | Self::IoLock | Self::IoUsbClaim
        )
    }
}

impl From<i32> for ResultCode {
    fn from(code: i32) -> Self {
        Self::from_raw(code)
    }
}

impl From<ResultCode> for i32 {
    fn from(code: ResultCode) -> Self {
        code.as_raw()
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_raw())
    }
}

/// Error returned when a string names no result code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is neither a result code name nor an integer")]
pub struct ParseResultCodeError(String);

impl FromStr for ResultCode {
    type Err = ParseResultCodeError;

    /// Accepts a variant name (case-insensitive) or a decimal code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i32>() {
            return Ok(Self::from_raw(code));
        }
        Self::KNOWN
            .iter()
            .copied()
            .find(|code| code.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseResultCodeError(s.to_owned()))
    }
}
