//! gphoto-typed: typed access to libgphoto2 cameras
//!
//! This library maps libgphoto2's integer return codes onto [`ResultCode`],
//! reports failures through a single [`Error`] type, and exposes camera
//! configuration widgets through kind-checked views such as [`MenuWidget`].
//! Widgets are reached through the [`WidgetHandle`] trait, implemented by the
//! libgphoto2 backend (feature `native`) and by an in-memory mock in tests.

pub mod error;
pub mod result_code;
pub mod traits;
pub mod tree;
pub mod version;
pub mod widget;

#[cfg(feature = "native")]
pub mod device;

#[cfg(test)]
pub mod mock;

pub use error::{check_response, Error, ErrorKind, Result};
pub use result_code::ResultCode;
pub use traits::{RangeLimits, WidgetHandle, WidgetType, WidgetValue};
pub use widget::{
    ChoicesWidget, ContainerWidget, DateWidget, MenuWidget, RadioWidget, RangeWidget, TextWidget,
    ToggleWidget, Widget, WidgetKind,
};

#[cfg(feature = "native")]
pub use device::{Camera, CameraConfig, NativeWidget};
