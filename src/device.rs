//! libgphoto2 backend using the `libgphoto2_sys` bindings.
//!
//! Every call goes through the `gp_call!` macro, which turns the return value into a
//! [`Result`] via [`check_response`]. Handles are raw pointers and therefore
//! neither `Send` nor `Sync`, matching libgphoto2's one-thread-per-camera
//! contract.

#![allow(unsafe_code)]

use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use libgphoto2_sys as gp;

use crate::error::{check_response, Error, Result};
use crate::result_code::ResultCode;
use crate::traits::{RangeLimits, WidgetHandle, WidgetType, WidgetValue};
use crate::version::{ensure_supported, LibraryVersion};

macro_rules! gp_call {
    ($func:ident($($arg:expr),* $(,)?)) => {
        check_response(unsafe { gp::$func($($arg),*) }, stringify!($func))
    };
}

/// Copy a C string owned by libgphoto2. Null reads as empty.
///
/// # Safety
///
/// `raw` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
unsafe fn owned_string(raw: *const c_char) -> String {
    if raw.is_null() {
        String::new()
    } else {
        CStr::from_ptr(raw).to_string_lossy().into_owned()
    }
}

fn to_c_int(index: usize, what: &str) -> Result<c_int> {
    c_int::try_from(index)
        .map_err(|_| Error::IndexOutOfRange(format!("{what} index {index} does not fit a C int")))
}

fn to_usize(count: c_int) -> usize {
    usize::try_from(count).unwrap_or_default()
}

/// Version string of the linked libgphoto2, e.g. `"2.5.31"`.
pub fn linked_version() -> Result<String> {
    let table = unsafe { gp::gp_library_version(gp::GPVersionVerbosity::GP_VERSION_SHORT) };
    if table.is_null() {
        return Err(Error::InvalidLinkedVersion(
            "gp_library_version returned no version".to_owned(),
        ));
    }
    // first entry of the short table is the version number
    let first = unsafe { *table };
    if first.is_null() {
        return Err(Error::InvalidLinkedVersion(
            "gp_library_version returned an empty table".to_owned(),
        ));
    }
    Ok(unsafe { owned_string(first) })
}

/// Check the linked libgphoto2 against the minimum supported version.
pub fn ensure_linked_version() -> Result<LibraryVersion> {
    ensure_supported(&linked_version()?)
}

/// A libgphoto2 context.
pub struct Context {
    ptr: NonNull<gp::GPContext>,
}

impl Context {
    /// Create a new context.
    pub fn new() -> Result<Self> {
        NonNull::new(unsafe { gp::gp_context_new() })
            .map(|ptr| Self { ptr })
            .ok_or_else(|| Error::CameraWrapper("gp_context_new returned null".to_owned()))
    }

    const fn as_ptr(&self) -> *mut gp::GPContext {
        self.ptr.as_ptr()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe { gp::gp_context_unref(self.ptr.as_ptr()) };
    }
}

/// An initialised camera.
pub struct Camera {
    ptr: NonNull<gp::Camera>,
    context: Context,
}

impl Camera {
    /// Open the first camera libgphoto2 detects.
    pub fn autodetect() -> Result<Self> {
        ensure_linked_version()?;
        let context = Context::new()?;

        let mut raw: *mut gp::Camera = ptr::null_mut();
        gp_call!(gp_camera_new(&mut raw))?;
        let ptr = NonNull::new(raw)
            .ok_or_else(|| Error::CameraWrapper("gp_camera_new returned null".to_owned()))?;
        let camera = Self { ptr, context };

        match gp_call!(gp_camera_init(camera.ptr.as_ptr(), camera.context.as_ptr())) {
            Ok(_) => {
                log::info!("camera initialised");
                Ok(camera)
            }
            Err(err) if err.result_code() == Some(ResultCode::ModelNotFound) => Err(
                Error::NoCameraFound("no camera was detected".to_owned()),
            ),
            Err(err) => Err(err),
        }
    }

    /// Fetch the camera's configuration tree.
    pub fn config(&self) -> Result<CameraConfig> {
        let mut root: *mut gp::CameraWidget = ptr::null_mut();
        gp_call!(gp_camera_get_config(
            self.ptr.as_ptr(),
            &mut root,
            self.context.as_ptr()
        ))?;
        NonNull::new(root)
            .map(|root| CameraConfig { root })
            .ok_or_else(|| Error::NullWidget("gp_camera_get_config returned no widget".to_owned()))
    }

    /// Write a configuration tree, with any values changed through its
    /// widgets, back to the camera.
    pub fn apply_config(&self, config: &CameraConfig) -> Result<()> {
        gp_call!(gp_camera_set_config(
            self.ptr.as_ptr(),
            config.root.as_ptr(),
            self.context.as_ptr()
        ))?;
        Ok(())
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        if let Err(err) = gp_call!(gp_camera_exit(self.ptr.as_ptr(), self.context.as_ptr())) {
            log::warn!("failed to close camera: {err}");
        }
        if let Err(err) = gp_call!(gp_camera_unref(self.ptr.as_ptr())) {
            log::warn!("failed to release camera: {err}");
        }
    }
}

/// Owned configuration tree, freed on drop.
pub struct CameraConfig {
    root: NonNull<gp::CameraWidget>,
}

impl CameraConfig {
    /// Borrow the root window.
    pub const fn root(&self) -> NativeWidget<'_> {
        NativeWidget {
            ptr: self.root,
            _tree: PhantomData,
        }
    }
}

impl Drop for CameraConfig {
    fn drop(&mut self) {
        if let Err(err) = gp_call!(gp_widget_free(self.root.as_ptr())) {
            log::warn!("failed to free configuration tree: {err}");
        }
    }
}

/// Borrowed handle to a node of a [`CameraConfig`] tree.
#[derive(Debug, Clone, Copy)]
pub struct NativeWidget<'a> {
    ptr: NonNull<gp::CameraWidget>,
    _tree: PhantomData<&'a gp::CameraWidget>,
}

impl NativeWidget<'_> {
    /// Wrap a raw widget pointer.
    ///
    /// # Safety
    ///
    /// `raw` must be null or point to a widget that outlives the returned
    /// handle.
    pub unsafe fn from_raw(raw: *mut gp::CameraWidget) -> Result<Self> {
        NonNull::new(raw)
            .map(|ptr| Self {
                ptr,
                _tree: PhantomData,
            })
            .ok_or_else(|| Error::NullWidget("widget handle is null".to_owned()))
    }

    fn read_text(&self) -> Result<String> {
        let mut raw: *const c_char = ptr::null();
        gp_call!(gp_widget_get_value(
            self.ptr.as_ptr(),
            ptr::from_mut(&mut raw).cast::<c_void>()
        ))?;
        Ok(unsafe { owned_string(raw) })
    }
}

impl WidgetHandle for NativeWidget<'_> {
    type Child<'b> = NativeWidget<'b>
    where
        Self: 'b;

    fn widget_type(&self) -> Result<WidgetType> {
        let mut raw = gp::CameraWidgetType::GP_WIDGET_WINDOW;
        gp_call!(gp_widget_get_type(self.ptr.as_ptr(), &mut raw))?;
        WidgetType::from_raw(raw as i32)
    }

    fn name(&self) -> Result<String> {
        let mut raw: *const c_char = ptr::null();
        gp_call!(gp_widget_get_name(self.ptr.as_ptr(), &mut raw))?;
        Ok(unsafe { owned_string(raw) })
    }

    fn label(&self) -> Result<String> {
        let mut raw: *const c_char = ptr::null();
        gp_call!(gp_widget_get_label(self.ptr.as_ptr(), &mut raw))?;
        Ok(unsafe { owned_string(raw) })
    }

    fn is_readonly(&self) -> Result<bool> {
        let mut readonly: c_int = 0;
        gp_call!(gp_widget_get_readonly(self.ptr.as_ptr(), &mut readonly))?;
        Ok(readonly != 0)
    }

    fn value(&self) -> Result<WidgetValue> {
        let widget = self.ptr.as_ptr();
        match self.widget_type()? {
            WidgetType::Text | WidgetType::Radio | WidgetType::Menu => {
                Ok(WidgetValue::Text(self.read_text()?))
            }
            WidgetType::Range => {
                let mut value: f32 = 0.0;
                gp_call!(gp_widget_get_value(
                    widget,
                    ptr::from_mut(&mut value).cast::<c_void>()
                ))?;
                Ok(WidgetValue::Float(value))
            }
            WidgetType::Toggle | WidgetType::Date => {
                let mut value: c_int = 0;
                gp_call!(gp_widget_get_value(
                    widget,
                    ptr::from_mut(&mut value).cast::<c_void>()
                ))?;
                Ok(WidgetValue::Int(value))
            }
            WidgetType::Window | WidgetType::Section | WidgetType::Button => Ok(WidgetValue::None),
        }
    }

    fn set_value(&self, value: &WidgetValue) -> Result<()> {
        let kind = self.widget_type()?;
        if !value.fits(kind) {
            return Err(Error::Argument(format!(
                "a {kind} widget cannot hold {value:?}"
            )));
        }

        let widget = self.ptr.as_ptr();
        match value {
            // text widgets take the string pointer itself, not a pointer to it
            WidgetValue::Text(text) => {
                let text = CString::new(text.as_str()).map_err(|_| {
                    Error::Argument("widget text must not contain NUL bytes".to_owned())
                })?;
                gp_call!(gp_widget_set_value(widget, text.as_ptr().cast::<c_void>()))?;
            }
            WidgetValue::Float(value) => {
                gp_call!(gp_widget_set_value(
                    widget,
                    ptr::from_ref(value).cast::<c_void>()
                ))?;
            }
            WidgetValue::Int(value) => {
                let value: c_int = *value;
                gp_call!(gp_widget_set_value(
                    widget,
                    ptr::from_ref(&value).cast::<c_void>()
                ))?;
            }
            WidgetValue::None => {
                return Err(Error::Argument(format!("a {kind} widget holds no value")));
            }
        }
        Ok(())
    }

    fn choice_count(&self) -> Result<usize> {
        gp_call!(gp_widget_count_choices(self.ptr.as_ptr())).map(to_usize)
    }

    fn choice(&self, index: usize) -> Result<String> {
        let index = to_c_int(index, "choice")?;
        let mut raw: *const c_char = ptr::null();
        gp_call!(gp_widget_get_choice(self.ptr.as_ptr(), index, &mut raw))?;
        Ok(unsafe { owned_string(raw) })
    }

    fn range(&self) -> Result<RangeLimits> {
        let (mut min, mut max, mut step) = (0.0_f32, 0.0_f32, 0.0_f32);
        gp_call!(gp_widget_get_range(
            self.ptr.as_ptr(),
            &mut min,
            &mut max,
            &mut step
        ))?;
        Ok(RangeLimits { min, max, step })
    }

    fn child_count(&self) -> Result<usize> {
        gp_call!(gp_widget_count_children(self.ptr.as_ptr())).map(to_usize)
    }

    fn child(&self, index: usize) -> Result<Self::Child<'_>> {
        let index = to_c_int(index, "child")?;
        let mut raw: *mut gp::CameraWidget = ptr::null_mut();
        gp_call!(gp_widget_get_child(self.ptr.as_ptr(), index, &mut raw))?;
        // children are owned by the tree this handle borrows from
        unsafe { NativeWidget::from_raw(raw) }
    }

    fn child_by_name(&self, name: &str) -> Result<Self::Child<'_>> {
        let name = CString::new(name)
            .map_err(|_| Error::Argument("widget names must not contain NUL bytes".to_owned()))?;
        let mut raw: *mut gp::CameraWidget = ptr::null_mut();
        gp_call!(gp_widget_get_child_by_name(
            self.ptr.as_ptr(),
            name.as_ptr(),
            &mut raw
        ))?;
        unsafe { NativeWidget::from_raw(raw) }
    }
}
