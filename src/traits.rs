//! Core traits and types for the libgphoto2 widget abstraction.

use std::fmt;

use crate::error::{Error, Result};

/// Kind of a configuration widget, as declared by libgphoto2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetType {
    /// Top-level configuration window.
    Window,
    /// Section grouping other widgets.
    Section,
    /// Free text.
    Text,
    /// Floating point value within limits.
    Range,
    /// On/off switch.
    Toggle,
    /// One of a fixed set of strings, shown as radio buttons.
    Radio,
    /// One of a fixed set of strings, shown as a drop-down menu.
    Menu,
    /// Action trigger without a value.
    Button,
    /// Date and time, in seconds since the epoch.
    Date,
}

impl WidgetType {
    /// Convert a raw `CameraWidgetType` value.
    pub fn from_raw(raw: i32) -> Result<Self> {
        Ok(match raw {
            0 => Self::Window,
            1 => Self::Section,
            2 => Self::Text,
            3 => Self::Range,
            4 => Self::Toggle,
            5 => Self::Radio,
            6 => Self::Menu,
            7 => Self::Button,
            8 => Self::Date,
            other => {
                return Err(Error::Helper(format!("unknown widget type value {other}")));
            }
        })
    }

    /// The raw `CameraWidgetType` value.
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Window => 0,
            Self::Section => 1,
            Self::Text => 2,
            Self::Range => 3,
            Self::Toggle => 4,
            Self::Radio => 5,
            Self::Menu => 6,
            Self::Button => 7,
            Self::Date => 8,
        }
    }

    /// Whether widgets of this kind hold children.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Window | Self::Section)
    }

    /// Whether widgets of this kind offer a fixed set of string choices.
    #[must_use]
    pub const fn has_choices(self) -> bool {
        matches!(self, Self::Radio | Self::Menu)
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Window => "window",
            Self::Section => "section",
            Self::Text => "text",
            Self::Range => "range",
            Self::Toggle => "toggle",
            Self::Radio => "radio",
            Self::Menu => "menu",
            Self::Button => "button",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

/// Value of a widget, in the representation libgphoto2 uses for its kind.
///
/// Text, radio and menu widgets hold text; range widgets a float; toggle and
/// date widgets an integer; containers and buttons hold nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetValue {
    /// Text, radio and menu value.
    Text(String),
    /// Range value.
    Float(f32),
    /// Toggle or date value.
    Int(i32),
    /// No value.
    None,
}

impl WidgetValue {
    /// Whether this value has the representation `kind` expects.
    #[must_use]
    pub const fn fits(&self, kind: WidgetType) -> bool {
        match self {
            Self::Text(_) => matches!(kind, WidgetType::Text | WidgetType::Radio | WidgetType::Menu),
            Self::Float(_) => matches!(kind, WidgetType::Range),
            Self::Int(_) => matches!(kind, WidgetType::Toggle | WidgetType::Date),
            Self::None => matches!(
                kind,
                WidgetType::Window | WidgetType::Section | WidgetType::Button
            ),
        }
    }
}

impl fmt::Display for WidgetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Float(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::None => Ok(()),
        }
    }
}

/// Limits of a range widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeLimits {
    /// Smallest accepted value.
    pub min: f32,
    /// Largest accepted value.
    pub max: f32,
    /// Step between accepted values.
    pub step: f32,
}

impl RangeLimits {
    /// Whether `value` lies within `min..=max`.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Abstraction over a libgphoto2 configuration widget handle.
///
/// Implementors are borrowed, non-owning views of a native node: the tree
/// belongs to whoever fetched it, and children handed out by
/// [`WidgetHandle::child`] borrow from the handle that produced them.
pub trait WidgetHandle {
    /// The handle type of this widget's children.
    type Child<'a>: WidgetHandle
    where
        Self: 'a;

    /// Declared widget type.
    fn widget_type(&self) -> Result<WidgetType>;

    /// Internal name, e.g. `"iso"`.
    fn name(&self) -> Result<String>;

    /// Human-readable label, e.g. `"ISO Speed"`.
    fn label(&self) -> Result<String>;

    /// Whether the camera refuses changes to this widget.
    fn is_readonly(&self) -> Result<bool>;

    /// Current value.
    fn value(&self) -> Result<WidgetValue>;

    /// Replace the current value. The change reaches the camera only when the
    /// whole tree is written back.
    fn set_value(&self, value: &WidgetValue) -> Result<()>;

    /// Number of choices of a radio or menu widget.
    fn choice_count(&self) -> Result<usize>;

    /// Choice at `index`.
    fn choice(&self, index: usize) -> Result<String>;

    /// Limits of a range widget.
    fn range(&self) -> Result<RangeLimits>;

    /// Number of direct children.
    fn child_count(&self) -> Result<usize>;

    /// Direct child at `index`.
    fn child(&self, index: usize) -> Result<Self::Child<'_>>;

    /// Descendant with the given name, searched recursively.
    fn child_by_name(&self, name: &str) -> Result<Self::Child<'_>>;
}

impl<T: WidgetHandle + ?Sized> WidgetHandle for &T {
    type Child<'a> = T::Child<'a>
    where
        Self: 'a;

    fn widget_type(&self) -> Result<WidgetType> {
        (**self).widget_type()
    }

    fn name(&self) -> Result<String> {
        (**self).name()
    }

    fn label(&self) -> Result<String> {
        (**self).label()
    }

    fn is_readonly(&self) -> Result<bool> {
        (**self).is_readonly()
    }

    fn value(&self) -> Result<WidgetValue> {
        (**self).value()
    }

    fn set_value(&self, value: &WidgetValue) -> Result<()> {
        (**self).set_value(value)
    }

    fn choice_count(&self) -> Result<usize> {
        (**self).choice_count()
    }

    fn choice(&self, index: usize) -> Result<String> {
        (**self).choice(index)
    }

    fn range(&self) -> Result<RangeLimits> {
        (**self).range()
    }

    fn child_count(&self) -> Result<usize> {
        (**self).child_count()
    }

    fn child(&self, index: usize) -> Result<Self::Child<'_>> {
        (**self).child(index)
    }

    fn child_by_name(&self, name: &str) -> Result<Self::Child<'_>> {
        (**self).child_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_type_raw_round_trip() {
        for raw in 0..=8 {
            let kind = WidgetType::from_raw(raw).expect("raw value in table");
            assert_eq!(kind.as_raw(), raw);
        }
    }

    #[test]
    fn test_widget_type_unknown_raw() {
        let err = WidgetType::from_raw(9).expect_err("9 is not a widget type");
        assert_eq!(err.message(), "unknown widget type value 9");
    }

    #[test]
    fn test_value_fits_kind() {
        assert!(WidgetValue::Text("ISO 100".to_owned()).fits(WidgetType::Menu));
        assert!(WidgetValue::Float(1.5).fits(WidgetType::Range));
        assert!(WidgetValue::Int(1).fits(WidgetType::Toggle));
        assert!(WidgetValue::None.fits(WidgetType::Section));
        assert!(!WidgetValue::Float(1.5).fits(WidgetType::Text));
        assert!(!WidgetValue::Text(String::new()).fits(WidgetType::Date));
    }

    #[test]
    fn test_range_limits_contains() {
        let limits = RangeLimits {
            min: -3.0,
            max: 3.0,
            step: 0.5,
        };
        assert!(limits.contains(-3.0));
        assert!(limits.contains(3.0));
        assert!(!limits.contains(3.5));
    }
}
