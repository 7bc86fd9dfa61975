//! Typed views over configuration widgets.
//!
//! A [`Widget`] pairs a borrowed handle with the kind the handle declared
//! when the widget was wrapped. Kind-specific accessors live on views
//! ([`MenuWidget`], [`RangeWidget`], ...) whose constructors check that tag,
//! so a menu can never be read as a range or a text field as a toggle.

use std::ops::Deref;

use crate::error::{Error, Result};
use crate::traits::{RangeLimits, WidgetHandle, WidgetType, WidgetValue};

/// A widget handle tagged with its declared kind.
#[derive(Debug)]
pub struct Widget<H: WidgetHandle> {
    handle: H,
    kind: WidgetType,
}

impl<H: WidgetHandle> Widget<H> {
    /// Wrap a handle, reading its declared type.
    pub fn new(handle: H) -> Result<Self> {
        let kind = handle.widget_type()?;
        Ok(Self { handle, kind })
    }

    /// Declared kind.
    pub const fn kind(&self) -> WidgetType {
        self.kind
    }

    /// The underlying handle.
    pub const fn handle(&self) -> &H {
        &self.handle
    }

    /// Internal name.
    pub fn name(&self) -> Result<String> {
        self.handle.name()
    }

    /// Human-readable label.
    pub fn label(&self) -> Result<String> {
        self.handle.label()
    }

    /// Whether the camera refuses changes to this widget.
    pub fn is_readonly(&self) -> Result<bool> {
        self.handle.is_readonly()
    }

    /// Current value in its raw representation.
    pub fn value(&self) -> Result<WidgetValue> {
        self.handle.value()
    }

    /// Split into the view matching the declared kind.
    pub fn into_kind(self) -> WidgetKind<H> {
        match self.kind {
            WidgetType::Window => WidgetKind::Window(ContainerWidget { widget: self }),
            WidgetType::Section => WidgetKind::Section(ContainerWidget { widget: self }),
            WidgetType::Text => WidgetKind::Text(TextWidget { widget: self }),
            WidgetType::Range => WidgetKind::Range(RangeWidget { widget: self }),
            WidgetType::Toggle => WidgetKind::Toggle(ToggleWidget { widget: self }),
            WidgetType::Radio => WidgetKind::Radio(RadioWidget {
                choices: ChoicesWidget { widget: self },
            }),
            WidgetType::Menu => WidgetKind::Menu(MenuWidget {
                choices: ChoicesWidget { widget: self },
            }),
            WidgetType::Button => WidgetKind::Button(self),
            WidgetType::Date => WidgetKind::Date(DateWidget { widget: self }),
        }
    }

    fn require(self, accepted: &[WidgetType], message: &str) -> Result<Self> {
        if accepted.contains(&self.kind) {
            Ok(self)
        } else {
            Err(Error::InvalidWidgetType(message.to_owned()))
        }
    }
}

/// A widget split by kind, each variant holding its typed view.
#[derive(Debug)]
pub enum WidgetKind<H: WidgetHandle> {
    /// Top-level window.
    Window(ContainerWidget<H>),
    /// Section.
    Section(ContainerWidget<H>),
    /// Text field.
    Text(TextWidget<H>),
    /// Bounded float.
    Range(RangeWidget<H>),
    /// On/off switch.
    Toggle(ToggleWidget<H>),
    /// Radio group.
    Radio(RadioWidget<H>),
    /// Drop-down menu.
    Menu(MenuWidget<H>),
    /// Button; carries no value.
    Button(Widget<H>),
    /// Date and time.
    Date(DateWidget<H>),
}

fn expect_text(value: WidgetValue) -> Result<String> {
    match value {
        WidgetValue::Text(text) => Ok(text),
        other => Err(Error::Helper(format!("expected a text value, got {other:?}"))),
    }
}

fn expect_float(value: WidgetValue) -> Result<f32> {
    match value {
        WidgetValue::Float(value) => Ok(value),
        other => Err(Error::Helper(format!("expected a float value, got {other:?}"))),
    }
}

fn expect_int(value: WidgetValue) -> Result<i32> {
    match value {
        WidgetValue::Int(value) => Ok(value),
        other => Err(Error::Helper(format!("expected an integer value, got {other:?}"))),
    }
}

/// Widget offering a fixed set of string choices (radio or menu).
#[derive(Debug)]
pub struct ChoicesWidget<H: WidgetHandle> {
    widget: Widget<H>,
}

impl<H: WidgetHandle> ChoicesWidget<H> {
    /// View `widget` as a choices widget.
    pub fn new(widget: Widget<H>) -> Result<Self> {
        let widget = widget.require(
            &[WidgetType::Radio, WidgetType::Menu],
            "The widget type must be a Radio or Menu Widget",
        )?;
        Ok(Self { widget })
    }

    /// The tagged widget.
    pub const fn widget(&self) -> &Widget<H> {
        &self.widget
    }

    /// Release the view.
    pub fn into_widget(self) -> Widget<H> {
        self.widget
    }

    /// Number of choices.
    pub fn choice_count(&self) -> Result<usize> {
        self.widget.handle.choice_count()
    }

    /// Choice at `index`.
    pub fn choice(&self, index: usize) -> Result<String> {
        let count = self.choice_count()?;
        if index >= count {
            return Err(Error::IndexOutOfRange(format!(
                "choice index {index} is out of range, widget has {count} choices"
            )));
        }
        self.widget.handle.choice(index)
    }

    /// All choices in order.
    pub fn choices(&self) -> Result<Vec<String>> {
        (0..self.choice_count()?)
            .map(|index| self.widget.handle.choice(index))
            .collect()
    }

    /// Currently selected choice.
    pub fn value(&self) -> Result<String> {
        expect_text(self.widget.handle.value()?)
    }

    /// Index of the current value among the choices, if it is one of them.
    pub fn selected_index(&self) -> Result<Option<usize>> {
        let value = self.value()?;
        Ok(self.choices()?.iter().position(|choice| *choice == value))
    }

    /// Select `value`, which must be one of the choices.
    pub fn set_value(&self, value: &str) -> Result<()> {
        if !self.choices()?.iter().any(|choice| choice == value) {
            return Err(Error::ValueOutOfLimits(format!(
                "'{value}' is not one of the widget's choices"
            )));
        }
        self.widget
            .handle
            .set_value(&WidgetValue::Text(value.to_owned()))
    }

    /// Select the choice at `index`.
    pub fn set_index(&self, index: usize) -> Result<()> {
        let choice = self.choice(index)?;
        self.widget.handle.set_value(&WidgetValue::Text(choice))
    }
}

/// Menu widget: a choices widget whose declared type is `Menu`.
#[derive(Debug)]
pub struct MenuWidget<H: WidgetHandle> {
    choices: ChoicesWidget<H>,
}

impl<H: WidgetHandle> MenuWidget<H> {
    /// View `widget` as a menu.
    pub fn new(widget: Widget<H>) -> Result<Self> {
        let widget = widget.require(&[WidgetType::Menu], "The widget type must be a Menu Widget")?;
        Ok(Self {
            choices: ChoicesWidget { widget },
        })
    }
}

impl<H: WidgetHandle> Deref for MenuWidget<H> {
    type Target = ChoicesWidget<H>;

    fn deref(&self) -> &Self::Target {
        &self.choices
    }
}

impl<H: WidgetHandle> From<MenuWidget<H>> for ChoicesWidget<H> {
    fn from(menu: MenuWidget<H>) -> Self {
        menu.choices
    }
}

/// Radio widget: a choices widget whose declared type is `Radio`.
#[derive(Debug)]
pub struct RadioWidget<H: WidgetHandle> {
    choices: ChoicesWidget<H>,
}

impl<H: WidgetHandle> RadioWidget<H> {
    /// View `widget` as a radio group.
    pub fn new(widget: Widget<H>) -> Result<Self> {
        let widget =
            widget.require(&[WidgetType::Radio], "The widget type must be a Radio Widget")?;
        Ok(Self {
            choices: ChoicesWidget { widget },
        })
    }
}

impl<H: WidgetHandle> Deref for RadioWidget<H> {
    type Target = ChoicesWidget<H>;

    fn deref(&self) -> &Self::Target {
        &self.choices
    }
}

impl<H: WidgetHandle> From<RadioWidget<H>> for ChoicesWidget<H> {
    fn from(radio: RadioWidget<H>) -> Self {
        radio.choices
    }
}

/// Range widget: a float bounded by [`RangeLimits`].
#[derive(Debug)]
pub struct RangeWidget<H: WidgetHandle> {
    widget: Widget<H>,
}

impl<H: WidgetHandle> RangeWidget<H> {
    /// View `widget` as a range.
    pub fn new(widget: Widget<H>) -> Result<Self> {
        let widget =
            widget.require(&[WidgetType::Range], "The widget type must be a Range Widget")?;
        Ok(Self { widget })
    }

    /// The tagged widget.
    pub const fn widget(&self) -> &Widget<H> {
        &self.widget
    }

    /// Accepted limits.
    pub fn limits(&self) -> Result<RangeLimits> {
        self.widget.handle.range()
    }

    /// Current value.
    pub fn value(&self) -> Result<f32> {
        expect_float(self.widget.handle.value()?)
    }

    /// Set the value, which must lie within the limits.
    pub fn set_value(&self, value: f32) -> Result<()> {
        let limits = self.limits()?;
        if !limits.contains(value) {
            return Err(Error::ValueOutOfLimits(format!(
                "{value} is outside the range {}..={}",
                limits.min, limits.max
            )));
        }
        self.widget.handle.set_value(&WidgetValue::Float(value))
    }
}

/// Text widget.
#[derive(Debug)]
pub struct TextWidget<H: WidgetHandle> {
    widget: Widget<H>,
}

impl<H: WidgetHandle> TextWidget<H> {
    /// View `widget` as a text field.
    pub fn new(widget: Widget<H>) -> Result<Self> {
        let widget =
            widget.require(&[WidgetType::Text], "The widget type must be a Text Widget")?;
        Ok(Self { widget })
    }

    /// The tagged widget.
    pub const fn widget(&self) -> &Widget<H> {
        &self.widget
    }

    /// Current text.
    pub fn value(&self) -> Result<String> {
        expect_text(self.widget.handle.value()?)
    }

    /// Replace the text.
    pub fn set_value(&self, value: &str) -> Result<()> {
        self.widget
            .handle
            .set_value(&WidgetValue::Text(value.to_owned()))
    }
}

/// Toggle widget.
#[derive(Debug)]
pub struct ToggleWidget<H: WidgetHandle> {
    widget: Widget<H>,
}

impl<H: WidgetHandle> ToggleWidget<H> {
    /// View `widget` as a toggle.
    pub fn new(widget: Widget<H>) -> Result<Self> {
        let widget =
            widget.require(&[WidgetType::Toggle], "The widget type must be a Toggle Widget")?;
        Ok(Self { widget })
    }

    /// The tagged widget.
    pub const fn widget(&self) -> &Widget<H> {
        &self.widget
    }

    /// Whether the toggle is on.
    pub fn value(&self) -> Result<bool> {
        Ok(expect_int(self.widget.handle.value()?)? != 0)
    }

    /// Switch the toggle.
    pub fn set_value(&self, on: bool) -> Result<()> {
        self.widget
            .handle
            .set_value(&WidgetValue::Int(i32::from(on)))
    }
}

/// Date widget, in seconds since the Unix epoch.
#[derive(Debug)]
pub struct DateWidget<H: WidgetHandle> {
    widget: Widget<H>,
}

impl<H: WidgetHandle> DateWidget<H> {
    /// View `widget` as a date.
    pub fn new(widget: Widget<H>) -> Result<Self> {
        let widget =
            widget.require(&[WidgetType::Date], "The widget type must be a Date Widget")?;
        Ok(Self { widget })
    }

    /// The tagged widget.
    pub const fn widget(&self) -> &Widget<H> {
        &self.widget
    }

    /// Current timestamp.
    pub fn value(&self) -> Result<i32> {
        expect_int(self.widget.handle.value()?)
    }

    /// Replace the timestamp.
    pub fn set_value(&self, seconds: i32) -> Result<()> {
        self.widget.handle.set_value(&WidgetValue::Int(seconds))
    }
}

/// Window or section widget holding children.
#[derive(Debug)]
pub struct ContainerWidget<H: WidgetHandle> {
    widget: Widget<H>,
}

impl<H: WidgetHandle> ContainerWidget<H> {
    /// View `widget` as a container.
    pub fn new(widget: Widget<H>) -> Result<Self> {
        let widget = widget.require(
            &[WidgetType::Window, WidgetType::Section],
            "The widget type must be a Window or Section Widget",
        )?;
        Ok(Self { widget })
    }

    /// The tagged widget.
    pub const fn widget(&self) -> &Widget<H> {
        &self.widget
    }

    /// Number of direct children.
    pub fn child_count(&self) -> Result<usize> {
        self.widget.handle.child_count()
    }

    /// Direct child at `index`.
    pub fn child(&self, index: usize) -> Result<Widget<H::Child<'_>>> {
        let count = self.child_count()?;
        if index >= count {
            return Err(Error::IndexOutOfRange(format!(
                "child index {index} is out of range, widget has {count} children"
            )));
        }
        Widget::new(self.widget.handle.child(index)?)
    }

    /// All direct children in order.
    pub fn children(&self) -> Result<Vec<Widget<H::Child<'_>>>> {
        (0..self.child_count()?)
            .map(|index| Widget::new(self.widget.handle.child(index)?))
            .collect()
    }

    /// Descendant named `name`, searched recursively.
    pub fn child_by_name(&self, name: &str) -> Result<Widget<H::Child<'_>>> {
        Widget::new(self.widget.handle.child_by_name(name)?)
    }
}
