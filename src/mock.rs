//! Mock widget tree for testing without a camera.

use std::cell::RefCell;

use crate::error::{Error, Result};
use crate::result_code::ResultCode;
use crate::traits::{RangeLimits, WidgetHandle, WidgetType, WidgetValue};

/// In-memory widget behaving like a libgphoto2 `CameraWidget`.
///
/// Failures mirror what libgphoto2 returns for the same misuse, so code
/// tested against the mock sees the same [`ResultCode`]s it would see on a
/// real camera.
#[derive(Debug)]
pub struct MockWidget {
    kind: WidgetType,
    name: String,
    label: String,
    readonly: bool,
    value: RefCell<WidgetValue>,
    choices: Vec<String>,
    range: Option<RangeLimits>,
    children: Vec<MockWidget>,
}

impl MockWidget {
    /// Create a widget of any kind with an empty value.
    #[must_use]
    pub fn new(kind: WidgetType, name: &str, label: &str) -> Self {
        let value = match kind {
            WidgetType::Text | WidgetType::Radio | WidgetType::Menu => {
                WidgetValue::Text(String::new())
            }
            WidgetType::Range => WidgetValue::Float(0.0),
            WidgetType::Toggle | WidgetType::Date => WidgetValue::Int(0),
            WidgetType::Window | WidgetType::Section | WidgetType::Button => WidgetValue::None,
        };
        Self {
            kind,
            name: name.to_owned(),
            label: label.to_owned(),
            readonly: false,
            value: RefCell::new(value),
            choices: Vec::new(),
            range: None,
            children: Vec::new(),
        }
    }

    /// Top-level window.
    #[must_use]
    pub fn window(name: &str, label: &str) -> Self {
        Self::new(WidgetType::Window, name, label)
    }

    /// Section.
    #[must_use]
    pub fn section(name: &str, label: &str) -> Self {
        Self::new(WidgetType::Section, name, label)
    }

    /// Menu with the given choices, selecting the first one.
    #[must_use]
    pub fn menu(name: &str, label: &str, choices: &[&str]) -> Self {
        Self::new(WidgetType::Menu, name, label).with_choices(choices)
    }

    /// Radio group with the given choices, selecting the first one.
    #[must_use]
    pub fn radio(name: &str, label: &str, choices: &[&str]) -> Self {
        Self::new(WidgetType::Radio, name, label).with_choices(choices)
    }

    /// Range between `min` and `max`, set to `min`.
    #[must_use]
    pub fn ranged(name: &str, label: &str, min: f32, max: f32, step: f32) -> Self {
        let mut widget = Self::new(WidgetType::Range, name, label);
        widget.range = Some(RangeLimits { min, max, step });
        widget.with_value(WidgetValue::Float(min))
    }

    /// Text widget.
    #[must_use]
    pub fn text(name: &str, label: &str, value: &str) -> Self {
        Self::new(WidgetType::Text, name, label).with_value(WidgetValue::Text(value.to_owned()))
    }

    /// Toggle widget.
    #[must_use]
    pub fn toggle(name: &str, label: &str, on: bool) -> Self {
        Self::new(WidgetType::Toggle, name, label).with_value(WidgetValue::Int(i32::from(on)))
    }

    /// Date widget holding `seconds` since the epoch.
    #[must_use]
    pub fn date(name: &str, label: &str, seconds: i32) -> Self {
        Self::new(WidgetType::Date, name, label).with_value(WidgetValue::Int(seconds))
    }

    /// Replace the choices and select the first one.
    #[must_use]
    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|&choice| choice.to_owned()).collect();
        if let Some(first) = self.choices.first() {
            self.value = RefCell::new(WidgetValue::Text(first.clone()));
        }
        self
    }

    /// Replace the current value.
    #[must_use]
    pub fn with_value(self, value: WidgetValue) -> Self {
        self.value.replace(value);
        self
    }

    /// Mark the widget read-only.
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    fn find(&self, name: &str) -> Option<&Self> {
        self.children.iter().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.find(name)
            }
        })
    }
}

fn bad_parameters(method: &str) -> Error {
    Error::call(
        ResultCode::BadParameters,
        format!("{method} failed: {}", ResultCode::BadParameters.description()),
    )
}

impl WidgetHandle for MockWidget {
    type Child<'a> = &'a Self;

    fn widget_type(&self) -> Result<WidgetType> {
        Ok(self.kind)
    }

    fn name(&self) -> Result<String> {
        Ok(self.name.clone())
    }

    fn label(&self) -> Result<String> {
        Ok(self.label.clone())
    }

    fn is_readonly(&self) -> Result<bool> {
        Ok(self.readonly)
    }

    fn value(&self) -> Result<WidgetValue> {
        Ok(self.value.borrow().clone())
    }

    fn set_value(&self, value: &WidgetValue) -> Result<()> {
        if !value.fits(self.kind) || matches!(value, WidgetValue::None) {
            return Err(bad_parameters("gp_widget_set_value"));
        }
        self.value.replace(value.clone());
        Ok(())
    }

    fn choice_count(&self) -> Result<usize> {
        if !self.kind.has_choices() {
            return Err(bad_parameters("gp_widget_count_choices"));
        }
        Ok(self.choices.len())
    }

    fn choice(&self, index: usize) -> Result<String> {
        if !self.kind.has_choices() {
            return Err(bad_parameters("gp_widget_get_choice"));
        }
        self.choices
            .get(index)
            .cloned()
            .ok_or_else(|| bad_parameters("gp_widget_get_choice"))
    }

    fn range(&self) -> Result<RangeLimits> {
        self.range.ok_or_else(|| bad_parameters("gp_widget_get_range"))
    }

    fn child_count(&self) -> Result<usize> {
        Ok(self.children.len())
    }

    fn child(&self, index: usize) -> Result<Self::Child<'_>> {
        self.children
            .get(index)
            .ok_or_else(|| bad_parameters("gp_widget_get_child"))
    }

    fn child_by_name(&self, name: &str) -> Result<Self::Child<'_>> {
        self.find(name)
            .ok_or_else(|| bad_parameters("gp_widget_get_child_by_name"))
    }
}

/// A small configuration tree resembling what a DSLR reports.
#[must_use]
pub fn sample_config() -> MockWidget {
    MockWidget::window("main", "Camera and Driver Configuration")
        .with_child(
            MockWidget::section("settings", "Camera Settings")
                .with_child(MockWidget::date("datetime", "Camera Date and Time", 1_700_000_000))
                .with_child(MockWidget::toggle("reviewtime", "Quick Review Time", true))
                .with_child(MockWidget::text("artist", "Artist", "Jane Doe")),
        )
        .with_child(
            MockWidget::section("imgsettings", "Image Settings")
                .with_child(MockWidget::radio("iso", "ISO Speed", &["Auto", "100", "200", "400"]))
                .with_child(MockWidget::ranged(
                    "exposurecompensation",
                    "Exposure Compensation",
                    -3.0,
                    3.0,
                    0.5,
                )),
        )
        .with_child(
            MockWidget::section("capturesettings", "Capture Settings")
                .with_child(MockWidget::menu(
                    "capturetarget",
                    "Capture Target",
                    &["Internal RAM", "Memory card"],
                ))
                .with_child(
                    MockWidget::text("serialnumber", "Serial Number", "0123456789").readonly(),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_widget_creation() {
        let widget = MockWidget::menu("capturetarget", "Capture Target", &["Internal RAM"]);
        assert_eq!(widget.widget_type().expect("type"), WidgetType::Menu);
        assert_eq!(widget.name().expect("name"), "capturetarget");
        assert_eq!(widget.label().expect("label"), "Capture Target");
        assert_eq!(
            widget.value().expect("value"),
            WidgetValue::Text("Internal RAM".to_owned())
        );
    }

    #[test]
    fn test_mock_set_value_checks_representation() {
        let widget = MockWidget::ranged("ev", "EV", -1.0, 1.0, 0.5);
        widget
            .set_value(&WidgetValue::Float(0.5))
            .expect("float fits range");
        assert_eq!(widget.value().expect("value"), WidgetValue::Float(0.5));

        let err = widget
            .set_value(&WidgetValue::Text("0.5".to_owned()))
            .expect_err("text does not fit range");
        assert_eq!(err.result_code(), Some(ResultCode::BadParameters));
    }

    #[test]
    fn test_mock_child_by_name_is_recursive() {
        let root = sample_config();
        let iso = root.child_by_name("iso").expect("iso exists");
        assert_eq!(iso.widget_type().expect("type"), WidgetType::Radio);

        let nested = root.child_by_name("capturetarget").expect("nested lookup");
        assert_eq!(nested.label().expect("label"), "Capture Target");

        let err = root.child_by_name("nope").expect_err("missing child");
        assert_eq!(err.result_code(), Some(ResultCode::BadParameters));
    }

    #[test]
    fn test_mock_choices_on_wrong_kind() {
        let widget = MockWidget::text("artist", "Artist", "");
        assert!(widget.choice_count().is_err());
        assert!(widget.range().is_err());
    }
}
