//! Configuration tree utilities.
//!
//! Cameras expose their settings as a tree of sections under a single
//! window. These helpers flatten that tree into [`WidgetEntry`] records
//! addressed by slash-separated paths such as `/main/imgsettings/iso`.

use std::fmt;

use crate::error::{Error, Result};
use crate::traits::{WidgetHandle, WidgetType, WidgetValue};
use crate::widget::Widget;

/// Snapshot of one widget in a configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetEntry {
    /// Slash-separated path from the root, e.g. `/main/settings/artist`.
    pub path: String,
    /// Internal name.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Declared kind.
    pub kind: WidgetType,
    /// Whether the camera refuses changes.
    pub readonly: bool,
    /// Value at the time of the walk.
    pub value: WidgetValue,
}

impl fmt::Display for WidgetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.path, self.kind, self.label)?;
        if !matches!(self.value, WidgetValue::None) {
            write!(f, " = {}", self.value)?;
        }
        if self.readonly {
            f.write_str(" [read-only]")?;
        }
        Ok(())
    }
}

/// List every widget below and including `root`, depth first.
///
/// # Errors
///
/// Returns the first error reported by the handle; a partial walk is
/// never returned.
pub fn walk<H: WidgetHandle>(root: &Widget<H>) -> Result<Vec<WidgetEntry>> {
    let mut entries = Vec::new();
    visit(root.handle(), "", &mut entries)?;
    log::debug!("walked {} widgets", entries.len());
    Ok(entries)
}

/// Find the first widget named `name` below and including `root`.
pub fn find<H: WidgetHandle>(root: &Widget<H>, name: &str) -> Result<WidgetEntry> {
    walk(root)?
        .into_iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| Error::Argument(format!("no widget named '{name}'")))
}

fn visit<H: WidgetHandle>(handle: &H, parent: &str, out: &mut Vec<WidgetEntry>) -> Result<()> {
    let name = handle.name()?;
    let kind = handle.widget_type()?;
    let path = format!("{parent}/{name}");

    out.push(WidgetEntry {
        path: path.clone(),
        name,
        label: handle.label()?,
        kind,
        readonly: handle.is_readonly()?,
        value: handle.value()?,
    });

    if kind.is_container() {
        for index in 0..handle.child_count()? {
            let child = handle.child(index)?;
            visit(&child, &path, out)?;
        }
    }
    Ok(())
}
