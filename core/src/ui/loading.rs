//! Busy/idle toggling for interactive controls during in-flight requests.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Label shown while a control is busy.
pub const BUSY_LABEL: &str = "处理中...";

/// Label restored when a control leaves the busy state without a stash.
pub const DEFAULT_LABEL: &str = "确定";

/// Data attribute holding the label a busy control had before.
pub const ORIGINAL_LABEL_KEY: &str = "originalText";

/// A clickable page element: a visible label, a disabled flag and a small
/// string attribute store.
pub trait Control {
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&mut self, disabled: bool);
    fn data(&self, key: &str) -> Option<String>;
    fn set_data(&mut self, key: &str, value: String);
    fn remove_data(&mut self, key: &str) -> Option<String>;
}

/// Disable `control` and show `BUSY_LABEL`, stashing the current label.
///
/// Calling this on a control that is already busy leaves the first stash in
/// place, so the eventual `hide_loading` still restores the real label.
pub fn show_loading<C: Control + ?Sized>(control: &mut C) {
    if control.data(ORIGINAL_LABEL_KEY).is_none() {
        let label = control.label();
        control.set_data(ORIGINAL_LABEL_KEY, label);
    }
    control.set_disabled(true);
    control.set_label(BUSY_LABEL);
}

/// Re-enable `control` and restore its stashed label, or `DEFAULT_LABEL`
/// when nothing (or an empty label) was stashed.
pub fn hide_loading<C: Control + ?Sized>(control: &mut C) {
    let label = control
        .remove_data(ORIGINAL_LABEL_KEY)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LABEL.to_string());
    control.set_disabled(false);
    control.set_label(&label);
}

/// Keeps a control busy for as long as the guard lives.
pub struct LoadingGuard<'a, C: Control + ?Sized> {
    control: &'a mut C,
}

impl<'a, C: Control + ?Sized> LoadingGuard<'a, C> {
    pub fn new(control: &'a mut C) -> Self {
        show_loading(&mut *control);
        Self { control }
    }
}

impl<C: Control + ?Sized> Deref for LoadingGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.control
    }
}

impl<C: Control + ?Sized> DerefMut for LoadingGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut *self.control
    }
}

impl<C: Control + ?Sized> Drop for LoadingGuard<'_, C> {
    fn drop(&mut self) {
        hide_loading(&mut *self.control);
    }
}

/// In-memory `Control`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Button {
    label: String,
    disabled: bool,
    data: HashMap<String, String>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

impl Control for Button {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn data(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set_data(&mut self, key: &str, value: String) {
        self.data.insert(key.to_string(), value);
    }

    fn remove_data(&mut self, key: &str) -> Option<String> {
        self.data.remove(key)
    }
}
