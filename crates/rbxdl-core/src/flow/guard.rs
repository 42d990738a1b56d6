//! RAII guard that re-enables the submit control when dropped.

use std::ops::{Deref, DerefMut};

use super::status::StatusSink;

/// Disables submit on creation and re-enables it on drop, on every exit path.
pub(super) struct SubmitGuard<'a, U: StatusSink + ?Sized> {
    ui: &'a mut U,
}

impl<'a, U: StatusSink + ?Sized> SubmitGuard<'a, U> {
    pub(super) fn engage(ui: &'a mut U) -> Self {
        ui.set_submit_enabled(false);
        Self { ui }
    }
}

impl<U: StatusSink + ?Sized> Deref for SubmitGuard<'_, U> {
    type Target = U;

    fn deref(&self) -> &U {
        &*self.ui
    }
}

impl<U: StatusSink + ?Sized> DerefMut for SubmitGuard<'_, U> {
    fn deref_mut(&mut self) -> &mut U {
        &mut *self.ui
    }
}

impl<U: StatusSink + ?Sized> Drop for SubmitGuard<'_, U> {
    fn drop(&mut self) {
        self.ui.set_submit_enabled(true);
    }
}
