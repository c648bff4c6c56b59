//! Application state definitions

use super::catalog;
use super::forms::{FieldId, FocusTarget};

const FIELD_COUNT: usize = FieldId::ALL.len();

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    /// Confirmation screen after an accepted registration
    Success,
}

/// One selectable row of the form screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Field(FieldId),
    /// The action panel below the last field
    Submit,
}

impl FormRow {
    /// Every field plus the submit row
    pub const COUNT: usize = FIELD_COUNT + 1;

    pub fn from_index(index: usize) -> Self {
        FieldId::ALL
            .get(index)
            .copied()
            .map(Self::Field)
            .unwrap_or(Self::Submit)
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Field(id) => id.index(),
            Self::Submit => FIELD_COUNT,
        }
    }
}

/// Presentation state of the registration screen
#[derive(Debug, Clone)]
pub struct AppState {
    pub current_view: View,
    /// Index into [`FormRow`] order
    pub active_row: usize,
    /// Highlighted option per choice field
    option_cursors: [usize; FIELD_COUNT],
    /// First visible line of the scrolled form
    pub scroll_offset: usize,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: View::default(),
            active_row: 0,
            option_cursors: [0; FIELD_COUNT],
            scroll_offset: 0,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn active(&self) -> FormRow {
        FormRow::from_index(self.active_row)
    }

    /// Field under the cursor, if the cursor is on a field
    pub fn active_field(&self) -> Option<FieldId> {
        match self.active() {
            FormRow::Field(id) => Some(id),
            FormRow::Submit => None,
        }
    }

    pub fn on_submit_row(&self) -> bool {
        matches!(self.active(), FormRow::Submit)
    }

    /// Move to next form row
    pub fn next_row(&mut self) {
        self.active_row = (self.active_row + 1) % FormRow::COUNT;
    }

    /// Move to previous form row
    pub fn prev_row(&mut self) {
        if self.active_row == 0 {
            self.active_row = FormRow::COUNT - 1;
        } else {
            self.active_row -= 1;
        }
    }

    pub fn focus_submit(&mut self) {
        self.active_row = FormRow::Submit.index();
    }

    pub fn option_cursor(&self, id: FieldId) -> usize {
        self.option_cursors[id.index()]
    }

    /// Move the option highlight of the active field one step right, wrapping
    pub fn next_option(&mut self) {
        if let Some(id) = self.active_field() {
            let count = catalog::options(id).len();
            if count > 0 {
                let cursor = &mut self.option_cursors[id.index()];
                *cursor = (*cursor + 1) % count;
            }
        }
    }

    /// Move the option highlight of the active field one step left, wrapping
    pub fn prev_option(&mut self) {
        if let Some(id) = self.active_field() {
            let count = catalog::options(id).len();
            if count > 0 {
                let cursor = &mut self.option_cursors[id.index()];
                *cursor = if *cursor == 0 { count - 1 } else { *cursor - 1 };
            }
        }
    }

    /// Option value under the highlight of the active field
    pub fn highlighted_option(&self) -> Option<(FieldId, &'static str)> {
        let id = self.active_field()?;
        catalog::options(id)
            .get(self.option_cursor(id))
            .map(|o| (id, o.value))
    }

    /// Adjust `scroll_offset` so lines `top..top + height` fit a viewport of
    /// `viewport` lines
    pub fn scroll_into_view(&mut self, top: usize, height: usize, viewport: usize) {
        if viewport == 0 {
            return;
        }
        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if top + height > self.scroll_offset + viewport {
            // Rows taller than the viewport are pinned at their top.
            self.scroll_offset = (top + height).saturating_sub(viewport).min(top);
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn show_success(&mut self) {
        self.current_view = View::Success;
    }

    /// Back to a fresh form screen
    pub fn reset_form_view(&mut self) {
        self.current_view = View::Form;
        self.active_row = 0;
        self.option_cursors = [0; FIELD_COUNT];
        self.scroll_offset = 0;
    }
}

impl FocusTarget for AppState {
    fn focus_field(&mut self, field: FieldId) {
        self.current_view = View::Form;
        self.active_row = field.index();
    }
}
