//! Selection and text entry state behind the parameter table

use super::{BodyField, EditError, FieldEdit};

/// Parses committed cell text as a number
pub fn parse_value(text: &str) -> Result<f64, EditError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EditError::Malformed(trimmed.to_string())),
    }
}

/// Which cell is selected, what has been typed into it, and the edit waiting
/// for the next frame
#[derive(Debug, Clone, Default)]
pub struct EditSurface {
    selected_body_index: Option<usize>,
    selected_field: Option<BodyField>,
    buffer: String,
    pending: Option<FieldEdit>,
    focus_requested: bool,
}

impl EditSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_body_index(&self) -> Option<usize> {
        self.selected_body_index
    }

    pub fn selected_field(&self) -> Option<BodyField> {
        self.selected_field
    }

    pub fn is_selected(&self, body_index: usize, field: BodyField) -> bool {
        self.selected_body_index == Some(body_index) && self.selected_field == Some(field)
    }

    /// Selects a cell. Moving to a different cell discards typed text.
    pub fn select(&mut self, body_index: usize, field: BodyField) {
        if !self.is_selected(body_index, field) {
            self.buffer.clear();
            self.focus_requested = !field.is_toggle();
        }
        self.selected_body_index = Some(body_index);
        self.selected_field = Some(field);
    }

    pub fn clear_selection(&mut self) {
        self.selected_body_index = None;
        self.selected_field = None;
        self.buffer.clear();
    }

    /// True once after a text cell becomes selected
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Text field contents, handed to the widget by mutable reference
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Turns the typed text into the pending edit
    ///
    /// The buffer is cleared whether or not the text parses. Range checks
    /// happen when the edit is applied.
    pub fn commit(&mut self) -> Result<(), EditError> {
        let text = std::mem::take(&mut self.buffer);
        let (Some(body_index), Some(field)) = (self.selected_body_index, self.selected_field)
        else {
            return Ok(());
        };

        let value = parse_value(&text)?;
        self.pending = Some(FieldEdit::new(body_index, field, value));
        Ok(())
    }

    /// Queues a visibility flip for a sphere that is currently `hidden` or not
    pub fn toggle_hidden(&mut self, body_index: usize, hidden: bool) {
        self.select(body_index, BodyField::Hidden);
        self.pending = Some(FieldEdit::toggle_hidden(body_index, hidden));
    }

    pub fn pending(&self) -> Option<&FieldEdit> {
        self.pending.as_ref()
    }

    /// Hands the pending edit to the frame driver
    pub fn take_pending(&mut self) -> Option<FieldEdit> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 2.5 "), Ok(2.5));
        assert_eq!(parse_value("-14"), Ok(-14.0));
        assert_eq!(parse_value("1e3"), Ok(1000.0));
        assert_eq!(parse_value("abc"), Err(EditError::Malformed("abc".into())));
        assert_eq!(parse_value(""), Err(EditError::Malformed(String::new())));
        assert!(parse_value("inf").is_err());
    }

    #[test]
    fn test_commit_produces_pending_edit() {
        let mut surface = EditSurface::new();
        surface.select(2, BodyField::VelocityY);
        surface.buffer_mut().push_str("3.25");

        assert!(surface.commit().is_ok());
        assert_eq!(surface.buffer(), "");
        assert_eq!(
            surface.take_pending(),
            Some(FieldEdit::new(2, BodyField::VelocityY, 3.25))
        );
        assert_eq!(surface.take_pending(), None);
    }

    #[test]
    fn test_malformed_commit_clears_buffer() {
        let mut surface = EditSurface::new();
        surface.select(1, BodyField::Radius);
        surface.buffer_mut().push_str("1.2.3");

        assert!(matches!(surface.commit(), Err(EditError::Malformed(_))));
        assert_eq!(surface.buffer(), "");
        assert!(surface.pending().is_none());
    }

    #[test]
    fn test_new_selection_discards_text() {
        let mut surface = EditSurface::new();
        surface.select(1, BodyField::PositionX);
        surface.buffer_mut().push_str("4");

        surface.select(1, BodyField::PositionX);
        assert_eq!(surface.buffer(), "4");

        assert!(surface.take_focus_request());
        assert!(!surface.take_focus_request());

        surface.select(3, BodyField::PositionX);
        assert_eq!(surface.buffer(), "");
        assert_eq!(surface.selected_body_index(), Some(3));
        assert!(surface.take_focus_request());
    }

    #[test]
    fn test_toggle_hidden_queues_flip() {
        let mut surface = EditSurface::new();
        surface.toggle_hidden(4, false);
        assert_eq!(surface.selected_field(), Some(BodyField::Hidden));
        assert_eq!(
            surface.take_pending(),
            Some(FieldEdit::new(4, BodyField::Hidden, 1.0))
        );
    }
}
