use crate::editing::BlockId;

/// Transient per-session UI state: selection, the open add-block menu, and
/// the working title.
///
/// This state lives alongside the [`Document`](crate::editing::Document)
/// but is never persisted with a draft. Fields are explicit and passed into
/// render code by the front end; there is no ambient global editor state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    /// The single selected block, if any.
    selected: Option<BlockId>,
    /// The block whose add-block menu is open, if any. At most one menu is
    /// open at a time.
    open_menu: Option<BlockId>,
    /// Working post title. Edited in the header, not part of the exported
    /// markup.
    title: String,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn select(&mut self, id: BlockId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn open_menu(&self) -> Option<BlockId> {
        self.open_menu
    }

    /// Toggle the add-block menu for `id`: opens it if closed or open on a
    /// different block, closes it if already open there.
    pub fn toggle_menu(&mut self, id: BlockId) {
        self.open_menu = if self.open_menu == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Housekeeping after a block is removed from the document: a deleted
    /// block can no longer be selected or own the open menu.
    pub fn note_delete(&mut self, id: BlockId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.open_menu == Some(id) {
            self.open_menu = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_single() {
        let mut session = EditorSession::new();
        session.select(BlockId::new(1));
        session.select(BlockId::new(2));

        assert_eq!(session.selected(), Some(BlockId::new(2)));
    }

    #[test]
    fn test_toggle_menu_moves_between_blocks() {
        let mut session = EditorSession::new();
        let a = BlockId::new(1);
        let b = BlockId::new(2);

        session.toggle_menu(a);
        assert_eq!(session.open_menu(), Some(a));

        // Toggling another block's menu moves the menu there
        session.toggle_menu(b);
        assert_eq!(session.open_menu(), Some(b));

        // Toggling the same block closes it
        session.toggle_menu(b);
        assert_eq!(session.open_menu(), None);
    }

    #[test]
    fn test_note_delete_clears_stale_references() {
        let mut session = EditorSession::new();
        let a = BlockId::new(1);
        session.select(a);
        session.toggle_menu(a);

        session.note_delete(a);

        assert_eq!(session.selected(), None);
        assert_eq!(session.open_menu(), None);
    }

    #[test]
    fn test_note_delete_of_other_block_keeps_state() {
        let mut session = EditorSession::new();
        let a = BlockId::new(1);
        session.select(a);

        session.note_delete(BlockId::new(2));

        assert_eq!(session.selected(), Some(a));
    }
}
