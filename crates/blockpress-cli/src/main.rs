use anyhow::Result;
use blockpress_config::Config;
use blockpress_engine::editing::{
    Block, BlockKind, BlockTemplate, Cmd, Direction, Document, EditorSession, Patch,
};
use blockpress_engine::export::html;
use blockpress_engine::io::{self, IoError};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as Panel, Borders, List, ListItem, ListState, Paragraph},
};
use relative_path::RelativePathBuf;
use std::{env, io::stdout, path::PathBuf, process};

/// What the keyboard currently drives.
enum Mode {
    /// Browsing blocks: selection, reorder, delete, menus.
    Normal,
    /// The add-block menu is open for the selected block.
    Menu,
    /// Editing the selected block's text. `column` is set while editing a
    /// cell of a columns block.
    EditText { buffer: String, column: Option<usize> },
    /// Editing the post title in the header.
    EditTitle { buffer: String },
}

struct App {
    document: Document,
    session: EditorSession,
    mode: Mode,
    status: Option<String>,
    block_list_state: ListState,
    drafts_root: PathBuf,
    export_root: PathBuf,
    draft: RelativePathBuf,
}

impl App {
    fn new(drafts_root: PathBuf, export_root: PathBuf, draft: RelativePathBuf) -> Result<Self> {
        let document = match io::load_draft(&draft, &drafts_root) {
            Ok(doc) => doc,
            Err(IoError::NotFound(_)) => Document::new(),
            Err(e) => return Err(e.into()),
        };

        let mut app = Self {
            document,
            session: EditorSession::new(),
            mode: Mode::Normal,
            status: None,
            block_list_state: ListState::default(),
            drafts_root,
            export_root,
            draft,
        };
        app.select_index(0);
        Ok(app)
    }

    fn selected_index(&self) -> usize {
        self.session
            .selected()
            .and_then(|id| self.document.blocks().iter().position(|b| b.id == id))
            .unwrap_or(0)
    }

    fn selected_block(&self) -> &Block {
        &self.document.blocks()[self.selected_index()]
    }

    fn select_index(&mut self, index: usize) {
        let index = index.min(self.document.len() - 1);
        self.session.select(self.document.blocks()[index].id);
        self.block_list_state.select(Some(index));
    }

    fn next_block(&mut self) {
        let i = (self.selected_index() + 1) % self.document.len();
        self.select_index(i);
    }

    fn previous_block(&mut self) {
        let i = self
            .selected_index()
            .checked_sub(1)
            .unwrap_or(self.document.len() - 1);
        self.select_index(i);
    }

    /// Run one edit command, routing errors to the status line.
    fn run_command(&mut self, cmd: Cmd) -> Option<Patch> {
        match self.document.apply(cmd) {
            Ok(patch) => Some(patch),
            Err(e) => {
                self.status = Some(format!("Edit failed: {e}"));
                None
            }
        }
    }

    fn move_selected(&mut self, direction: Direction) {
        let id = self.selected_block().id;
        if let Some(patch) = self.run_command(Cmd::Move { id, direction })
            && !patch.is_noop()
        {
            // Keep the highlight on the moved block
            self.select_index(self.document.blocks().iter().position(|b| b.id == id).unwrap_or(0));
        }
    }

    fn delete_selected(&mut self) {
        let index = self.selected_index();
        let id = self.selected_block().id;
        if let Some(patch) = self.run_command(Cmd::Delete { id }) {
            if patch.is_noop() {
                self.status = Some("Cannot delete the last remaining block".to_string());
            } else {
                self.session.note_delete(id);
                self.select_index(index.saturating_sub(1));
            }
        }
    }

    fn toggle_menu(&mut self) {
        self.session.toggle_menu(self.selected_block().id);
        self.mode = if self.session.open_menu().is_some() {
            Mode::Menu
        } else {
            Mode::Normal
        };
    }

    fn insert_from_menu(&mut self, template: BlockTemplate) {
        let Some(anchor) = self.session.open_menu() else {
            return;
        };
        if let Some(patch) = self.run_command(Cmd::InsertAfter { anchor, template }) {
            let new_id = patch.changed[0];
            let index = self
                .document
                .blocks()
                .iter()
                .position(|b| b.id == new_id)
                .unwrap_or(0);
            self.select_index(index);
        }
        self.session.close_menu();
        self.mode = Mode::Normal;
    }

    /// Enter text-edit mode for the selected block, seeded with its
    /// current content (first cell for a columns block).
    fn begin_edit(&mut self) {
        let block = self.selected_block();
        self.mode = match &block.kind {
            BlockKind::Columns { cells } => Mode::EditText {
                buffer: cells[0].clone(),
                column: Some(0),
            },
            kind => Mode::EditText {
                buffer: kind.text().unwrap_or_default().to_string(),
                column: None,
            },
        };
    }

    fn commit_edit(&mut self, buffer: String, column: Option<usize>) {
        let id = self.selected_block().id;
        let cmd = match column {
            Some(column) => Cmd::SetColumnText {
                id,
                column,
                text: buffer,
            },
            None => Cmd::SetText { id, text: buffer },
        };
        self.run_command(cmd);
    }

    /// Commit the current cell and move editing to the next column,
    /// wrapping at the end.
    fn next_column(&mut self, buffer: String, column: usize) {
        let id = self.selected_block().id;
        let count = self
            .selected_block()
            .kind
            .column_count()
            .unwrap_or(1);
        self.run_command(Cmd::SetColumnText {
            id,
            column,
            text: buffer,
        });
        let next = (column + 1) % count;
        let BlockKind::Columns { cells } = &self.selected_block().kind else {
            return;
        };
        self.mode = Mode::EditText {
            buffer: cells[next].clone(),
            column: Some(next),
        };
    }

    fn save_draft(&mut self) {
        match io::save_draft(&self.draft, &self.drafts_root, &self.document) {
            Ok(()) => {
                self.status = Some(format!(
                    "Saved draft to {}",
                    self.draft.to_path(&self.drafts_root).display()
                ));
            }
            Err(e) => self.status = Some(format!("Save failed: {e}")),
        }
    }

    fn publish(&mut self) {
        let exported = html::render_document(&self.document);
        let target = self.draft.with_extension("html");
        match io::write_export(&target, &self.export_root, &exported) {
            Ok(()) => {
                self.status = Some(format!(
                    "Published {} blocks to {}",
                    self.document.len(),
                    target.to_path(&self.export_root).display()
                ));
            }
            Err(e) => self.status = Some(format!("Publish failed: {e}")),
        }
    }
}

fn main() -> Result<()> {
    // Determine drafts/export roots from config, draft name from CLI args
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let draft = match args.len() {
        1 => RelativePathBuf::from("draft.json"),
        2 => RelativePathBuf::from(args[1].as_str()),
        _ => {
            eprintln!("Usage: {} [draft-name.json]", args[0]);
            process::exit(1);
        }
    };

    let (drafts_root, export_root) = match Config::load() {
        Ok(Some(config)) => (config.drafts_path, config.export_path),
        Ok(None) => {
            eprintln!("Error: No config file found");
            eprintln!(
                "Create one at {} with drafts_path and export_path entries",
                config_path.display()
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&drafts_root) {
        eprintln!(
            "Error: Drafts path '{}' is unusable: {e}",
            drafts_root.display()
        );
        process::exit(1);
    }
    if let Err(e) = io::validate_drafts_dir(&drafts_root) {
        eprintln!(
            "Error: Drafts path '{}' from config file '{}' is invalid: {e}",
            drafts_root.display(),
            config_path.display()
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(drafts_root, export_root, draft)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };

        match &mut app.mode {
            Mode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_block(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_block(),
                KeyCode::Char('J') => app.move_selected(Direction::Down),
                KeyCode::Char('K') => app.move_selected(Direction::Up),
                KeyCode::Char('d') => app.delete_selected(),
                KeyCode::Char('a') => app.toggle_menu(),
                KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
                KeyCode::Char('t') => {
                    app.mode = Mode::EditTitle {
                        buffer: app.session.title().to_string(),
                    };
                }
                KeyCode::Char('w') => app.save_draft(),
                KeyCode::Char('P') => app.publish(),
                _ => {}
            },
            Mode::Menu => match key.code {
                KeyCode::Esc => {
                    app.session.close_menu();
                    app.mode = Mode::Normal;
                }
                KeyCode::Char('p') => app.insert_from_menu(BlockTemplate::Paragraph),
                KeyCode::Char('h') => app.insert_from_menu(BlockTemplate::Heading),
                KeyCode::Char('i') => app.insert_from_menu(BlockTemplate::Image),
                KeyCode::Char('q') => app.insert_from_menu(BlockTemplate::Quote),
                KeyCode::Char('c') => app.insert_from_menu(BlockTemplate::Code),
                KeyCode::Char('2') => app.insert_from_menu(BlockTemplate::Columns { count: 2 }),
                KeyCode::Char('3') => app.insert_from_menu(BlockTemplate::Columns { count: 3 }),
                _ => {}
            },
            Mode::EditText { buffer, column } => match key.code {
                KeyCode::Esc => app.mode = Mode::Normal,
                KeyCode::Enter => {
                    let (buffer, column) = (std::mem::take(buffer), *column);
                    app.commit_edit(buffer, column);
                    app.mode = Mode::Normal;
                }
                KeyCode::Tab => {
                    if let Some(col) = *column {
                        let buffer = std::mem::take(buffer);
                        app.next_column(buffer, col);
                    }
                }
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            },
            Mode::EditTitle { buffer } => match key.code {
                KeyCode::Esc => app.mode = Mode::Normal,
                KeyCode::Enter => {
                    let title = std::mem::take(buffer);
                    app.session.set_title(title);
                    app.mode = Mode::Normal;
                }
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            },
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_header(f, app, chunks[0]);

    let middle = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
        .split(chunks[1]);

    draw_document(f, app, middle[0]);
    draw_sidebar(f, app, middle[1]);
    draw_footer(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let title = match &app.mode {
        Mode::EditTitle { buffer } => format!("{buffer}_"),
        _ if app.session.title().is_empty() => "Add title (t)".to_string(),
        _ => app.session.title().to_string(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  —  "),
        Span::raw(app.draft.as_str().to_string()),
    ]))
    .block(Panel::default().borders(Borders::ALL).title("blockpress"));
    f.render_widget(header, area);
}

fn draw_document(f: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    let items: Vec<ListItem> = app
        .document
        .blocks()
        .iter()
        .map(|block| ListItem::new(block_lines(block)))
        .collect();

    let list = List::new(items)
        .block(Panel::default().borders(Borders::ALL).title("Document"))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    f.render_stateful_widget(list, area, &mut app.block_list_state);
}

fn block_lines(block: &Block) -> Vec<Line<'static>> {
    let label = Line::from(Span::styled(
        format!("[{} #{}]", block.kind.name(), block.id),
        Style::default().fg(Color::DarkGray),
    ));

    let mut lines = vec![label];
    match &block.kind {
        BlockKind::Paragraph { text } => lines.push(Line::from(text.clone())),
        BlockKind::Heading { text } => lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        BlockKind::Quote { text } => lines.push(Line::from(format!("│ {text}"))),
        BlockKind::Code { source } => {
            for line in source.lines() {
                lines.push(Line::from(format!("    {line}")));
            }
        }
        BlockKind::Image { url } => {
            let shown = if url.is_empty() {
                "(no image URL yet — press e to set one)"
            } else {
                url.as_str()
            };
            lines.push(Line::from(format!("image: {shown}")));
        }
        BlockKind::Columns { cells } => {
            lines.push(Line::from(cells.join("  ┃  ")));
        }
    }
    lines.push(Line::from(""));
    lines
}

fn draw_sidebar(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Document",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Blocks: {}", app.document.len())),
        Line::from(format!("Version: {}", app.document.version())),
        Line::from(""),
    ];

    if matches!(app.mode, Mode::Menu) {
        lines.push(Line::from(Span::styled(
            "Add Block",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for entry in [
            "p  Paragraph",
            "h  Heading",
            "i  Image",
            "q  Quote",
            "c  Code",
            "2  2 Columns",
            "3  3 Columns",
            "Esc  Cancel",
        ] {
            lines.push(Line::from(entry));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Selected",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let block = app.selected_block();
        lines.push(Line::from(format!("{} #{}", block.kind.name(), block.id)));
        if let Some(count) = block.kind.column_count() {
            lines.push(Line::from(format!("{count} columns (Tab cycles cells)")));
        }
    }

    let sidebar =
        Paragraph::new(lines).block(Panel::default().borders(Borders::ALL).title("Inspector"));
    f.render_widget(sidebar, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let line = match &app.mode {
        Mode::EditText { buffer, column } => {
            let target = match column {
                Some(col) => format!("column {}", col + 1),
                None => "text".to_string(),
            };
            Line::from(format!("Editing {target}: {buffer}_  (Enter commit, Esc cancel)"))
        }
        Mode::EditTitle { buffer } => {
            Line::from(format!("Title: {buffer}_  (Enter commit, Esc cancel)"))
        }
        Mode::Menu => Line::from("Pick a block kind from the Add Block menu"),
        Mode::Normal => match &app.status {
            Some(status) => Line::from(status.clone()),
            None => Line::from(
                "q: Quit | j/k: Select | J/K: Move | a: Add | e: Edit | d: Delete | w: Save | P: Publish",
            ),
        },
    };

    let footer = Paragraph::new(line).block(Panel::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
