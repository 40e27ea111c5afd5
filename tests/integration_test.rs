use quick_links::app::App;
use quick_links::constants::{DARK_MODE_KEY, LINKS_KEY, NOTICE_DURATION_MS};
use quick_links::error::{QuickLinksError, Result};
use quick_links::event_handler::{handle_app_event, handle_key_event, handle_mouse_event};
use quick_links::layout::popup_layout;
use quick_links::models::{AppEvent, InputMode, RowAction, ThemeVariables};
use quick_links::services::{ClipboardService, Launcher};
use quick_links::storage::{JsonFileStorage, MemoryStorage};
use quick_links::ui::ui;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Clone, Default)]
struct RecordingClipboard {
    copied: Arc<Mutex<Vec<String>>>,
    paste: Option<String>,
}

impl ClipboardService for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn get_text(&mut self) -> Result<String> {
        self.paste
            .clone()
            .ok_or_else(|| QuickLinksError::clipboard("empty"))
    }
}

#[derive(Clone, Default)]
struct RecordingLauncher {
    opened: Arc<Mutex<Vec<String>>>,
}

impl Launcher for RecordingLauncher {
    fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

struct Harness {
    app: App,
    storage: MemoryStorage,
    clipboard: RecordingClipboard,
    launcher: RecordingLauncher,
}

impl Harness {
    async fn with_storage(storage: MemoryStorage) -> Self {
        let clipboard = RecordingClipboard {
            paste: Some("pasted.org\n".to_string()),
            ..Default::default()
        };
        let launcher = RecordingLauncher::default();
        let (tx, rx) = mpsc::channel(10);
        let mut app = App::new(
            tx,
            rx,
            Arc::new(storage.clone()),
            Box::new(clipboard.clone()),
            Box::new(launcher.clone()),
        );
        app.load().await;
        Self {
            app,
            storage,
            clipboard,
            launcher,
        }
    }

    async fn with_links(links: &[&str]) -> Self {
        Self::with_storage(MemoryStorage::with_entries([(LINKS_KEY, json!(links))])).await
    }

    async fn stored_links(&mut self) -> Vec<String> {
        self.app.settle().await;
        serde_json::from_value(self.storage.snapshot(LINKS_KEY).unwrap_or(json!([]))).unwrap()
    }

    async fn assert_persisted(&mut self) {
        let stored = self.stored_links().await;
        assert_eq!(stored, self.app.links);
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::empty(),
    }
}

fn render(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|c| c.symbol()).collect()
}

#[tokio::test]
async fn test_fresh_install_defaults() {
    let h = Harness::with_storage(MemoryStorage::new()).await;

    assert!(h.app.links.is_empty());
    assert!(h.app.dark_mode);
    assert_eq!(h.app.theme, ThemeVariables::DARK);
    assert!(!h.app.notice.visible);
}

#[tokio::test]
async fn test_load_replaces_memory_with_stored_state() {
    let storage = MemoryStorage::with_entries([
        (LINKS_KEY, json!(["a.com", "b.com"])),
        (DARK_MODE_KEY, json!(false)),
    ]);
    let h = Harness::with_storage(storage).await;

    assert_eq!(h.app.links, vec!["a.com", "b.com"]);
    assert!(!h.app.dark_mode);
    assert_eq!(h.app.theme, ThemeVariables::LIGHT);
}

#[tokio::test]
async fn test_unreadable_links_leave_list_empty() {
    let storage = MemoryStorage::with_entries([(LINKS_KEY, json!({"not": "a list"}))]);
    let h = Harness::with_storage(storage).await;
    assert!(h.app.links.is_empty());
    assert!(h.app.dark_mode);
}

#[tokio::test]
async fn test_add_update_remove_scenario() {
    let mut h = Harness::with_links(&["a.com"]).await;

    h.app.add();
    assert_eq!(h.app.links, vec!["a.com", ""]);
    h.assert_persisted().await;

    h.app.update(1, "b.com".to_string());
    assert_eq!(h.app.links, vec!["a.com", "b.com"]);
    h.assert_persisted().await;

    h.app.remove(0);
    assert_eq!(h.app.links, vec!["b.com"]);
    h.assert_persisted().await;
}

#[tokio::test]
async fn test_rapid_mutations_land_in_order() {
    let mut h = Harness::with_links(&[]).await;
    for i in 0..20 {
        h.app.add();
        h.app.update(i, format!("site{i}.com"));
    }
    h.app.remove(3);

    h.assert_persisted().await;
    assert_eq!(h.app.links.len(), 19);
    assert_eq!(h.app.links[3], "site4.com");
}

#[tokio::test]
async fn test_remove_preserves_order_of_the_rest() {
    let mut h = Harness::with_links(&["a", "b", "c", "d"]).await;
    h.app.remove(1);
    assert_eq!(h.app.links, vec!["a", "c", "d"]);
    h.assert_persisted().await;
}

#[tokio::test]
async fn test_out_of_range_indices_are_ignored() {
    let mut h = Harness::with_links(&["a.com"]).await;

    h.app.update(5, "x".to_string());
    h.app.remove(5);
    h.app.copy(5);
    h.app.launch(5);

    assert_eq!(h.app.links, vec!["a.com"]);
    assert!(!h.app.notice.visible);
    assert!(h.clipboard.copied.lock().unwrap().is_empty());
    assert!(h.launcher.opened.lock().unwrap().is_empty());
    h.assert_persisted().await;
}

#[tokio::test]
async fn test_update_touches_only_its_index() {
    let mut h = Harness::with_links(&["a", "b", "c"]).await;
    let before = h.app.links.clone();

    h.app.dispatch(RowAction::Update(2, "z".to_string()));

    for (i, (old, new)) in before.iter().zip(&h.app.links).enumerate() {
        if i == 2 {
            assert_eq!(new, "z");
        } else {
            assert_eq!(old, new);
        }
    }
    h.assert_persisted().await;
}

#[tokio::test]
async fn test_toggle_theme_twice_restores_variables() {
    let mut h = Harness::with_storage(MemoryStorage::new()).await;
    let original = h.app.theme;

    h.app.toggle_theme();
    assert!(!h.app.dark_mode);
    assert_eq!(h.app.theme, ThemeVariables::LIGHT);
    h.app.settle().await;
    assert_eq!(h.storage.snapshot(DARK_MODE_KEY), Some(json!(false)));

    h.app.toggle_theme();
    assert_eq!(h.app.theme, original);
    h.app.settle().await;
    assert_eq!(h.storage.snapshot(DARK_MODE_KEY), Some(json!(true)));
}

#[tokio::test(start_paused = true)]
async fn test_copy_shows_notice_then_hides_after_five_seconds() {
    let mut h = Harness::with_links(&["a.com", "b.com"]).await;

    h.app.copy(1);
    assert!(h.app.notice.visible);
    assert_eq!(h.app.notice.link, "b.com");
    assert_eq!(*h.clipboard.copied.lock().unwrap(), vec!["b.com"]);

    tokio::time::advance(Duration::from_millis(NOTICE_DURATION_MS - 1)).await;
    tokio::task::yield_now().await;
    assert!(h.app.rx.try_recv().is_err());
    assert!(h.app.notice.visible);

    let event = h.app.rx.recv().await.unwrap();
    assert_eq!(event, AppEvent::NoticeExpired(h.app.notice.generation));
    handle_app_event(&mut h.app, event);
    assert!(!h.app.notice.visible);
}

#[tokio::test(start_paused = true)]
async fn test_second_copy_replaces_pending_hide() {
    let mut h = Harness::with_links(&["a.com", "b.com"]).await;

    h.app.copy(0);
    let first_generation = h.app.notice.generation;
    tokio::time::advance(Duration::from_millis(3000)).await;
    h.app.copy(1);

    // The first copy's deadline passes without hiding the newer notice.
    tokio::time::advance(Duration::from_millis(2500)).await;
    tokio::task::yield_now().await;
    assert!(h.app.rx.try_recv().is_err());
    h.app.expire_notice(first_generation);
    assert!(h.app.notice.visible);
    assert_eq!(h.app.notice.link, "b.com");

    let event = h.app.rx.recv().await.unwrap();
    handle_app_event(&mut h.app, event);
    assert!(!h.app.notice.visible);
}

#[tokio::test]
async fn test_launch_opens_link_as_is() {
    let mut h = Harness::with_links(&["https://a.com", ""]).await;
    h.app.dispatch(RowAction::Launch(0));
    h.app.dispatch(RowAction::Launch(1));
    assert_eq!(*h.launcher.opened.lock().unwrap(), vec!["https://a.com", ""]);
}

#[tokio::test]
async fn test_keyboard_add_and_edit() {
    let mut h = Harness::with_links(&["a.com"]).await;

    assert!(!handle_key_event(&mut h.app, key(KeyCode::Char('a'))).unwrap());
    assert_eq!(h.app.input_mode, InputMode::Editing);
    assert_eq!(h.app.selected, 1);

    for c in "b.cox".chars() {
        handle_key_event(&mut h.app, key(KeyCode::Char(c))).unwrap();
    }
    handle_key_event(&mut h.app, key(KeyCode::Backspace)).unwrap();
    handle_key_event(&mut h.app, key(KeyCode::Char('m'))).unwrap();
    assert_eq!(h.app.links, vec!["a.com", "b.com"]);

    handle_key_event(&mut h.app, ctrl('u')).unwrap();
    handle_key_event(&mut h.app, ctrl('v')).unwrap();
    assert_eq!(h.app.links[1], "pasted.org");

    handle_key_event(&mut h.app, key(KeyCode::Enter)).unwrap();
    assert_eq!(h.app.input_mode, InputMode::Normal);
    h.assert_persisted().await;
}

#[tokio::test]
async fn test_keyboard_row_actions() {
    let mut h = Harness::with_links(&["a.com", "b.com", "c.com"]).await;

    handle_key_event(&mut h.app, key(KeyCode::Char('j'))).unwrap();
    handle_key_event(&mut h.app, key(KeyCode::Char('c'))).unwrap();
    assert_eq!(h.app.notice.link, "b.com");

    handle_key_event(&mut h.app, key(KeyCode::Char('o'))).unwrap();
    assert_eq!(*h.launcher.opened.lock().unwrap(), vec!["b.com"]);

    handle_key_event(&mut h.app, key(KeyCode::Char('k'))).unwrap();
    handle_key_event(&mut h.app, key(KeyCode::Char('k'))).unwrap();
    assert_eq!(h.app.selected, 2);
    handle_key_event(&mut h.app, key(KeyCode::Char('d'))).unwrap();
    assert_eq!(h.app.links, vec!["a.com", "b.com"]);
    assert_eq!(h.app.selected, 1);

    handle_key_event(&mut h.app, key(KeyCode::Char('t'))).unwrap();
    assert!(!h.app.dark_mode);

    assert!(handle_key_event(&mut h.app, key(KeyCode::Char('q'))).unwrap());
    h.assert_persisted().await;
}

#[tokio::test]
async fn test_removing_last_link_leaves_edit_mode() {
    let mut h = Harness::with_links(&[]).await;
    handle_key_event(&mut h.app, key(KeyCode::Char('a'))).unwrap();
    h.app.remove(0);
    assert_eq!(h.app.input_mode, InputMode::Normal);
    assert_eq!(h.app.selected, 0);
    // Editing keys with no row fall back to normal mode.
    h.app.input_mode = InputMode::Editing;
    handle_key_event(&mut h.app, key(KeyCode::Char('x'))).unwrap();
    assert_eq!(h.app.input_mode, InputMode::Normal);
    assert!(h.app.links.is_empty());
}

#[tokio::test]
async fn test_mouse_clicks_hit_row_buttons() {
    let mut h = Harness::with_links(&["a.com", "b.com"]).await;
    let area = Rect::new(0, 0, 60, 20);
    let layout = popup_layout(area, h.app.links.len(), h.app.selected);
    let (_, second) = layout.rows[1];

    handle_mouse_event(&mut h.app, click(second.copy.x + 1, second.copy.y + 1), area).unwrap();
    assert_eq!(h.app.notice.link, "b.com");
    assert_eq!(h.app.selected, 1);

    handle_mouse_event(&mut h.app, click(second.remove.x + 1, second.remove.y + 1), area).unwrap();
    assert_eq!(h.app.links, vec!["a.com"]);

    handle_mouse_event(
        &mut h.app,
        click(layout.add_button.x + 1, layout.add_button.y + 1),
        area,
    )
    .unwrap();
    assert_eq!(h.app.links, vec!["a.com", ""]);
    assert_eq!(h.app.input_mode, InputMode::Editing);

    handle_mouse_event(&mut h.app, click(layout.toggle.x + 1, layout.toggle.y + 1), area).unwrap();
    assert!(!h.app.dark_mode);
    h.assert_persisted().await;
}

#[tokio::test]
async fn test_ui_rendering() {
    let mut h = Harness::with_links(&["rust-lang.org", "docs.rs"]).await;

    let screen = render(&h.app, 60, 20);
    assert!(screen.contains("Quick Links"));
    assert!(screen.contains("rust-lang.org"));
    assert!(screen.contains("docs.rs"));
    assert!(screen.contains("Add Link!"));
    assert!(!screen.contains("Copied"));

    h.app.copy(1);
    let screen = render(&h.app, 60, 20);
    assert!(screen.contains("Copied docs.rs"));
}

#[tokio::test]
async fn test_ui_rendering_uses_theme_background() {
    let mut h = Harness::with_storage(MemoryStorage::new()).await;
    let backend = TestBackend::new(40, 12);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal.draw(|f| ui(f, &h.app)).unwrap();
    assert_eq!(
        terminal.backend().buffer()[(0, 0)].bg,
        ThemeVariables::DARK.background
    );

    h.app.toggle_theme();
    terminal.draw(|f| ui(f, &h.app)).unwrap();
    assert_eq!(
        terminal.backend().buffer()[(0, 0)].bg,
        ThemeVariables::LIGHT.background
    );
}

#[tokio::test]
async fn test_file_storage_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("quick_links.json");

    let make_app = |path: std::path::PathBuf| {
        let (tx, rx) = mpsc::channel(10);
        App::new(
            tx,
            rx,
            Arc::new(JsonFileStorage::new(path)),
            Box::new(RecordingClipboard::default()),
            Box::new(RecordingLauncher::default()),
        )
    };

    let mut app = make_app(path.clone());
    app.load().await;
    app.add();
    app.update(0, "a.com".to_string());
    app.toggle_theme();
    app.settle().await;

    let mut reopened = make_app(path);
    reopened.load().await;
    assert_eq!(reopened.links, vec!["a.com"]);
    assert!(!reopened.dark_mode);
    assert_eq!(reopened.theme, ThemeVariables::LIGHT);
}

#[tokio::test]
async fn test_remove_above_selection_keeps_same_link_selected() {
    let mut h = Harness::with_links(&["a.com", "b.com", "c.com"]).await;
    h.app.selected = 2;

    h.app.remove(0);
    assert_eq!(h.app.links, vec!["b.com", "c.com"]);
    assert_eq!(h.app.selected, 1);
    assert_eq!(h.app.selected_link(), Some("c.com"));

    h.app.remove(1);
    assert_eq!(h.app.selected, 0);
    assert_eq!(h.app.selected_link(), Some("b.com"));
    h.assert_persisted().await;
}

#[tokio::test]
async fn test_scrolling_ends_edit_mode() {
    let mut h = Harness::with_links(&["a.com", "b.com"]).await;
    let area = Rect::new(0, 0, 60, 20);
    handle_key_event(&mut h.app, key(KeyCode::Char('e'))).unwrap();
    assert_eq!(h.app.input_mode, InputMode::Editing);

    let scroll = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 5,
        row: 5,
        modifiers: KeyModifiers::empty(),
    };
    handle_mouse_event(&mut h.app, scroll, area).unwrap();
    assert_eq!(h.app.input_mode, InputMode::Normal);
    assert_eq!(h.app.selected, 1);

    // Typing now is a normal-mode command, not text for either row.
    handle_key_event(&mut h.app, key(KeyCode::Char('z'))).unwrap();
    assert_eq!(h.app.links, vec!["a.com", "b.com"]);
}

#[tokio::test]
async fn test_corrupt_store_file_is_rewritten_by_the_next_edit() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("quick_links.json");
    std::fs::write(&path, r#"{"links": ["a.com""#).unwrap();

    let (tx, rx) = mpsc::channel(10);
    let mut app = App::new(
        tx,
        rx,
        Arc::new(JsonFileStorage::new(path.clone())),
        Box::new(RecordingClipboard::default()),
        Box::new(RecordingLauncher::default()),
    );
    app.load().await;
    app.add();
    app.update(0, "b.com".to_string());
    app.toggle_theme();
    app.settle().await;

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk[LINKS_KEY], json!(["b.com"]));
    assert_eq!(on_disk[DARK_MODE_KEY], json!(false));
}
