use crate::constants::NOTICE_DURATION_MS;
use crate::models::{AppEvent, CopiedNotice, InputMode, RowAction, ThemeVariables};
use crate::services::{ClipboardService, Launcher};
use crate::storage::{
    StorageService, load_dark_mode, load_links, save_dark_mode, save_links,
};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Popup state: the link list, the copied-link notice and the theme. Every
/// mutation of the list or the flag is written back to storage.
pub struct App {
    pub links: Vec<String>,
    pub notice: CopiedNotice,
    pub dark_mode: bool,
    pub theme: ThemeVariables,
    pub selected: usize,
    pub input_mode: InputMode,
    pub tx: mpsc::Sender<AppEvent>,
    pub rx: mpsc::Receiver<AppEvent>,
    storage: Arc<dyn StorageService>,
    clipboard: Box<dyn ClipboardService>,
    launcher: Box<dyn Launcher>,
    pending_write: Option<JoinHandle<()>>,
    notice_timer: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(
        tx: mpsc::Sender<AppEvent>,
        rx: mpsc::Receiver<AppEvent>,
        storage: Arc<dyn StorageService>,
        clipboard: Box<dyn ClipboardService>,
        launcher: Box<dyn Launcher>,
    ) -> Self {
        let dark_mode = crate::constants::DEFAULT_DARK_MODE;
        Self {
            links: Vec::new(),
            notice: CopiedNotice::default(),
            dark_mode,
            theme: ThemeVariables::for_mode(dark_mode),
            selected: 0,
            input_mode: InputMode::Normal,
            tx,
            rx,
            storage,
            clipboard,
            launcher,
            pending_write: None,
            notice_timer: None,
        }
    }

    /// Replace in-memory state with whatever storage holds. A missing list
    /// leaves the current one alone; read failures are logged and skipped.
    pub async fn load(&mut self) {
        match load_links(self.storage.as_ref()).await {
            Ok(Some(links)) => self.links = links,
            Ok(None) => {}
            Err(e) => warn!("could not read stored links: {e}"),
        }
        match load_dark_mode(self.storage.as_ref()).await {
            Ok(flag) => self.dark_mode = flag,
            Err(e) => warn!("could not read stored theme: {e}"),
        }
        self.apply_theme();
        self.clamp_selection();
        debug!(links = self.links.len(), dark_mode = self.dark_mode, "state loaded");
    }

    pub fn add(&mut self) {
        self.links.push(String::new());
        self.selected = self.links.len() - 1;
        self.persist_links();
    }

    /// Out-of-range indices are ignored.
    pub fn update(&mut self, index: usize, text: String) {
        let Some(slot) = self.links.get_mut(index) else {
            return;
        };
        *slot = text;
        self.persist_links();
    }

    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index >= self.links.len() {
            return;
        }
        self.links.remove(index);
        // Keep the cursor on the same link when an earlier one goes away.
        if index < self.selected {
            self.selected -= 1;
        }
        self.clamp_selection();
        self.persist_links();
    }

    pub fn copy(&mut self, index: usize) {
        let Some(link) = self.links.get(index).cloned() else {
            return;
        };
        if let Err(e) = self.clipboard.set_text(&link) {
            warn!("copy to clipboard failed: {e}");
        }
        debug!(index, "link copied");

        self.notice.link = link;
        self.notice.visible = true;
        self.notice.generation += 1;
        self.schedule_notice_hide(self.notice.generation);
    }

    pub fn launch(&mut self, index: usize) {
        let Some(link) = self.links.get(index) else {
            return;
        };
        if let Err(e) = self.launcher.open(link) {
            warn!("{e}");
        }
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        let storage = Arc::clone(&self.storage);
        let dark_mode = self.dark_mode;
        self.queue_write("theme", async move {
            save_dark_mode(storage.as_ref(), dark_mode).await
        });
        self.apply_theme();
    }

    /// Entry point for row triggers.
    pub fn dispatch(&mut self, action: RowAction) {
        match action {
            RowAction::Copy(id) => self.copy(id),
            RowAction::Launch(id) => self.launch(id),
            RowAction::Remove(id) => self.remove(id),
            RowAction::Update(id, text) => self.update(id, text),
        }
    }

    /// Hide the notice if `generation` still names the latest copy.
    pub fn expire_notice(&mut self, generation: u64) {
        if generation == self.notice.generation {
            self.notice.visible = false;
        }
    }

    pub fn selected_link(&self) -> Option<&str> {
        self.links.get(self.selected).map(String::as_str)
    }

    pub fn select_next(&mut self) {
        if !self.links.is_empty() {
            self.selected = (self.selected + 1) % self.links.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.links.is_empty() {
            self.selected = if self.selected > 0 {
                self.selected - 1
            } else {
                self.links.len() - 1
            };
        }
    }

    pub fn clipboard_text(&mut self) -> Option<String> {
        match self.clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("paste unavailable: {e}");
                None
            }
        }
    }

    /// Wait for every write queued so far to land.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending_write.take() {
            let _ = handle.await;
        }
    }

    fn apply_theme(&mut self) {
        self.theme = ThemeVariables::for_mode(self.dark_mode);
    }

    fn clamp_selection(&mut self) {
        if self.links.is_empty() {
            self.selected = 0;
            self.input_mode = InputMode::Normal;
        } else if self.selected >= self.links.len() {
            self.selected = self.links.len() - 1;
        }
    }

    fn persist_links(&mut self) {
        let storage = Arc::clone(&self.storage);
        let links = self.links.clone();
        self.queue_write("links", async move {
            save_links(storage.as_ref(), &links).await
        });
    }

    // Each write waits for the one queued before it, so storage sees writes in
    // the order the mutations happened.
    fn queue_write<F>(&mut self, what: &'static str, write: F)
    where
        F: Future<Output = crate::error::Result<()>> + Send + 'static,
    {
        let previous = self.pending_write.take();
        self.pending_write = Some(tokio::spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            if let Err(e) = write.await {
                warn!("failed to persist {what}: {e}");
            }
        }));
    }

    fn schedule_notice_hide(&mut self, generation: u64) {
        if let Some(timer) = self.notice_timer.take() {
            timer.abort();
        }
        let tx = self.tx.clone();
        let deadline = tokio::time::Instant::now() + Duration::from_millis(NOTICE_DURATION_MS);
        self.notice_timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(AppEvent::NoticeExpired(generation)).await;
        }));
    }
}
