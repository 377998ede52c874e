//! Headless replay of window sizing scenarios.
//!
//! A scenario is a JSON file describing the monitor, the window's starting size
//! and chrome, the notes in the store, and a list of UI events. [`run`] drives a
//! [`NoteWindowSizing`] plus the browse panel over the simulator and reports the
//! window after every event, which makes sizing bugs reproducible without a
//! display.
//!
//! ```json
//! {
//!   "windowId": "main_0",
//!   "monitor": { "scaleFactor": 2.0, "workAreaHeight": 1000,
//!                "position": { "x": 0, "y": 0 }, "size": { "width": 1920, "height": 1080 } },
//!   "window": { "width": 800, "height": 230 },
//!   "chrome": { "editorContent": 40, "menuBar": 36, "header": 34,
//!               "topDivider": 1, "bottomDivider": 1 },
//!   "notes": [ { "id": "note_a", "title": "Groceries" } ],
//!   "activeNote": "note_a",
//!   "events": [
//!     { "type": "edit", "contentHeight": 128 },
//!     { "type": "userResize", "width": 800, "height": 600 },
//!     { "type": "doubleClick" }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use pollster::block_on;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::SizingConfig;
use crate::error::{Result, ResultExt, StickyError};
use crate::geometry::{MonitorGeometry, PhysicalPosition, PhysicalSize};
use crate::height::ChromeMeasurements;
use crate::logging;
use crate::note_window::{Navigation, NoteWindowSizing, WindowCommand};
use crate::notes::{
    open_new_note_window, BrowsePalette, MemoryNoteStore, Note, NoteId, NoteStore, PanelKey,
};
use crate::scroll_shadow::ScrollMetrics;
use crate::session::MANUAL_RESIZE_KEY;
use crate::simulator::{SimulatedEditor, SimulatedSpawner, SimulatedWindow};
use crate::transaction::Transaction;
use crate::window_storage::WindowStorage;

fn default_window_id() -> String {
    "main_0".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default = "default_window_id")]
    pub window_id: String,
    pub monitor: MonitorGeometry,
    pub window: PhysicalSize,
    pub chrome: ChromeMeasurements,
    /// Seed the persisted manual resize flag before the window opens
    #[serde(default)]
    pub manually_resized: Option<bool>,
    /// Notes in the store when the scenario starts
    #[serde(default)]
    pub notes: Vec<ScenarioNote>,
    /// Note shown when the scenario starts
    #[serde(default)]
    pub active_note: Option<NoteId>,
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StickyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A seeded note, given by its title text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioNote {
    pub id: NoteId,
    pub title: String,
}

impl ScenarioNote {
    fn to_note(&self) -> Note {
        let text = serde_json::json!({ "type": "text", "text": self.title });
        let doc = serde_json::json!({
            "type": "doc",
            "content": [{ "type": "paragraph", "content": [text] }]
        });
        let now = Utc::now();
        Note {
            id: self.id.clone(),
            content: doc.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScenarioEvent {
    /// The editor content relaid out to `content_height` after a transaction
    /// (a one-character insert unless given)
    Edit {
        content_height: f64,
        #[serde(default)]
        transaction: Option<Transaction>,
    },
    /// The user dragged a window edge
    UserResize { width: u32, height: u32 },
    Browser { open: bool },
    /// Typing in the browse panel's search field
    Search { query: String },
    /// A navigation key in the browse panel
    Key { key: PanelKey },
    DoubleClick,
    HeaderMouseDown,
    SelectNote { id: NoteId },
    DeleteNote { id: NoteId },
    NewWindow,
    /// The window regained focus
    Focus,
    Scroll {
        scroll_top: f64,
        scroll_height: f64,
        client_height: f64,
    },
    /// The window moved to another monitor, or lost it
    Monitor { monitor: Option<MonitorGeometry> },
    Command { command: WindowCommand },
}

impl ScenarioEvent {
    fn name(&self) -> &'static str {
        match self {
            ScenarioEvent::Edit { .. } => "edit",
            ScenarioEvent::UserResize { .. } => "userResize",
            ScenarioEvent::Browser { open: true } => "browserOpen",
            ScenarioEvent::Browser { open: false } => "browserClose",
            ScenarioEvent::Search { .. } => "search",
            ScenarioEvent::Key { .. } => "key",
            ScenarioEvent::DoubleClick => "doubleClick",
            ScenarioEvent::HeaderMouseDown => "headerMouseDown",
            ScenarioEvent::SelectNote { .. } => "selectNote",
            ScenarioEvent::DeleteNote { .. } => "deleteNote",
            ScenarioEvent::NewWindow => "newWindow",
            ScenarioEvent::Focus => "focus",
            ScenarioEvent::Scroll { .. } => "scroll",
            ScenarioEvent::Monitor { .. } => "monitor",
            ScenarioEvent::Command { .. } => "command",
        }
    }
}

/// Window and editor state after one event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub index: usize,
    pub event: String,
    pub outcome: String,
    pub size: PhysicalSize,
    pub position: PhysicalPosition,
    pub manually_resized: bool,
    pub scrollable: bool,
    pub top_divider_opacity: f64,
    pub bottom_divider_opacity: f64,
    pub active_note: Option<NoteId>,
    /// Titles listed by the browse panel
    pub visible_notes: Vec<String>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<3} {:<15} {:<32} {}x{} @ ({}, {}) manual={} scroll={} shadows={:.2}/{:.2}",
            self.index,
            self.event,
            self.outcome,
            self.size.width,
            self.size.height,
            self.position.x,
            self.position.y,
            self.manually_resized,
            self.scrollable,
            self.top_divider_opacity,
            self.bottom_divider_opacity,
        )
    }
}

struct Replay {
    sizing: NoteWindowSizing<SimulatedWindow, SimulatedEditor>,
    store: MemoryNoteStore,
    palette: BrowsePalette,
    spawner: SimulatedSpawner,
    active_note: Option<NoteId>,
}

impl Replay {
    fn new(scenario: &Scenario, storage: Arc<dyn WindowStorage>, config: SizingConfig) -> Self {
        let sizing = NoteWindowSizing::open(
            &scenario.window_id,
            storage,
            SimulatedWindow::new(scenario.window_id.clone(), scenario.window, scenario.monitor),
            SimulatedEditor::new(scenario.chrome),
            config,
        );
        sizing.editor().set_empty(false);

        let store = MemoryNoteStore::new();
        for note in &scenario.notes {
            store.upsert(note.to_note()).warn_on_err();
        }

        let mut replay = Self {
            sizing,
            store,
            palette: BrowsePalette::new(),
            spawner: SimulatedSpawner::new(),
            active_note: scenario.active_note.clone(),
        };
        replay.refresh_palette();
        replay
    }

    fn refresh_palette(&mut self) {
        self.palette
            .refresh(&self.store, self.active_note.as_ref())
            .warn_on_err();
    }

    fn apply(&mut self, event: &ScenarioEvent) -> String {
        let sizing = &self.sizing;
        match event {
            ScenarioEvent::Edit {
                content_height,
                transaction,
            } => {
                sizing.editor().set_content_height(*content_height);
                let transaction = transaction.clone().unwrap_or_else(|| Transaction::insert(1));
                format!("{:?}", block_on(sizing.handle_transaction(&transaction)))
            }
            ScenarioEvent::UserResize { width, height } => {
                sizing.window().user_resize(PhysicalSize::new(*width, *height));
                "dragged".to_string()
            }
            ScenarioEvent::Browser { open } => {
                self.palette.set_open(*open);
                format!("{:?}", block_on(sizing.handle_browser_open_change(*open)))
            }
            ScenarioEvent::Search { query } => {
                self.palette.set_query(query);
                format!("{} matches", self.palette.visible().len())
            }
            ScenarioEvent::Key { key } => match self.palette.handle_key(*key) {
                Some(id) => {
                    let navigation = block_on(sizing.handle_note_selected(id));
                    self.navigate(navigation)
                }
                None => format!("focused {}", self.palette.selected_index()),
            },
            ScenarioEvent::DoubleClick => {
                format!("{:?}", block_on(sizing.handle_header_double_click()))
            }
            ScenarioEvent::HeaderMouseDown => {
                block_on(sizing.handle_header_mouse_down());
                "dragging".to_string()
            }
            ScenarioEvent::SelectNote { id } => {
                self.palette.set_open(false);
                let navigation = block_on(sizing.handle_note_selected(id.clone()));
                self.navigate(navigation)
            }
            ScenarioEvent::DeleteNote { id } => {
                if self.store.delete(id).warn_on_err().is_none() {
                    return "delete failed".to_string();
                }
                self.palette.remove(id);
                let navigation =
                    block_on(sizing.handle_note_deleted(id, self.active_note.as_ref()));
                match navigation {
                    Some(navigation) => {
                        self.palette.set_open(false);
                        self.navigate(navigation)
                    }
                    None => "deleted".to_string(),
                }
            }
            ScenarioEvent::NewWindow => {
                match open_new_note_window(
                    sizing.editor(),
                    &self.store,
                    &self.spawner,
                    sizing.config(),
                ) {
                    Ok(id) => format!("spawned {}", id),
                    Err(err) => err.user_message(),
                }
            }
            ScenarioEvent::Focus => {
                self.refresh_palette();
                format!("{} notes", self.palette.total_count())
            }
            ScenarioEvent::Scroll {
                scroll_top,
                scroll_height,
                client_height,
            } => {
                let opacity = sizing.handle_scroll(&ScrollMetrics {
                    scroll_top: *scroll_top,
                    scroll_height: *scroll_height,
                    client_height: *client_height,
                });
                format!("shadows {:.2}/{:.2}", opacity.top, opacity.bottom)
            }
            ScenarioEvent::Monitor { monitor } => {
                sizing.window().set_monitor(*monitor);
                "monitor changed".to_string()
            }
            ScenarioEvent::Command { command } => {
                block_on(sizing.handle_window_command(*command));
                format!("{:?}", command)
            }
        }
    }

    fn navigate(&mut self, navigation: Navigation) -> String {
        match navigation {
            Navigation::ToNote(id) => {
                let label = format!("open {}", id);
                self.active_note = Some(id);
                label
            }
            Navigation::ToNew => {
                self.active_note = None;
                "open new note".to_string()
            }
        }
    }

    fn report(&self, index: usize, event: &ScenarioEvent, outcome: String) -> StepReport {
        let window = self.sizing.window().snapshot();
        let editor = self.sizing.editor().snapshot();
        StepReport {
            index,
            event: event.name().to_string(),
            outcome,
            size: window.size,
            position: window.position,
            manually_resized: self.sizing.session().is_manually_resized(),
            scrollable: editor.scrollable,
            top_divider_opacity: editor.top_divider_opacity,
            bottom_divider_opacity: editor.bottom_divider_opacity,
            active_note: self.active_note.clone(),
            visible_notes: self
                .palette
                .visible()
                .iter()
                .map(|item| item.title.clone())
                .collect(),
        }
    }
}

/// Replay `scenario`, returning one report per event
#[instrument(skip_all, fields(window_id = %scenario.window_id, events = scenario.events.len()))]
pub fn run(
    scenario: &Scenario,
    storage: Arc<dyn WindowStorage>,
    config: SizingConfig,
) -> Vec<StepReport> {
    if let Some(flag) = scenario.manually_resized {
        storage
            .set(
                &scenario.window_id,
                MANUAL_RESIZE_KEY,
                if flag { "true" } else { "false" },
            )
            .warn_on_err();
    }

    let mut replay = Replay::new(scenario, storage, config);
    let mut reports = Vec::with_capacity(scenario.events.len());

    for (index, event) in scenario.events.iter().enumerate() {
        let outcome = replay.apply(event);
        let origins = replay.sizing.deliver_resize_events();
        let outcome = if origins.is_empty() {
            outcome
        } else {
            format!("{} {:?}", outcome, origins)
        };
        reports.push(replay.report(index, event, outcome));
    }

    logging::log(
        "REPLAY",
        &format!("{} replayed {} events", scenario.window_id, reports.len()),
    );
    reports
}
