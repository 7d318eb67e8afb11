//! The panel tree: controllers in rows, folders nested by name.
//!
//! A panel owns its controllers and its folders outright; there are no
//! parent links. Anything addressed from the root uses a path, the
//! folder names followed by the controller name, separated by `/`:
//!
//! ```text
//! speed            root controller
//! Camera/width     controller `width` in folder `Camera`
//! ```
//!
//! Pointer events are offered to every controller in the tree, since a
//! drag keeps tracking wherever the pointer goes. Presses stop at closed
//! panels; moves and releases do not, so a drag still ends if its folder
//! was closed mid-gesture.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use knob_input::{Event, KeyEvent, PointerEvent, PointerEventKind};

use crate::controller::{Controller, Kind};
use crate::error::{ControlError, Result};
use crate::params::{ControllerParams, PanelDescription};

/// Separator between folder names and the controller name in a path.
pub const PATH_SEPARATOR: char = '/';

/// Chrome label of the readonly toggle while the controller is readonly.
pub const TOGGLE_EDIT: &str = "edit";

/// Chrome label of the readonly toggle while the controller is editable.
pub const TOGGLE_LOCK: &str = "x";

// ─── Row ─────────────────────────────────────────────────────────────────────

/// What the panel draws around one controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub kind: Kind,
    /// Info badge text.
    pub info: Option<String>,
    /// Readonly toggle label, for editable controllers only.
    pub toggle: Option<&'static str>,
    /// The value differs from the last recorded previous value.
    pub modified: bool,
    /// One-line rendering of the controller's widget.
    pub summary: String,
}

// ─── Panel ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Panel {
    name: Option<String>,
    closed: bool,
    controllers: Vec<Box<dyn Controller>>,
    folders: Vec<Panel>,
}

impl Panel {
    /// An empty, open root panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty root panel with a title.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    // ─── Composition ─────────────────────────────────────────────────────

    /// Append a controller row.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::NameTaken`] if a sibling controller or
    /// folder already uses the controller's name.
    pub fn add(&mut self, controller: Box<dyn Controller>) -> Result<&mut dyn Controller> {
        if self.name_taken(controller.name()) {
            return Err(ControlError::NameTaken { name: controller.name().to_string() });
        }
        let index = self.controllers.len();
        self.controllers.push(controller);
        Ok(&mut *self.controllers[index])
    }

    /// Build a controller from parameters and append it.
    ///
    /// # Errors
    ///
    /// See [`ControllerParams::build`] and [`add`](Self::add).
    pub fn add_params(&mut self, params: &ControllerParams) -> Result<&mut dyn Controller> {
        let controller = params.build()?;
        self.add(controller)
    }

    /// Detach the first controller named `name`.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Controller>> {
        let index = self.controllers.iter().position(|c| c.name() == name)?;
        Some(self.controllers.remove(index))
    }

    /// Add an empty, open folder.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::FolderExists`] if a folder of this panel
    /// already uses `name`, or [`ControlError::NameTaken`] if a controller
    /// does. Saved state keys folders and controllers by the same names.
    pub fn add_folder(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let name = name.into();
        self.check_folder_name(&name)?;
        debug!(parent = self.name.as_deref().unwrap_or("<root>"), folder = %name, "folder added");
        let index = self.folders.len();
        self.folders.push(Self::named(name));
        Ok(&mut self.folders[index])
    }

    fn name_taken(&self, name: &str) -> bool {
        self.controller(name).is_some() || self.folder(name).is_some()
    }

    fn check_folder_name(&self, name: &str) -> Result<()> {
        if self.folder(name).is_some() {
            return Err(ControlError::FolderExists { name: name.to_string() });
        }
        if self.controller(name).is_some() {
            return Err(ControlError::NameTaken { name: name.to_string() });
        }
        Ok(())
    }

    #[must_use]
    pub fn folder(&self, name: &str) -> Option<&Self> {
        self.folders.iter().find(|f| f.name() == Some(name))
    }

    pub fn folder_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.folders.iter_mut().find(|f| f.name() == Some(name))
    }

    pub fn folders(&self) -> impl Iterator<Item = &Self> {
        self.folders.iter()
    }

    pub fn controllers(&self) -> impl Iterator<Item = &dyn Controller> {
        self.controllers.iter().map(|c| -> &dyn Controller { c.as_ref() })
    }

    #[must_use]
    pub fn controller(&self, name: &str) -> Option<&dyn Controller> {
        self.controllers().find(|c| c.name() == name)
    }

    pub fn controller_mut(&mut self, name: &str) -> Option<&mut dyn Controller> {
        let controller = self.controllers.iter_mut().find(|c| c.name() == name)?;
        Some(&mut **controller)
    }

    // ─── Paths ───────────────────────────────────────────────────────────

    /// The controller at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::UnknownFolder`] or
    /// [`ControlError::UnknownController`] for the first missing segment.
    pub fn find(&self, path: &str) -> Result<&dyn Controller> {
        let (folders, name) = split_path(path);
        let mut panel = self;
        for folder in folders {
            panel = panel
                .folder(folder)
                .ok_or_else(|| ControlError::UnknownFolder { name: folder.to_string() })?;
        }
        panel
            .controller(name)
            .ok_or_else(|| ControlError::UnknownController { name: path.to_string() })
    }

    /// # Errors
    ///
    /// See [`find`](Self::find).
    pub fn find_mut(&mut self, path: &str) -> Result<&mut dyn Controller> {
        let (folders, name) = split_path(path);
        let mut panel = self;
        for folder in folders {
            panel = panel
                .folder_mut(folder)
                .ok_or_else(|| ControlError::UnknownFolder { name: folder.to_string() })?;
        }
        panel
            .controller_mut(name)
            .ok_or_else(|| ControlError::UnknownController { name: path.to_string() })
    }

    /// Set the value of the controller at `path`.
    ///
    /// # Errors
    ///
    /// Path lookup errors, then whatever the controller rejects.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        self.find_mut(path)?.set_value(value)
    }

    /// Commit typed text to the controller at `path`.
    ///
    /// # Errors
    ///
    /// Path lookup errors, then whatever the controller rejects.
    pub fn submit_text(&mut self, path: &str, text: &str) -> Result<bool> {
        self.find_mut(path)?.submit_text(text)
    }

    /// A key pressed while the controller at `path` has focus.
    ///
    /// # Errors
    ///
    /// Path lookup errors, then whatever the controller rejects.
    pub fn key(&mut self, path: &str, key: &KeyEvent) -> Result<bool> {
        self.find_mut(path)?.handle_key(key)
    }

    // ─── Open / close ────────────────────────────────────────────────────

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn open(&mut self) {
        self.closed = false;
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    /// A click on the folder title.
    pub fn toggle_closed(&mut self) {
        self.closed = !self.closed;
    }

    // ─── Row chrome ──────────────────────────────────────────────────────

    /// Chrome for this panel's own controllers, in row order.
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        self.controllers()
            .map(|c| Row {
                name: c.name().to_string(),
                kind: c.kind(),
                info: c.core().info().map(str::to_string),
                toggle: c
                    .core()
                    .editable()
                    .then(|| if c.readonly() { TOGGLE_EDIT } else { TOGGLE_LOCK }),
                modified: c.is_modified(),
                summary: c.widget().summary(),
            })
            .collect()
    }

    /// Flip readonly on the controller at `path`. Locking it also puts
    /// the value back to its initial value. Returns the new flag.
    ///
    /// # Errors
    ///
    /// Path lookup errors, then whatever the reset rejects.
    pub fn toggle_readonly(&mut self, path: &str) -> Result<bool> {
        let controller = self.find_mut(path)?;
        let readonly = !controller.readonly();
        controller.set_readonly(readonly);
        if readonly {
            controller.reset_value(false)?;
        }
        Ok(readonly)
    }

    /// A click on the controller's widget. A locked editable controller
    /// unlocks; returns whether it did.
    ///
    /// # Errors
    ///
    /// Path lookup errors.
    pub fn click_controller(&mut self, path: &str) -> Result<bool> {
        let controller = self.find(path)?;
        if !(controller.core().editable() && controller.readonly()) {
            return Ok(false);
        }
        self.toggle_readonly(path)?;
        Ok(true)
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Offer a pointer event to the controllers in the tree, in row order.
    /// Moves and releases reach every controller; a press stops at the
    /// first one that takes it. Returns whether any consumed the event.
    ///
    /// # Errors
    ///
    /// The first drag session error stops the walk.
    pub fn pointer(&mut self, event: &PointerEvent) -> Result<bool> {
        let press = matches!(event.kind, PointerEventKind::Press(_));
        if self.closed && press {
            return Ok(false);
        }
        let mut consumed = false;
        for controller in &mut self.controllers {
            consumed |= controller.pointer(event)?;
            if consumed && press {
                return Ok(true);
            }
        }
        for folder in &mut self.folders {
            consumed |= folder.pointer(event)?;
            if consumed && press {
                return Ok(true);
            }
        }
        Ok(consumed)
    }

    /// Route one host event: pointer events to the whole tree, keys to
    /// the controller at `focus`. Keys with nothing focused are dropped.
    ///
    /// # Errors
    ///
    /// See [`pointer`](Self::pointer) and [`key`](Self::key).
    pub fn dispatch(&mut self, focus: Option<&str>, event: &Event) -> Result<bool> {
        match (event, focus) {
            (Event::Pointer(pointer), _) => self.pointer(pointer),
            (Event::Key(key), Some(path)) => self.key(path, key),
            (Event::Key(_), None) => Ok(false),
        }
    }

    // ─── Save / load ─────────────────────────────────────────────────────

    /// Current values, `name → value`, folders nested under their names.
    #[must_use]
    pub fn save(&self) -> Map<String, Value> {
        let mut saved = Map::new();
        for controller in &self.controllers {
            saved.insert(controller.name().to_string(), controller.value().clone());
        }
        for folder in &self.folders {
            saved.insert(folder.name().unwrap_or_default().to_string(), Value::Object(folder.save()));
        }
        saved
    }

    /// Set every value named in `saved`. Names this panel does not have
    /// are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Whatever a controller rejects; values before it stay applied.
    pub fn load(&mut self, saved: &Map<String, Value>) -> Result<()> {
        for (name, value) in saved {
            if let Some(controller) = self.controller_mut(name) {
                controller.set_value(value.clone())?;
            } else if let (Some(folder), Value::Object(nested)) = (self.folder_mut(name), value) {
                folder.load(nested)?;
            } else {
                warn!(name = %name, "skipping saved value with no matching controller");
            }
        }
        Ok(())
    }

    // ─── Descriptions ────────────────────────────────────────────────────

    /// Build a panel tree from its description.
    ///
    /// # Errors
    ///
    /// The first controller that fails to build or to be added, then
    /// [`ControlError::FolderExists`] or [`ControlError::NameTaken`] for a
    /// folder name a sibling already uses.
    pub fn from_description(description: &PanelDescription) -> Result<Self> {
        let mut panel = Self {
            name: description.name.clone(),
            closed: description.closed,
            ..Self::default()
        };
        for params in &description.controllers {
            panel.add_params(params)?;
        }
        for folder in &description.folders {
            panel.check_folder_name(folder.name.as_deref().unwrap_or_default())?;
            panel.folders.push(Self::from_description(folder)?);
        }
        Ok(panel)
    }

    /// The description that rebuilds this tree with its current values.
    #[must_use]
    pub fn describe(&self) -> PanelDescription {
        PanelDescription {
            name: self.name.clone(),
            closed: self.closed,
            controllers: self.controllers.iter().map(|c| c.describe()).collect(),
            folders: self.folders.iter().map(Self::describe).collect(),
        }
    }
}

fn split_path(path: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let name = segments.pop().unwrap_or_default();
    (segments, name)
}
