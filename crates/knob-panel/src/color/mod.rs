//! Color controller: a swatch, a text field and an HSV picker.
//!
//! The controller keeps a live [`Color`] beside its bound value. The
//! value is what callers see; the color is what the picker edits, and it
//! remembers channels the value's representation cannot carry (the hue
//! of a gray, say).
//!
//! - An external `set_value` is reconciled into the color: channels are
//!   replaced only when the two disagree.
//! - A drag frame writes channels into the color and pushes the color's
//!   serialization out as the value, firing change on every frame.
//! - Text that is not a color, typed or set, leaves everything as it was
//!   and puts the last good text back.
//!
//! Picker surfaces are hit-tested against bounds the layout layer hands
//! in through [`ColorController::set_layout`].

mod display;
mod mapping;

pub use display::render;
pub use mapping::{alpha_at, hue_at, saturation_value_at};

use serde_json::Value;
use tracing::{trace, warn};

use knob_color::{Color, interpret};
use knob_input::{DragTracker, Draggable, KeyCode, KeyEvent, Point, PointerEvent, Rect, route};

use crate::controller::{Controller, Core, Kind};
use crate::error::Result;
use crate::params::ControllerParams;
use crate::widget::Widget;

// ─── Layout ──────────────────────────────────────────────────────────────────

/// The three draggable parts of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerSurface {
    SaturationValue,
    Hue,
    Alpha,
}

/// Where the picker surfaces sit, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerLayout {
    pub field: Rect,
    pub hue: Rect,
    pub alpha: Rect,
}

impl Default for PickerLayout {
    /// A 100×100 field with the hue rail to its right and the alpha rail
    /// underneath.
    fn default() -> Self {
        Self {
            field: Rect::new(0.0, 0.0, 100.0, 100.0),
            hue: Rect::new(103.0, 0.0, 16.0, 100.0),
            alpha: Rect::new(0.0, 103.0, 121.0, 16.0),
        }
    }
}

// ─── ColorController ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ColorController {
    core: Core,
    color: Color,
    picker_visible: bool,
    layout: PickerLayout,
    drags: DragTracker<PickerSurface>,
    /// Hue set by the last hue-rail frame and the rail position it came
    /// from. The top and bottom of the rail are both hue 0, so the knob
    /// follows the pointer while the hue is still the one it set.
    hue_frame: Option<(f64, f64)>,
    widget: Widget,
}

impl ColorController {
    /// # Errors
    ///
    /// Returns [`ControlError::Color`](crate::ControlError::Color) if
    /// `value` is not a color representation.
    pub fn new(name: impl Into<String>, value: Value) -> Result<Self> {
        let color = Color::from_value(&value)?;
        let mut controller = Self {
            core: Core::new(name, Kind::Color, value),
            color,
            picker_visible: false,
            layout: PickerLayout::default(),
            drags: DragTracker::new(),
            hue_frame: None,
            widget: Widget::default(),
        };
        controller.update_display();
        Ok(controller)
    }

    /// The live color.
    #[must_use]
    pub const fn color(&self) -> &Color {
        &self.color
    }

    #[must_use]
    pub const fn layout(&self) -> PickerLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: PickerLayout) {
        self.layout = layout;
    }

    #[must_use]
    pub const fn picker_visible(&self) -> bool {
        self.picker_visible
    }

    /// A click on the swatch.
    pub fn toggle_picker(&mut self) {
        self.picker_visible = !self.picker_visible;
        self.render();
    }

    /// Whether a drag is in progress on `surface`.
    #[must_use]
    pub fn dragging(&self, surface: PickerSurface) -> bool {
        self.drags.is_active(surface)
    }

    /// Write the color out as the value without reconciling it back.
    fn push(&mut self) {
        let value = self.color.to_value();
        self.core.assign(value, false);
        self.render();
    }

    fn render(&mut self) {
        let mut widget = render(&self.color, self.picker_visible, self.core.readonly());
        if let Some((hue, knob)) = self.hue_frame {
            #[allow(clippy::float_cmp)]
            let unchanged = hue == self.color.h();
            if unchanged {
                widget.hue_knob = knob;
            }
        }
        self.widget = Widget::Color(Box::new(widget));
    }
}

impl Draggable for ColorController {
    type Surface = PickerSurface;

    fn hit_test(&self, point: Point) -> Option<PickerSurface> {
        if !self.picker_visible || self.core.readonly() {
            return None;
        }
        [
            (self.layout.field, PickerSurface::SaturationValue),
            (self.layout.hue, PickerSurface::Hue),
            (self.layout.alpha, PickerSurface::Alpha),
        ]
        .into_iter()
        .find_map(|(rect, surface)| rect.contains(point).then_some(surface))
    }

    fn drag_to(&mut self, surface: PickerSurface, point: Point) {
        match surface {
            PickerSurface::SaturationValue => {
                let (s, v) = saturation_value_at(self.layout.field, point);
                self.color.set_s(s);
                self.color.set_v(v);
            }
            PickerSurface::Hue => {
                self.color.set_h(hue_at(self.layout.hue, point));
                self.hue_frame = Some((self.color.h(), self.layout.hue.fraction_y(point.y)));
            }
            PickerSurface::Alpha => self.color.set_a(alpha_at(self.layout.alpha, point)),
        }
        trace!(name = self.core.name(), ?surface, color = %self.color, "drag frame");
        self.push();
    }

    fn drag_end(&mut self, _surface: PickerSurface) {
        self.core.finish();
    }
}

impl Controller for ColorController {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// Values that are not colors are dropped with a warning; the
    /// display is refreshed so any stale text is replaced.
    fn set_value_with(&mut self, value: Value, silent: bool) -> Result<()> {
        if interpret(&value).is_none() {
            warn!(name = self.core.name(), %value, "ignoring unrecognized color");
            self.render();
            return Ok(());
        }
        self.core.assign(value, silent);
        self.update_display();
        Ok(())
    }

    fn update_display(&mut self) {
        trace!(name = self.core.name(), "refresh color");
        if let Some(i) = interpret(self.core.value()) {
            self.color.reconcile(&i);
        }
        self.render();
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn describe(&self) -> ControllerParams {
        ControllerParams::from_core(&self.core)
    }

    /// Recognized text replaces the channels it carries and is written
    /// back in the bound value's own family.
    fn submit_text(&mut self, text: &str) -> Result<bool> {
        let Some(i) = interpret(&Value::String(text.to_string())) else {
            warn!(name = self.core.name(), text, "reverting unrecognized color text");
            self.render();
            return Ok(true);
        };
        self.color.absorb(&i);
        self.push();
        self.core.finish();
        Ok(true)
    }

    /// Escape hides the picker.
    fn handle_key(&mut self, key: &KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Escape && self.picker_visible {
            self.toggle_picker();
            return Ok(true);
        }
        Ok(false)
    }

    fn pointer(&mut self, event: &PointerEvent) -> Result<bool> {
        let mut drags = std::mem::take(&mut self.drags);
        let routed = route(self, &mut drags, event);
        self.drags = drags;
        Ok(routed?)
    }
}
