//! Picker display state, derived from the live color on every refresh.

use knob_color::{Color, Direction, LinearGradient};

use crate::widget::{ColorWidget, FieldKnob};

/// Build the widget for `color`.
///
/// Gradients and knob positions are recomputed from the channels each
/// time; none of it is stored between refreshes.
#[must_use]
pub fn render(color: &Color, picker_visible: bool, disabled: bool) -> ColorWidget {
    let state = color.hsva();
    let mut temp = Color::new(state);

    temp.set_a(0.0);
    let clear = temp.to_css();
    temp.set_a(1.0);
    let opaque = temp.to_css();

    let flip = if state.v < 0.5 || state.s > 0.5 { 255 } else { 0 };
    let field_knob = FieldKnob {
        x: state.s,
        y: 1.0 - state.v,
        fill: opaque.clone(),
        border: format!("rgb({flip},{flip},{flip})"),
    };

    temp.set_s(1.0);
    temp.set_v(1.0);
    let pure = temp.to_css();

    let css = color.to_css();
    ColorWidget {
        text: css.clone(),
        swatch: css,
        picker_visible,
        field_gradient: LinearGradient::between(Direction::ToRight, "#fff", pure),
        value_gradient: LinearGradient::between(Direction::ToBottom, "rgba(0,0,0,0)", "#000"),
        hue_gradient: LinearGradient::hue_spectrum(),
        alpha_gradient: LinearGradient::between(Direction::ToRight, clear, opaque),
        field_knob,
        hue_knob: 1.0 - state.h / 360.0,
        alpha_knob: state.a,
        disabled,
    }
}
