use crate::modules::styles::{StyleApplicator, StyleProperty, Visibility};

const LIMIT_COLOR: &str = "red";
const WARN_COLOR: &str = "#EAA914";
const NORMAL_COLOR: &str = "black";

/// Result of counting a text area against its limit.
#[derive(Debug, Clone, PartialEq)]
pub struct CharCount {
    /// Text after truncation (unchanged when extra input is allowed).
    pub text: String,
    pub count: usize,
    pub max: usize,
    /// `None` when extra input is allowed and the colour is left alone.
    pub text_color: Option<&'static str>,
    pub counter_visible: bool,
    pub counter_color: &'static str,
}

/// Counts `text` against `max` in UTF-16 code units, the unit a browser text
/// area reports as its length, so `"😀"` counts as 2.
///
/// The fill percentage is taken before truncation, so a paste that overflows
/// the limit still colours the counter as full. Truncation never splits a
/// surrogate pair: a character straddling the limit is dropped whole.
pub fn char_count(text: &str, max: usize, allow_extra: bool) -> CharCount {
    let len = text.encode_utf16().count();
    let pct_full = len as f64 / max as f64 * 100.0;

    let (text, text_color) = if allow_extra {
        (text.to_string(), None)
    } else if len >= max {
        (truncate_utf16(text, max), Some(LIMIT_COLOR))
    } else {
        (text.to_string(), Some(NORMAL_COLOR))
    };
    let count = text.encode_utf16().count();

    let counter_color = if pct_full >= 90.0 {
        LIMIT_COLOR
    } else if pct_full >= 80.0 {
        WARN_COLOR
    } else {
        NORMAL_COLOR
    };

    CharCount {
        text,
        count,
        max,
        text_color,
        counter_visible: count > 0,
        counter_color,
    }
}

fn truncate_utf16(text: &str, max: usize) -> String {
    let mut units = 0;
    text.chars()
        .take_while(|c| {
            units += c.len_utf16();
            units <= max
        })
        .collect()
}

/// Pushes the counter colours and visibility onto the page.
///
/// Only styles go through [`StyleApplicator`]. The host writes
/// [`CharCount::text`] back into the text area and renders
/// [`CharCount::count`] and [`CharCount::max`] into its counter fields.
pub fn apply_char_count<S: StyleApplicator + ?Sized>(
    styles: &mut S,
    text_area_id: &str,
    counter_block_id: &str,
    state: &CharCount,
) {
    if let Some(color) = state.text_color {
        styles.apply_by_id(text_area_id, &StyleProperty::Color(color.to_string()));
    }
    let visibility = if state.counter_visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    styles.apply_by_id(counter_block_id, &StyleProperty::Visibility(visibility));
    styles.apply_by_id(counter_block_id, &StyleProperty::Color(state.counter_color.to_string()));
}
