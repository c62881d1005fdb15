// Dual-list shuttle - pure logic, no host imports.
// Moves selected options from one list box to another and keeps both sorted
// by their display label.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Options with an empty value are placeholders and never move.
    pub fn is_movable(&self) -> bool {
        !self.value.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionList {
    pub name: String,
    pub options: Vec<SelectOption>,
}

impl OptionList {
    pub fn new(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    pub fn select_all(&mut self) {
        for option in &mut self.options {
            option.selected = true;
        }
    }

    pub fn select_label(&mut self, label: &str) {
        for option in self.options.iter_mut().filter(|o| o.label == label) {
            option.selected = true;
        }
    }

    pub fn selected_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect()
    }
}

/// Default string ordering of a browser list sort: UTF-16 code units.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Moves the selected options of `source` into `destination`.
///
/// Algorithm:
/// 1. With `move_all`, every source option counts as selected
/// 2. Build a label -> value table from destination, then source (source wins)
/// 3. Selected options with a non-empty value move, the rest stay
/// 4. Sort both label sets and rebuild the options from the table
///
/// Rebuilt options are unselected. Two options sharing a label end up with
/// the same value; use [`shuttle_stable`] when that matters.
pub fn shuttle(source: &mut OptionList, destination: &mut OptionList, move_all: bool) {
    if move_all {
        source.select_all();
    }

    let mut lookup: HashMap<&str, &str> = HashMap::new();
    let mut dest_labels: Vec<&str> = Vec::with_capacity(destination.options.len());
    for option in &destination.options {
        lookup.insert(&option.label, &option.value);
        dest_labels.push(&option.label);
    }

    let mut source_labels: Vec<&str> = Vec::new();
    for option in &source.options {
        lookup.insert(&option.label, &option.value);
        if option.selected && option.is_movable() {
            dest_labels.push(&option.label);
        } else {
            source_labels.push(&option.label);
        }
    }

    source_labels.sort_by(|a, b| compare_labels(a, b));
    dest_labels.sort_by(|a, b| compare_labels(a, b));

    let new_source = rehydrate(&source_labels, &lookup);
    let new_destination = rehydrate(&dest_labels, &lookup);

    log::debug!(
        "[Shuttle] '{}' -> '{}': {} staying, {} chosen",
        source.name,
        destination.name,
        new_source.len(),
        new_destination.len()
    );

    source.options = new_source;
    destination.options = new_destination;
}

fn rehydrate(labels: &[&str], lookup: &HashMap<&str, &str>) -> Vec<SelectOption> {
    labels
        .iter()
        .map(|label| {
            let value = lookup.get(label).copied().unwrap_or_else(|| {
                log::debug!("[Shuttle] No value for label '{}'", label);
                ""
            });
            SelectOption::new(value, *label)
        })
        .collect()
}

/// Same partition and ordering as [`shuttle`], but every option keeps its own
/// value through the sort, so duplicate labels do not collapse.
pub fn shuttle_stable(source: &mut OptionList, destination: &mut OptionList, move_all: bool) {
    let (moving, staying): (Vec<SelectOption>, Vec<SelectOption>) = source
        .options
        .drain(..)
        .partition(|o| (move_all || o.selected) && o.is_movable());

    let mut new_destination: Vec<SelectOption> = destination.options.drain(..).collect();
    new_destination.extend(moving);
    let mut new_source = staying;

    for list in [&mut new_source, &mut new_destination] {
        list.sort_by(|a, b| compare_labels(&a.label, &b.label));
        for option in list.iter_mut() {
            option.selected = false;
        }
    }

    source.options = new_source;
    destination.options = new_destination;
}
