// Per-page form state. Created when the form is rendered and dropped when the
// page navigates away; nothing here outlives a page load.

use serde::{Deserialize, Serialize};

use crate::modules::shuttle::{shuttle, shuttle_stable, OptionList};
use crate::settings::{Settings, DEFAULT_DELETE_MESSAGE, DEFAULT_DELETE_REQUEST, DEFAULT_LEAVE_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardState {
    Clean,
    Dirty,
    /// A submit is parked until the user answers the leave prompt.
    AwaitingConfirmation { request: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShuttleMode {
    /// Label lookup table, source value wins on duplicate labels.
    #[default]
    Legacy,
    /// Each option keeps its own value.
    Stable,
}

#[derive(Debug, Clone)]
pub struct FormSession {
    pub(crate) guard: GuardState,
    pub(crate) flow_lists: Vec<OptionList>,
    pub(crate) leave_message: String,
    pub(crate) delete_message: String,
    pub(crate) delete_request: String,
    pub shuttle_mode: ShuttleMode,
}

impl Default for FormSession {
    fn default() -> Self {
        Self {
            guard: GuardState::Clean,
            flow_lists: Vec::new(),
            leave_message: DEFAULT_LEAVE_MESSAGE.to_string(),
            delete_message: DEFAULT_DELETE_MESSAGE.to_string(),
            delete_request: DEFAULT_DELETE_REQUEST.to_string(),
            shuttle_mode: ShuttleMode::default(),
        }
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            leave_message: settings.leave_message.clone(),
            delete_message: settings.delete_message.clone(),
            delete_request: settings.delete_request.clone(),
            ..Self::default()
        }
    }

    pub fn guard_state(&self) -> &GuardState {
        &self.guard
    }

    /// True once any tracked input has changed on this page.
    pub fn is_dirty(&self) -> bool {
        !matches!(self.guard, GuardState::Clean)
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.guard, GuardState::AwaitingConfirmation { .. })
    }

    /// Input-change notification from a tracked item.
    /// Ignored while a leave prompt is open.
    pub fn item_changed(&mut self, item: &str) {
        if self.guard == GuardState::Clean {
            log::debug!("[FormSession] '{}' changed, form is now dirty", item);
            self.guard = GuardState::Dirty;
        }
    }

    /// Registers a list whose options are all posted on submit.
    /// A list with the same name is replaced.
    pub fn register_flow_list(&mut self, list: OptionList) {
        match self.flow_lists.iter_mut().find(|l| l.name == list.name) {
            Some(existing) => *existing = list,
            None => self.flow_lists.push(list),
        }
    }

    pub fn flow_lists(&self) -> &[OptionList] {
        &self.flow_lists
    }

    pub fn flow_list(&self, name: &str) -> Option<&OptionList> {
        self.flow_lists.iter().find(|l| l.name == name)
    }

    pub fn flow_list_mut(&mut self, name: &str) -> Option<&mut OptionList> {
        self.flow_lists.iter_mut().find(|l| l.name == name)
    }

    /// Marks every option of every registered list as selected.
    pub fn select_all(&mut self) {
        for list in &mut self.flow_lists {
            list.select_all();
        }
    }

    /// Shuttles between two registered lists by name.
    /// Returns false when either list is missing or both names are the same.
    pub fn shuttle_lists(&mut self, source: &str, destination: &str, move_all: bool) -> bool {
        let src_idx = self.flow_lists.iter().position(|l| l.name == source);
        let dst_idx = self.flow_lists.iter().position(|l| l.name == destination);
        let (Some(s), Some(d)) = (src_idx, dst_idx) else {
            return false;
        };
        if s == d {
            return false;
        }

        let (src, dst) = if s < d {
            let (left, right) = self.flow_lists.split_at_mut(d);
            (&mut left[s], &mut right[0])
        } else {
            let (left, right) = self.flow_lists.split_at_mut(s);
            (&mut right[0], &mut left[d])
        };

        match self.shuttle_mode {
            ShuttleMode::Legacy => shuttle(src, dst, move_all),
            ShuttleMode::Stable => shuttle_stable(src, dst, move_all),
        }
        true
    }
}
