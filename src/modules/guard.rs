// Unsaved-change guard and the submit helpers built on it.
// All of these hand a request code to the page's submit mechanism; the guard
// decides whether the user has to confirm first.

use std::future::Future;

use crate::modules::shuttle::OptionList;
use crate::state::{FormSession, GuardState};

const ENTER_KEY: u32 = 13;

/// Page-level submission mechanism.
pub trait Submit {
    /// Posts the page with `request` as the request code. `lists` carries the
    /// registered flow-select lists, already fully selected.
    fn submit(&mut self, request: &str, lists: &[OptionList]);

    /// Closes the current popup window. Hosts without popups ignore it.
    fn close_window(&mut self) {}
}

/// Blocking yes/no prompt.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// The leave prompt must be shown with this message; answer through
    /// [`FormSession::resolve_confirmation`].
    AwaitingConfirmation(String),
    Cancelled,
    /// Nothing was pending, or a prompt was already open.
    Ignored,
}

impl FormSession {
    /// Selects every option of the flow lists and posts the page.
    pub fn do_submit<S: Submit + ?Sized>(&mut self, request: &str, submitter: &mut S) {
        self.select_all();
        log::info!("[Guard] Submitting request '{}'", request);
        submitter.submit(request, &self.flow_lists);
    }

    fn leave_message_or_default(&self, message: Option<&str>) -> String {
        match message {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self.leave_message.clone(),
        }
    }

    /// Submits, asking first when the form has unsaved changes.
    /// Returns whether the page was submitted; a declined prompt changes nothing.
    pub fn go_submit<C, S>(
        &mut self,
        request: &str,
        message: Option<&str>,
        confirm: &mut C,
        submitter: &mut S,
    ) -> bool
    where
        C: Confirm + ?Sized,
        S: Submit + ?Sized,
    {
        match self.request_submit(request, message, submitter) {
            SubmitOutcome::Submitted => true,
            SubmitOutcome::AwaitingConfirmation(msg) => {
                let accepted = confirm.confirm(&msg);
                self.resolve_confirmation(accepted, submitter) == SubmitOutcome::Submitted
            }
            SubmitOutcome::Cancelled | SubmitOutcome::Ignored => false,
        }
    }

    /// First half of a non-blocking guarded submit.
    ///
    /// A clean form is submitted at once. A dirty form parks the request and
    /// returns the prompt text; until [`resolve_confirmation`] is called, other
    /// submits and input changes are ignored.
    ///
    /// [`resolve_confirmation`]: FormSession::resolve_confirmation
    pub fn request_submit<S: Submit + ?Sized>(
        &mut self,
        request: &str,
        message: Option<&str>,
        submitter: &mut S,
    ) -> SubmitOutcome {
        match self.guard {
            GuardState::Clean => {
                self.do_submit(request, submitter);
                SubmitOutcome::Submitted
            }
            GuardState::Dirty => {
                let message = self.leave_message_or_default(message);
                log::debug!("[Guard] Unsaved changes, confirming '{}'", request);
                self.guard = GuardState::AwaitingConfirmation {
                    request: request.to_string(),
                    message: message.clone(),
                };
                SubmitOutcome::AwaitingConfirmation(message)
            }
            GuardState::AwaitingConfirmation { .. } => {
                log::debug!("[Guard] Prompt already open, ignoring '{}'", request);
                SubmitOutcome::Ignored
            }
        }
    }

    /// Second half of a non-blocking guarded submit.
    pub fn resolve_confirmation<S: Submit + ?Sized>(
        &mut self,
        accepted: bool,
        submitter: &mut S,
    ) -> SubmitOutcome {
        let request = match &self.guard {
            GuardState::AwaitingConfirmation { request, .. } => request.clone(),
            _ => return SubmitOutcome::Ignored,
        };
        self.guard = GuardState::Dirty;

        if accepted {
            self.do_submit(&request, submitter);
            SubmitOutcome::Submitted
        } else {
            log::debug!("[Guard] Leave declined for '{}'", request);
            SubmitOutcome::Cancelled
        }
    }

    /// Guarded submit for hosts whose prompt answers asynchronously.
    /// The session stays borrowed until the answer arrives, so nothing else
    /// can act on the form in between.
    pub async fn go_submit_async<F, Fut, S>(
        &mut self,
        request: &str,
        message: Option<&str>,
        confirm: F,
        submitter: &mut S,
    ) -> bool
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = bool>,
        S: Submit + ?Sized,
    {
        match self.request_submit(request, message, submitter) {
            SubmitOutcome::Submitted => true,
            SubmitOutcome::AwaitingConfirmation(msg) => {
                let accepted = confirm(msg).await;
                self.resolve_confirmation(accepted, submitter) == SubmitOutcome::Submitted
            }
            SubmitOutcome::Cancelled | SubmitOutcome::Ignored => false,
        }
    }

    /// Always asks before submitting a delete, dirty or not.
    /// `None` picks the configured message and request code.
    pub fn confirm_delete<C, S>(
        &mut self,
        message: Option<&str>,
        request: Option<&str>,
        confirm: &mut C,
        submitter: &mut S,
    ) -> bool
    where
        C: Confirm + ?Sized,
        S: Submit + ?Sized,
    {
        let message = message.map_or_else(|| self.delete_message.clone(), str::to_string);
        let request = request.map_or_else(|| self.delete_request.clone(), str::to_string);

        if !confirm.confirm(&message) {
            return false;
        }
        self.do_submit(&request, submitter);
        true
    }

    /// [`confirm_delete`](FormSession::confirm_delete) for popups: closes the
    /// window after a confirmed submit.
    pub fn confirm_delete_and_close<C, S>(
        &mut self,
        message: Option<&str>,
        request: Option<&str>,
        confirm: &mut C,
        submitter: &mut S,
    ) -> bool
    where
        C: Confirm + ?Sized,
        S: Submit + ?Sized,
    {
        let submitted = self.confirm_delete(message, request, confirm, submitter);
        if submitted {
            submitter.close_window();
        }
        submitted
    }

    /// Key handler for items that submit on Enter, using the item id as the
    /// request code. Returns whether the key event should continue.
    pub fn submit_on_enter<S: Submit + ?Sized>(
        &mut self,
        item_id: &str,
        key_code: Option<u32>,
        submitter: &mut S,
    ) -> bool {
        match key_code {
            Some(ENTER_KEY) => {
                self.do_submit(item_id, submitter);
                false
            }
            _ => true,
        }
    }
}
