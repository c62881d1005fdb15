// Quick-edit link visibility, remembered in a cookie across page loads,
// plus the region show/hide toggle that shares the same style plumbing.

use chrono::{Duration, Utc};

use crate::modules::cookies::{get_cookie, set_cookie, AmbientCookies, Cookie};
use crate::modules::styles::{Display, StyleApplicator, StyleProperty};
use crate::settings::Settings;

pub const HIDE: &str = "HIDE";
pub const SHOW: &str = "SHOW";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickEdit {
    Hide,
    Show,
}

impl QuickEdit {
    /// Only the exact string `"HIDE"` hides; anything else shows.
    pub fn from_mode(mode: &str) -> Self {
        if mode == HIDE {
            Self::Hide
        } else {
            Self::Show
        }
    }
}

/// Switches the quick-edit links and persists `mode` as given.
pub fn quick_links<S, C>(mode: &str, settings: &Settings, styles: &mut S, cookies: &mut C)
where
    S: StyleApplicator + ?Sized,
    C: AmbientCookies + ?Sized,
{
    apply_quick_edit(QuickEdit::from_mode(mode), settings, styles);

    let mut cookie = Cookie::new(settings.quick_edit_cookie.as_str(), mode)
        .with_secure(settings.cookie_secure);
    if let Some(days) = settings.cookie_max_age_days {
        match Duration::try_days(days).and_then(|d| Utc::now().checked_add_signed(d)) {
            Some(expires) => cookie = cookie.with_expires(expires),
            None => log::warn!(
                "[QuickEdit] Cookie lifetime of {} days out of range, writing a session cookie",
                days
            ),
        }
    }
    if let Some(path) = &settings.cookie_path {
        cookie = cookie.with_path(path.as_str());
    }
    if let Some(domain) = &settings.cookie_domain {
        cookie = cookie.with_domain(domain.as_str());
    }
    set_cookie(cookies, &cookie);

    log::info!("[QuickEdit] Mode set to '{}'", mode);
}

/// Re-applies the remembered mode on page load. Returns the applied mode,
/// or `None` when no preference has been stored yet.
pub fn restore_quick_links<S, C>(settings: &Settings, styles: &mut S, cookies: &C) -> Option<QuickEdit>
where
    S: StyleApplicator + ?Sized,
    C: AmbientCookies + ?Sized,
{
    let mode = get_cookie(cookies, &settings.quick_edit_cookie)?;
    let edit = QuickEdit::from_mode(&mode);
    apply_quick_edit(edit, settings, styles);
    log::debug!("[QuickEdit] Restored '{}'", mode);
    Some(edit)
}

fn apply_quick_edit<S: StyleApplicator + ?Sized>(edit: QuickEdit, settings: &Settings, styles: &mut S) {
    let (links, hide_button, show_button) = match edit {
        QuickEdit::Hide => (Display::None, Display::None, Display::Inline),
        QuickEdit::Show => (Display::Inline, Display::Inline, Display::None),
    };

    let links = StyleProperty::Display(links);
    for tag in &settings.edit_link_tags {
        styles.apply_by_class(tag, &settings.edit_link_class, &links);
    }
    styles.apply_by_id(&settings.hide_edit_id, &StyleProperty::Display(hide_button));
    styles.apply_by_id(&settings.show_edit_id, &StyleProperty::Display(show_button));
}

/// Toggles a collapsible region and swaps its toggle image.
///
/// A region with no inline display is assumed hidden by its class, so the
/// first toggle opens it. Returns the new display, or `None` when the region
/// does not exist.
pub fn hide_show<S: StyleApplicator + ?Sized>(
    styles: &mut S,
    region_id: &str,
    image_id: &str,
    show_image: &str,
    hide_image: &str,
) -> Option<Display> {
    let current = styles.style_of(region_id, "display")?;

    let (display, image) = if current.is_empty() || current == "none" {
        (Display::Block, hide_image)
    } else {
        (Display::None, show_image)
    };
    styles.set_image_source(image_id, image);
    styles.apply_by_id(region_id, &StyleProperty::Display(display));
    Some(display)
}
