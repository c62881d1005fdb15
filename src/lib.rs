// Form Helpers Library Entry Point
// Client-side helpers for server-rendered form pages. Nothing here talks to
// a server; hosts plug in through the traits in `modules`.

// Configuration
pub mod settings;

// Per-page form state
pub mod state;

// Pure logic modules
pub mod modules;

pub use modules::cookies::{get_cookie, set_cookie, AmbientCookies, Cookie, DocumentCookies};
pub use modules::guard::{Confirm, Submit, SubmitOutcome};
pub use modules::preferences::{hide_show, quick_links, restore_quick_links, QuickEdit};
pub use modules::shuttle::{shuttle, shuttle_stable, OptionList, SelectOption};
pub use modules::styles::{Display, StyleApplicator, StyleProperty};
pub use settings::Settings;
pub use state::{FormSession, GuardState, ShuttleMode};
