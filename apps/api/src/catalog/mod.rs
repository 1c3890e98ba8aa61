// Generic list/form admin workflow shared by every content kind.
// store: ordered records; form: working copy + commit; panel: browse/edit mode.

pub mod form;
pub mod panel;
pub mod store;

pub use form::{Commit, FormController, FormError};
pub use panel::{AdminPanel, PanelSnapshot};
pub use store::{EntityStore, SharedStore, StoreError};
