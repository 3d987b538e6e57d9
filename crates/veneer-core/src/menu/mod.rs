//! Popup menus and host context-menu translation.

mod context;
mod popup;

pub use context::{
    ContextMenuHost, MenuBuilder, MenuElement, MenuItemKind, MenuTarget, TargetKind,
    populate_menu_for_param,
};
pub use popup::{MenuAction, MenuEntry, MenuItem, PopupMenu};
