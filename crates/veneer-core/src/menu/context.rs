//! Translation of host context menus into [`PopupMenu`]s.
//!
//! The host describes its menu by calling back into a builder once per
//! element, in document order. [`MenuBuilder`] receives those calls as
//! [`MenuElement`]s and materialises them into the caller's menu:
//!
//! ```text
//! host.populate(target) ──► MenuBuilder::add_item(element) × N
//!                               │
//!                               ├─ Entry / CheckEntry ─► item calling host.perform(target, action)
//!                               ├─ Separator / Title  ─► divider / section header
//!                               └─ Begin / EndSubmenu ─► push / pop the submenu stack
//! ```

use std::rc::Rc;

use super::popup::PopupMenu;

/// What a context menu applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// The plugin as a whole.
    Global,
    /// A single parameter.
    Param,
}

impl TargetKind {
    /// CLAP numeric tag of the kind.
    pub const fn as_raw(self) -> u32 {
        match self {
            TargetKind::Global => 0,
            TargetKind::Param => 1,
        }
    }
}

/// Target of a context menu: a kind and an identifier within that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuTarget {
    /// Kind of object targeted.
    pub kind: TargetKind,
    /// Identifier of the object (the parameter id for [`TargetKind::Param`]).
    pub id: u32,
}

impl MenuTarget {
    /// Target a parameter.
    pub const fn param(id: u32) -> Self {
        Self {
            kind: TargetKind::Param,
            id,
        }
    }
}

/// Kind tag of a menu element, matching the CLAP item kind values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemKind {
    /// Leaf entry.
    Entry,
    /// Leaf entry with a checkbox.
    CheckEntry,
    /// Divider.
    Separator,
    /// Start of a nested menu.
    BeginSubmenu,
    /// End of the innermost nested menu.
    EndSubmenu,
    /// Section header.
    Title,
}

impl MenuItemKind {
    /// Decode a CLAP item kind tag.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(MenuItemKind::Entry),
            1 => Some(MenuItemKind::CheckEntry),
            2 => Some(MenuItemKind::Separator),
            3 => Some(MenuItemKind::BeginSubmenu),
            4 => Some(MenuItemKind::EndSubmenu),
            5 => Some(MenuItemKind::Title),
            _ => None,
        }
    }

    /// CLAP tag of the kind.
    pub const fn as_raw(self) -> u32 {
        match self {
            MenuItemKind::Entry => 0,
            MenuItemKind::CheckEntry => 1,
            MenuItemKind::Separator => 2,
            MenuItemKind::BeginSubmenu => 3,
            MenuItemKind::EndSubmenu => 4,
            MenuItemKind::Title => 5,
        }
    }
}

/// One element of a host menu description, with its kind-specific payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuElement<'a> {
    /// Leaf entry invoking `action_id` on activation.
    Entry {
        /// Entry text.
        label: &'a str,
        /// Whether the entry can be activated.
        enabled: bool,
        /// Host action performed on activation.
        action_id: u32,
    },
    /// Leaf entry with a checkbox state.
    CheckEntry {
        /// Entry text.
        label: &'a str,
        /// Whether the entry can be activated.
        enabled: bool,
        /// Checkbox state.
        checked: bool,
        /// Host action performed on activation.
        action_id: u32,
    },
    /// Divider.
    Separator,
    /// Opens a nested menu titled `label`.
    BeginSubmenu {
        /// Submenu title.
        label: &'a str,
        /// Whether the submenu can be opened.
        enabled: bool,
    },
    /// Closes the innermost nested menu.
    EndSubmenu,
    /// Section header.
    Title {
        /// Header text.
        title: &'a str,
        /// Whether the header is drawn as enabled.
        enabled: bool,
    },
}

impl MenuElement<'_> {
    /// Kind tag of the element.
    pub fn kind(&self) -> MenuItemKind {
        match self {
            MenuElement::Entry { .. } => MenuItemKind::Entry,
            MenuElement::CheckEntry { .. } => MenuItemKind::CheckEntry,
            MenuElement::Separator => MenuItemKind::Separator,
            MenuElement::BeginSubmenu { .. } => MenuItemKind::BeginSubmenu,
            MenuElement::EndSubmenu => MenuItemKind::EndSubmenu,
            MenuElement::Title { .. } => MenuItemKind::Title,
        }
    }
}

/// Host side of the context-menu protocol.
pub trait ContextMenuHost {
    /// Describe the menu for `target` by feeding elements to `builder`.
    fn populate(&self, target: MenuTarget, builder: &mut MenuBuilder<'_>) -> bool;

    /// Perform the host action `action_id` against `target`.
    fn perform(&self, target: MenuTarget, action_id: u32) -> bool;
}

/// Receives host menu elements and materialises them into a [`PopupMenu`].
pub struct MenuBuilder<'m> {
    root: &'m mut PopupMenu,
    submenus: Vec<(String, PopupMenu)>,
    host: Rc<dyn ContextMenuHost>,
    target: MenuTarget,
    first_item: bool,
}

impl<'m> MenuBuilder<'m> {
    /// Start building into `root`. Entries perform their actions against
    /// `target` on `host`.
    pub fn new(root: &'m mut PopupMenu, host: Rc<dyn ContextMenuHost>, target: MenuTarget) -> Self {
        Self {
            root,
            submenus: Vec::new(),
            host,
            target,
            first_item: true,
        }
    }

    /// Every element kind is supported.
    pub fn supports(&self, _kind: MenuItemKind) -> bool {
        true
    }

    /// Nesting depth of the submenu currently being filled.
    pub fn depth(&self) -> usize {
        self.submenus.len()
    }

    /// Add one host element. Returns `false` only for an `EndSubmenu` with no
    /// open submenu, which is ignored.
    pub fn add_item(&mut self, element: MenuElement<'_>) -> bool {
        if self.first_item {
            self.first_item = false;
            self.root.add_separator();
        }

        match element {
            MenuElement::Entry {
                label,
                enabled,
                action_id,
            } => {
                let action = self.perform_action(action_id);
                self.current().add_item(label, enabled, false, action);
            }
            MenuElement::CheckEntry {
                label,
                enabled,
                checked,
                action_id,
            } => {
                let action = self.perform_action(action_id);
                self.current().add_item(label, enabled, checked, action);
            }
            MenuElement::Separator => self.current().add_separator(),
            MenuElement::BeginSubmenu { label, .. } => {
                self.submenus.push((label.to_owned(), PopupMenu::new()));
            }
            MenuElement::EndSubmenu => {
                let Some((title, menu)) = self.submenus.pop() else {
                    tracing::warn!("host closed a submenu that was never opened");
                    return false;
                };
                self.current().add_sub_menu(title, menu);
            }
            MenuElement::Title { title, .. } => self.current().add_section_header(title),
        }
        true
    }

    /// Close any submenus the host left open, attaching each to its parent.
    pub fn finish(mut self) {
        if !self.submenus.is_empty() {
            tracing::warn!(open = self.submenus.len(), "host left submenus open");
        }
        while let Some((title, menu)) = self.submenus.pop() {
            self.current().add_sub_menu(title, menu);
        }
    }

    fn current(&mut self) -> &mut PopupMenu {
        match self.submenus.last_mut() {
            Some((_, menu)) => menu,
            None => &mut *self.root,
        }
    }

    fn perform_action(&self, action_id: u32) -> impl Fn() + 'static {
        let host = Rc::clone(&self.host);
        let target = self.target;
        move || {
            host.perform(target, action_id);
        }
    }
}

/// Append the host's context menu for parameter `param_id` to `menu`.
///
/// A separator is inserted before the first host item. Without a host menu
/// extension (`host` is `None`) the menu is left unchanged.
pub fn populate_menu_for_param(
    menu: &mut PopupMenu,
    param_id: u32,
    host: Option<Rc<dyn ContextMenuHost>>,
) {
    let Some(host) = host else {
        return;
    };
    let target = MenuTarget::param(param_id);
    let mut builder = MenuBuilder::new(menu, Rc::clone(&host), target);
    if !host.populate(target, &mut builder) {
        tracing::debug!(param_id, "host declined to populate the context menu");
    }
    builder.finish();
}
