//! Popup menu model and its egui rendering.

use std::rc::Rc;

/// Callback run when a menu entry is activated.
pub type MenuAction = Rc<dyn Fn()>;

/// An actionable menu entry.
#[derive(Clone)]
pub struct MenuEntry {
    /// Displayed text.
    pub label: String,
    /// Whether the entry can be activated.
    pub enabled: bool,
    /// Whether a tick is drawn next to the entry.
    pub checked: bool,
    action: MenuAction,
}

impl MenuEntry {
    /// Run the entry's action unless it is disabled. Returns whether the
    /// action ran.
    pub fn activate(&self) -> bool {
        if self.enabled {
            (self.action)();
        }
        self.enabled
    }
}

impl std::fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuEntry")
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}

/// One element of a [`PopupMenu`].
#[derive(Debug, Clone)]
pub enum MenuItem {
    /// Horizontal divider.
    Separator,
    /// Non-interactive section title.
    SectionHeader(String),
    /// Actionable entry.
    Entry(MenuEntry),
    /// Nested menu shown under `title`.
    SubMenu {
        /// Label of the submenu.
        title: String,
        /// Contents of the submenu.
        menu: PopupMenu,
    },
}

/// A popup menu: an ordered list of items, possibly nested.
#[derive(Debug, Clone, Default)]
pub struct PopupMenu {
    items: Vec<MenuItem>,
}

impl PopupMenu {
    /// Create an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an actionable entry.
    pub fn add_item(
        &mut self,
        label: impl Into<String>,
        enabled: bool,
        checked: bool,
        action: impl Fn() + 'static,
    ) {
        self.items.push(MenuItem::Entry(MenuEntry {
            label: label.into(),
            enabled,
            checked,
            action: Rc::new(action),
        }));
    }

    /// Append a divider.
    pub fn add_separator(&mut self) {
        self.items.push(MenuItem::Separator);
    }

    /// Append a section title.
    pub fn add_section_header(&mut self, title: impl Into<String>) {
        self.items.push(MenuItem::SectionHeader(title.into()));
    }

    /// Append `menu` as a submenu labelled `title`.
    pub fn add_sub_menu(&mut self, title: impl Into<String>, menu: PopupMenu) {
        self.items.push(MenuItem::SubMenu {
            title: title.into(),
            menu,
        });
    }

    /// Items in display order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Number of top-level items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First entry labelled `label`, searching submenus depth-first.
    pub fn find_entry(&self, label: &str) -> Option<&MenuEntry> {
        self.items.iter().find_map(|item| match item {
            MenuItem::Entry(entry) if entry.label == label => Some(entry),
            MenuItem::SubMenu { menu, .. } => menu.find_entry(label),
            _ => None,
        })
    }

    /// Render the menu into `ui` (typically inside a context menu or a
    /// `menu_button`). Runs the action of a clicked entry and closes the
    /// menu; returns whether an entry was activated.
    pub fn show(&self, ui: &mut egui::Ui) -> bool {
        let mut activated = false;
        for item in &self.items {
            match item {
                MenuItem::Separator => {
                    ui.separator();
                }
                MenuItem::SectionHeader(title) => {
                    ui.label(egui::RichText::new(title.as_str()).strong());
                }
                MenuItem::Entry(entry) => {
                    let button = egui::Button::new(entry.label.as_str()).selected(entry.checked);
                    if ui.add_enabled(entry.enabled, button).clicked() {
                        activated |= entry.activate();
                        ui.close_menu();
                    }
                }
                MenuItem::SubMenu { title, menu } => {
                    ui.menu_button(title.as_str(), |ui| {
                        activated |= menu.show(ui);
                    });
                }
            }
        }
        activated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn items_keep_insertion_order() {
        let mut menu = PopupMenu::new();
        menu.add_section_header("Edit");
        menu.add_item("Undo", true, false, || {});
        menu.add_separator();
        assert_eq!(menu.len(), 3);
        assert!(matches!(menu.items()[0], MenuItem::SectionHeader(ref t) if t == "Edit"));
        assert!(matches!(menu.items()[1], MenuItem::Entry(ref e) if e.label == "Undo"));
        assert!(matches!(menu.items()[2], MenuItem::Separator));
    }

    #[test]
    fn activate_runs_action() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut menu = PopupMenu::new();
        menu.add_item("Go", true, false, move || counter.set(counter.get() + 1));
        assert!(menu.find_entry("Go").unwrap().activate());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn disabled_entry_does_not_activate() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut menu = PopupMenu::new();
        menu.add_item("Nope", false, false, move || counter.set(1));
        assert!(!menu.find_entry("Nope").unwrap().activate());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn find_entry_searches_submenus() {
        let mut inner = PopupMenu::new();
        inner.add_item("Deep", true, true, || {});
        let mut menu = PopupMenu::new();
        menu.add_sub_menu("More", inner);
        let entry = menu.find_entry("Deep").unwrap();
        assert!(entry.checked);
        assert!(menu.find_entry("Missing").is_none());
    }

    #[test]
    fn show_renders_without_activation() {
        let mut inner = PopupMenu::new();
        inner.add_item("Loop", true, true, || {});
        let mut menu = PopupMenu::new();
        menu.add_section_header("Actions");
        menu.add_item("Copy", true, false, || {});
        menu.add_separator();
        menu.add_sub_menu("More", inner);

        let ctx = egui::Context::default();
        let mut activated = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                activated = menu.show(ui);
            });
        });
        assert!(!activated);
    }
}
