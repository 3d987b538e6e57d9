//! Integration tests for host context-menu translation.

use std::cell::RefCell;
use std::rc::Rc;

use veneer_core::menu::MenuItem;
use veneer_core::{
    ContextMenuHost, MenuBuilder, MenuElement, MenuItemKind, MenuTarget, PopupMenu, TargetKind,
    populate_menu_for_param,
};

/// Host that replays a fixed element list and records performed actions.
struct ScriptedHost {
    elements: Vec<MenuElement<'static>>,
    populated: RefCell<Vec<MenuTarget>>,
    performed: RefCell<Vec<(MenuTarget, u32)>>,
}

impl ScriptedHost {
    fn new(elements: Vec<MenuElement<'static>>) -> Rc<Self> {
        Rc::new(Self {
            elements,
            populated: RefCell::new(Vec::new()),
            performed: RefCell::new(Vec::new()),
        })
    }
}

impl ContextMenuHost for ScriptedHost {
    fn populate(&self, target: MenuTarget, builder: &mut MenuBuilder<'_>) -> bool {
        self.populated.borrow_mut().push(target);
        for element in &self.elements {
            if !builder.supports(element.kind()) {
                continue;
            }
            builder.add_item(*element);
        }
        true
    }

    fn perform(&self, target: MenuTarget, action_id: u32) -> bool {
        self.performed.borrow_mut().push((target, action_id));
        true
    }
}

fn actions_script() -> Vec<MenuElement<'static>> {
    vec![
        MenuElement::Title {
            title: "Actions",
            enabled: true,
        },
        MenuElement::Entry {
            label: "Copy",
            enabled: true,
            action_id: 1,
        },
        MenuElement::Separator,
        MenuElement::BeginSubmenu {
            label: "More",
            enabled: true,
        },
        MenuElement::CheckEntry {
            label: "Loop",
            enabled: true,
            checked: true,
            action_id: 2,
        },
        MenuElement::EndSubmenu,
    ]
}

/// The canonical host menu materialises with a leading separator and a nested submenu.
#[test]
fn test_menu_structure() {
    let host = ScriptedHost::new(actions_script());
    let mut menu = PopupMenu::new();
    populate_menu_for_param(&mut menu, 42, Some(host.clone()));

    assert_eq!(*host.populated.borrow(), vec![MenuTarget::param(42)]);

    let items = menu.items();
    assert_eq!(items.len(), 5);
    assert!(matches!(items[0], MenuItem::Separator));
    assert!(matches!(items[1], MenuItem::SectionHeader(ref t) if t == "Actions"));
    assert!(matches!(items[2], MenuItem::Entry(ref e) if e.label == "Copy" && !e.checked));
    assert!(matches!(items[3], MenuItem::Separator));

    let MenuItem::SubMenu { title, menu: more } = &items[4] else {
        panic!("expected the More submenu, got {:?}", items[4]);
    };
    assert_eq!(title, "More");
    assert_eq!(more.len(), 1);
    let MenuItem::Entry(looped) = &more.items()[0] else {
        panic!("expected the Loop entry");
    };
    assert_eq!(looped.label, "Loop");
    assert!(looped.checked);
    assert!(looped.enabled);
}

/// Activating entries performs their action against the parameter target.
#[test]
fn test_activation_performs_host_action() {
    let host = ScriptedHost::new(actions_script());
    let mut menu = PopupMenu::new();
    populate_menu_for_param(&mut menu, 42, Some(host.clone()));

    assert!(menu.find_entry("Copy").unwrap().activate());
    assert!(menu.find_entry("Loop").unwrap().activate());

    let target = MenuTarget {
        kind: TargetKind::Param,
        id: 42,
    };
    assert_eq!(*host.performed.borrow(), vec![(target, 1), (target, 2)]);
}

/// Disabled host entries are shown but never perform.
#[test]
fn test_disabled_entry() {
    let host = ScriptedHost::new(vec![MenuElement::Entry {
        label: "Paste",
        enabled: false,
        action_id: 5,
    }]);
    let mut menu = PopupMenu::new();
    populate_menu_for_param(&mut menu, 1, Some(host.clone()));
    assert!(!menu.find_entry("Paste").unwrap().activate());
    assert!(host.performed.borrow().is_empty());
}

/// Host items are appended after the plugin's own entries.
#[test]
fn test_appends_after_existing_items() {
    let host = ScriptedHost::new(actions_script());
    let mut menu = PopupMenu::new();
    menu.add_item("Reset", true, false, || {});
    populate_menu_for_param(&mut menu, 3, Some(host));
    assert!(matches!(menu.items()[0], MenuItem::Entry(ref e) if e.label == "Reset"));
    assert!(matches!(menu.items()[1], MenuItem::Separator));
    assert_eq!(menu.len(), 6);
}

/// Without a host context-menu extension the menu is unchanged.
#[test]
fn test_no_host_is_noop() {
    let mut menu = PopupMenu::new();
    menu.add_item("Reset", true, false, || {});
    populate_menu_for_param(&mut menu, 3, None);
    assert_eq!(menu.len(), 1);
}

/// Deeply nested submenus are preserved.
#[test]
fn test_deep_nesting() {
    let mut script = Vec::new();
    for _ in 0..8 {
        script.push(MenuElement::BeginSubmenu {
            label: "Level",
            enabled: true,
        });
    }
    script.push(MenuElement::Entry {
        label: "Bottom",
        enabled: true,
        action_id: 8,
    });
    for _ in 0..8 {
        script.push(MenuElement::EndSubmenu);
    }
    let host = ScriptedHost::new(script);
    let mut menu = PopupMenu::new();
    populate_menu_for_param(&mut menu, 0, Some(host));

    let mut depth = 0;
    let mut current = &menu;
    while let Some(MenuItem::SubMenu { menu: inner, .. }) = current.items().last() {
        depth += 1;
        current = inner;
    }
    assert_eq!(depth, 8);
    assert!(current.find_entry("Bottom").is_some());
}

/// Raw kind tags decode to the element kinds the builder sees.
#[test]
fn test_kind_tags_match_elements() {
    let tags: Vec<u32> = actions_script().iter().map(|e| e.kind().as_raw()).collect();
    assert_eq!(tags, vec![5, 0, 2, 3, 1, 4]);
    assert_eq!(MenuItemKind::from_raw(3), Some(MenuItemKind::BeginSubmenu));
}
