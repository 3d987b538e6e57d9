//! Adapter from the CLAP host context-menu extension to
//! [`veneer_core::ContextMenuHost`].
//!
//! The host side is reached through raw `clap_host::get_extension`; the
//! extension is looked up under its stable identifier first and then under
//! the draft identifier older hosts still publish. The host builds the menu
//! by calling back into a `clap_context_menu_builder` whose `ctx` points at a
//! [`MenuBuilder`] for the duration of `populate`.

#![allow(unsafe_code)]

use std::borrow::Cow;
use std::ffi::{CStr, c_char, c_void};
use std::rc::Rc;

use clack_plugin::prelude::HostSharedHandle;
use clap_sys::host::clap_host;
use veneer_core::{
    ContextMenuHost, MenuBuilder, MenuElement, MenuItemKind, MenuTarget, PopupMenu,
    populate_menu_for_param,
};

/// Stable extension identifier.
pub const CLAP_EXT_CONTEXT_MENU: &CStr = c"clap.context-menu/1";

/// Draft identifier published by hosts predating CLAP 1.2.
pub const CLAP_EXT_CONTEXT_MENU_COMPAT: &CStr = c"clap.context-menu.draft/0";

/// Raw CLAP context-menu ABI.
#[allow(non_camel_case_types, missing_docs)]
pub mod ffi {
    use std::ffi::{c_char, c_void};

    use clap_sys::host::clap_host;

    pub type clap_id = u32;

    #[repr(C)]
    #[derive(Debug, Clone, Copy)]
    pub struct clap_context_menu_target {
        pub kind: u32,
        pub id: clap_id,
    }

    #[repr(C)]
    #[derive(Debug, Clone, Copy)]
    pub struct clap_context_menu_entry {
        pub label: *const c_char,
        pub is_enabled: bool,
        pub action_id: clap_id,
    }

    #[repr(C)]
    #[derive(Debug, Clone, Copy)]
    pub struct clap_context_menu_check_entry {
        pub label: *const c_char,
        pub is_enabled: bool,
        pub is_checked: bool,
        pub action_id: clap_id,
    }

    #[repr(C)]
    #[derive(Debug, Clone, Copy)]
    pub struct clap_context_menu_item_title {
        pub title: *const c_char,
        pub is_enabled: bool,
    }

    #[repr(C)]
    #[derive(Debug, Clone, Copy)]
    pub struct clap_context_menu_submenu {
        pub label: *const c_char,
        pub is_enabled: bool,
    }

    #[repr(C)]
    pub struct clap_context_menu_builder {
        pub ctx: *mut c_void,
        pub add_item: Option<
            unsafe extern "C" fn(
                builder: *const clap_context_menu_builder,
                item_kind: u32,
                item_data: *const c_void,
            ) -> bool,
        >,
        pub supports: Option<
            unsafe extern "C" fn(builder: *const clap_context_menu_builder, item_kind: u32) -> bool,
        >,
    }

    #[repr(C)]
    #[derive(Debug, Clone, Copy)]
    pub struct clap_host_context_menu {
        pub populate: Option<
            unsafe extern "C" fn(
                host: *const clap_host,
                target: *const clap_context_menu_target,
                builder: *const clap_context_menu_builder,
            ) -> bool,
        >,
        pub perform: Option<
            unsafe extern "C" fn(
                host: *const clap_host,
                target: *const clap_context_menu_target,
                action_id: clap_id,
            ) -> bool,
        >,
        pub can_popup: Option<unsafe extern "C" fn(host: *const clap_host) -> bool>,
        pub popup: Option<
            unsafe extern "C" fn(
                host: *const clap_host,
                target: *const clap_context_menu_target,
                screen_index: i32,
                x: i32,
                y: i32,
            ) -> bool,
        >,
    }
}

use ffi::{
    clap_context_menu_builder, clap_context_menu_check_entry, clap_context_menu_entry,
    clap_context_menu_item_title, clap_context_menu_submenu, clap_context_menu_target,
    clap_host_context_menu,
};

/// A host that implements the context-menu extension.
pub struct ClapContextMenuHost {
    host: *const clap_host,
}

impl ClapContextMenuHost {
    /// Wrap `host` if it publishes the context-menu extension under either
    /// identifier.
    ///
    /// # Safety
    ///
    /// `host` must be null or point to a valid `clap_host` that outlives the
    /// returned value.
    pub unsafe fn new(host: *const clap_host) -> Option<Self> {
        if host.is_null() {
            return None;
        }
        let wrapped = Self { host };
        if wrapped.extension().is_some() {
            Some(wrapped)
        } else {
            tracing::debug!("host has no context-menu extension");
            None
        }
    }

    /// Whether the host can show the menu itself.
    pub fn can_popup(&self) -> bool {
        let Some(ext) = self.extension() else {
            return false;
        };
        match ext.can_popup {
            // SAFETY: `host` is valid per `new`'s contract.
            Some(can_popup) => unsafe { can_popup(self.host) },
            None => false,
        }
    }

    fn extension(&self) -> Option<&clap_host_context_menu> {
        [CLAP_EXT_CONTEXT_MENU, CLAP_EXT_CONTEXT_MENU_COMPAT]
            .into_iter()
            .find_map(|id| {
                // SAFETY: `host` is valid per `new`'s contract; hosts return
                // null or a pointer to a static extension table.
                unsafe {
                    let get_extension = (*self.host).get_extension?;
                    get_extension(self.host, id.as_ptr())
                        .cast::<clap_host_context_menu>()
                        .as_ref()
                }
            })
    }
}

impl ContextMenuHost for ClapContextMenuHost {
    fn populate(&self, target: MenuTarget, builder: &mut MenuBuilder<'_>) -> bool {
        let Some(populate) = self.extension().and_then(|ext| ext.populate) else {
            return false;
        };
        let raw_target = raw_target(target);
        let raw_builder = clap_context_menu_builder {
            ctx: std::ptr::from_mut(builder).cast(),
            add_item: Some(add_item),
            supports: Some(supports),
        };
        // SAFETY: `raw_builder.ctx` points at `builder`, which outlives the call.
        unsafe { populate(self.host, &raw const raw_target, &raw const raw_builder) }
    }

    fn perform(&self, target: MenuTarget, action_id: u32) -> bool {
        let Some(perform) = self.extension().and_then(|ext| ext.perform) else {
            tracing::debug!(action_id, "context-menu extension gone before perform");
            return false;
        };
        let raw_target = raw_target(target);
        // SAFETY: `host` is valid per `new`'s contract.
        unsafe { perform(self.host, &raw const raw_target, action_id) }
    }
}

fn raw_target(target: MenuTarget) -> clap_context_menu_target {
    clap_context_menu_target {
        kind: target.kind.as_raw(),
        id: target.id,
    }
}

/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn label<'a>(ptr: *const c_char) -> Cow<'a, str> {
    if ptr.is_null() {
        Cow::Borrowed("")
    } else {
        // SAFETY: non-null and NUL-terminated per the contract.
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy()
    }
}

unsafe extern "C" fn add_item(
    builder: *const clap_context_menu_builder,
    item_kind: u32,
    item_data: *const c_void,
) -> bool {
    // SAFETY: hosts call back with the builder handed to `populate`, whose
    // `ctx` is a live `MenuBuilder`.
    let Some(menu) = (unsafe { builder.as_ref() })
        .and_then(|b| unsafe { b.ctx.cast::<MenuBuilder<'_>>().as_mut() })
    else {
        return false;
    };
    let Some(kind) = MenuItemKind::from_raw(item_kind) else {
        tracing::warn!(item_kind, "unknown context-menu item kind");
        return false;
    };

    // SAFETY: for each kind, `item_data` is null or points at the matching
    // payload struct.
    unsafe {
        match kind {
            MenuItemKind::Entry => {
                let Some(entry) = item_data.cast::<clap_context_menu_entry>().as_ref() else {
                    return false;
                };
                menu.add_item(MenuElement::Entry {
                    label: &label(entry.label),
                    enabled: entry.is_enabled,
                    action_id: entry.action_id,
                })
            }
            MenuItemKind::CheckEntry => {
                let Some(entry) = item_data.cast::<clap_context_menu_check_entry>().as_ref() else {
                    return false;
                };
                menu.add_item(MenuElement::CheckEntry {
                    label: &label(entry.label),
                    enabled: entry.is_enabled,
                    checked: entry.is_checked,
                    action_id: entry.action_id,
                })
            }
            MenuItemKind::Separator => menu.add_item(MenuElement::Separator),
            MenuItemKind::BeginSubmenu => {
                let Some(submenu) = item_data.cast::<clap_context_menu_submenu>().as_ref() else {
                    return false;
                };
                menu.add_item(MenuElement::BeginSubmenu {
                    label: &label(submenu.label),
                    enabled: submenu.is_enabled,
                })
            }
            MenuItemKind::EndSubmenu => menu.add_item(MenuElement::EndSubmenu),
            MenuItemKind::Title => {
                let Some(title) = item_data.cast::<clap_context_menu_item_title>().as_ref() else {
                    return false;
                };
                menu.add_item(MenuElement::Title {
                    title: &label(title.title),
                    enabled: title.is_enabled,
                })
            }
        }
    }
}

unsafe extern "C" fn supports(builder: *const clap_context_menu_builder, item_kind: u32) -> bool {
    // SAFETY: see `add_item`.
    let Some(menu) = (unsafe { builder.as_ref() })
        .and_then(|b| unsafe { b.ctx.cast::<MenuBuilder<'_>>().as_ref() })
    else {
        return false;
    };
    MenuItemKind::from_raw(item_kind).is_some_and(|kind| menu.supports(kind))
}

/// Append the host's menu for `param_id` given a raw host pointer.
///
/// # Safety
///
/// `host` must be null or point to a valid `clap_host` for the duration of
/// the call and for as long as the menu's actions may run.
pub unsafe fn populate_menu_for_raw_host(
    menu: &mut PopupMenu,
    param_id: u32,
    host: *const clap_host,
) {
    // SAFETY: forwarded contract.
    let host = unsafe { ClapContextMenuHost::new(host) };
    populate_menu_for_param(
        menu,
        param_id,
        host.map(|h| Rc::new(h) as Rc<dyn ContextMenuHost>),
    );
}

/// Append the host's context menu for parameter `param_id` to `menu`.
///
/// Leaves `menu` unchanged when the host has no context-menu extension.
pub fn populate_menu_for_clap_param(
    menu: &mut PopupMenu,
    param_id: u32,
    host: &HostSharedHandle<'_>,
) {
    #[allow(clippy::ptr_as_ptr, clippy::borrow_as_ptr)]
    let raw = host.as_raw() as *const _ as *const clap_host;
    // SAFETY: clack keeps the host handle valid for the plugin's lifetime,
    // which bounds the menu's.
    unsafe { populate_menu_for_raw_host(menu, param_id, raw) }
}
