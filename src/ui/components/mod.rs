//! UI components
//!
//! Each component borrows the state and theme for one frame and renders
//! itself with `show(ui)`.

mod chat_list;
mod chat_selector;
mod directory_manager;
mod header;
mod input_bar;
mod language_switcher;
mod message_list;
mod voice_picker;

pub use chat_list::ChatList;
pub use chat_selector::ChatSelector;
pub use directory_manager::DirectoryManager;
pub use header::Header;
pub use input_bar::InputBar;
pub use language_switcher::LanguageSwitcher;
pub use message_list::MessageList;
pub use voice_picker::VoicePicker;

use egui::{Align, InnerResponse, Layout, Response, Ui, WidgetInfo, WidgetType};

/// Horizontal layout that starts at the reading edge
pub fn row_layout(rtl: bool) -> Layout {
    if rtl {
        Layout::right_to_left(Align::Center)
    } else {
        Layout::left_to_right(Align::Center)
    }
}

/// Vertical layout aligned to the reading edge
pub fn column_layout(rtl: bool) -> Layout {
    Layout::top_down(if rtl { Align::RIGHT } else { Align::LEFT })
}

/// Lay out a row in reading order, mirrored for right-to-left languages
pub fn mirrored_row<R>(
    ui: &mut Ui,
    rtl: bool,
    add_contents: impl FnOnce(&mut Ui) -> R,
) -> InnerResponse<R> {
    ui.with_layout(row_layout(rtl), add_contents)
}

/// Set the accessibility label for a widget
pub fn set_label(response: &Response, kind: WidgetType, enabled: bool, label: impl Into<String>) {
    let label = label.into();
    response.widget_info(|| WidgetInfo::labeled(kind, enabled, label.clone()));
}
