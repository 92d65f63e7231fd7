// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Header bar builder
//!
//! Creates the application header bar with the "+" action and main menu

use gtk4::{gio::Menu, prelude::WidgetExt, Button, HeaderBar, MenuButton};

/// Builds the application header bar
///
/// Contains the add-note button (left, only visible on the Home tab) and a
/// menu button (right) with:
/// - Back up notes… (app.backup action)
/// - Restore from backup… (app.restore action)
/// - Quit (app.quit action)
///
/// # Returns
///
/// `(header_bar, add_button)`; the caller wires the add button to the
/// Controller.
pub fn build_header_bar() -> (HeaderBar, Button) {
    let header_bar = HeaderBar::new();

    let menu = Menu::new();
    menu.append(Some("Back up notes…"), Some("app.backup"));
    menu.append(Some("Restore from backup…"), Some("app.restore"));
    menu.append(Some("Quit"), Some("app.quit"));

    let menu_button = MenuButton::new();
    menu_button.set_icon_name("open-menu-symbolic");
    menu_button.set_menu_model(Some(&menu));

    let add_button = Button::builder()
        .icon_name("list-add-symbolic")
        .tooltip_text("New note")
        .build();
    add_button.add_css_class("suggested-action");

    header_bar.pack_start(&add_button);
    header_bar.pack_end(&menu_button);

    (header_bar, add_button)
}
