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

//! Bottom navigation bar
//!
//! Two grouped toggle buttons inside a `Revealer`. Hiding the bar slides it
//! down out of view; showing it slides it back up.

use gtk4::{
    prelude::*, Align, Box as GtkBox, Orientation, Revealer, RevealerTransitionType, ToggleButton,
};

use crate::core::Tab;

/// Slide duration of the bar itself, in milliseconds
const SLIDE_MS: u32 = 200;

/// Home/Settings switcher at the bottom of the window
pub struct NavBar {
    /// Root widget (Revealer)
    widget: Revealer,
    /// One button per tab, in `Tab::ALL` order
    buttons: Vec<ToggleButton>,
}

impl NavBar {
    /// Creates the bar with Home selected and the bar visible
    pub fn new() -> Self {
        let row = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(6)
            .halign(Align::Center)
            .margin_top(6)
            .margin_bottom(6)
            .build();
        row.add_css_class("linked");

        let buttons: Vec<ToggleButton> = Tab::ALL
            .iter()
            .map(|tab| {
                let icon = match tab {
                    Tab::Home => "user-home-symbolic",
                    Tab::Settings => "emblem-system-symbolic",
                };
                ToggleButton::builder()
                    .icon_name(icon)
                    .tooltip_text(tab.to_string())
                    .active(*tab == Tab::Home)
                    .build()
            })
            .collect();

        // Group so exactly one stays active
        if let Some((first, rest)) = buttons.split_first() {
            for button in rest {
                button.set_group(Some(first));
            }
        }

        for button in &buttons {
            row.append(button);
        }

        let widget = Revealer::builder()
            .transition_type(RevealerTransitionType::SlideUp)
            .transition_duration(SLIDE_MS)
            .reveal_child(true)
            .child(&row)
            .build();

        Self { widget, buttons }
    }

    /// Returns the root widget
    pub fn widget(&self) -> &Revealer {
        &self.widget
    }

    /// Shows or hides the bar with its slide animation
    pub fn set_revealed(&self, visible: bool) {
        self.widget.set_reveal_child(visible);
    }

    /// Marks `tab` as active without emitting a tap
    pub fn set_active(&self, tab: Tab) {
        if let Some(button) = self.buttons.get(tab.index()) {
            if !button.is_active() {
                button.set_active(true);
            }
        }
    }

    /// Calls `callback` with the tab index whenever a button becomes active
    pub fn connect_selected<F>(&self, callback: F)
    where
        F: Fn(usize) + Clone + 'static,
    {
        for (index, button) in self.buttons.iter().enumerate() {
            let callback = callback.clone();
            button.connect_toggled(move |button| {
                if button.is_active() {
                    callback(index);
                }
            });
        }
    }
}

impl Default for NavBar {
    fn default() -> Self {
        Self::new()
    }
}
