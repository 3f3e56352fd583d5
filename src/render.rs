#![warn(clippy::all, clippy::pedantic)]

// Screens describe a frame as calls on a `RenderSurface`. `Scene` records them
// and `ui` lays a recorded scene out on the terminal.

use serde::{Deserialize, Serialize};

use crate::components::{Category, Position};

/// Emphasis for a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Normal,
    Dim,
    Highlight,
    Warning,
}

/// Visual treatment of a [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetStyle {
    /// Bare label, selection shown by reversing colors
    Plain,
    /// Bordered box with a filled highlight when selected
    #[default]
    Modern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    /// Center of the button in playfield units
    pub position: Position,
    pub style: WidgetStyle,
    pub selected: bool,
}

impl Button {
    #[must_use]
    pub fn new(label: impl Into<String>, position: Position, style: WidgetStyle) -> Self {
        Self {
            label: label.into(),
            position,
            style,
            selected: false,
        }
    }

    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

pub trait RenderSurface {
    fn draw_item(&mut self, category: &Category, position: Position, special: bool);
    fn draw_receptacle(&mut self, category: &Category, position: Position, highlighted: bool);
    /// Draws `text` centered on `position`.
    fn draw_text(&mut self, text: &str, position: Position, tone: Tone);
    fn draw_button(&mut self, button: &Button);
    /// Appends a line to the side panel (score, combo, timers).
    fn draw_hud_line(&mut self, text: &str, tone: Tone);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Item {
        category: Category,
        position: Position,
        special: bool,
    },
    Receptacle {
        category: Category,
        position: Position,
        highlighted: bool,
    },
    Text {
        text: String,
        position: Position,
        tone: Tone,
    },
    Button(Button),
}

/// A frame's worth of draw calls, collected so a backend can lay them out in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
    pub hud: Vec<(String, Tone)>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every text, button label and HUD line, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::Button(button) => Some(button.label.as_str()),
                _ => None,
            })
            .chain(self.hud.iter().map(|(line, _)| line.as_str()))
    }

    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }
}

impl RenderSurface for Scene {
    fn draw_item(&mut self, category: &Category, position: Position, special: bool) {
        self.commands.push(DrawCommand::Item {
            category: *category,
            position,
            special,
        });
    }

    fn draw_receptacle(&mut self, category: &Category, position: Position, highlighted: bool) {
        self.commands.push(DrawCommand::Receptacle {
            category: *category,
            position,
            highlighted,
        });
    }

    fn draw_text(&mut self, text: &str, position: Position, tone: Tone) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            tone,
        });
    }

    fn draw_button(&mut self, button: &Button) {
        self.commands.push(DrawCommand::Button(button.clone()));
    }

    fn draw_hud_line(&mut self, text: &str, tone: Tone) {
        self.hud.push((text.to_string(), tone));
    }
}
