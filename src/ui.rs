#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when mapping playfield units to terminal cells since both are small
    clippy::cast_possible_truncation,
    // Allow sign loss when going from f32 to u16 since positions are clamped to non-negative values first
    clippy::cast_sign_loss,
    // Allow precision loss when casting terminal sizes to f32
    clippy::cast_precision_loss
)]

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::components::{Particle, Position, ScreenShake};
use crate::game::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::render::{Button, DrawCommand, Scene, Tone, WidgetStyle};
use crate::screen::Screen;
use crate::sound::AudioState;

// Smallest terminal the playfield stays readable in
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;
const SIDE_PANEL_WIDTH: u16 = 26;
const MODERN_BUTTON_MIN_ROWS: u16 = 30;

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Fruit Sorter"),
        );
        f.render_widget(warning, centered_rect(80, 50, area));
        return;
    }

    let mut scene = Scene::new();
    app.machine.render(&mut scene);

    let show_panel = app.machine.screen() == Screen::Playing;
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if show_panel {
            vec![Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)]
        } else {
            vec![Constraint::Min(0)]
        })
        .split(area);

    let offset = app.world.resource::<ScreenShake>().current_offset;
    let field_area = shifted(main_layout[0], offset, area);

    let field_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Fruit Sorter ")
        .title_alignment(Alignment::Center);
    let inner = field_block.inner(field_area);
    f.render_widget(field_block, field_area);

    let playfield = Playfield { area: inner };
    for command in &scene.commands {
        playfield.draw(f, command);
    }
    render_particles(f, app, &playfield);

    if show_panel {
        render_side_panel(f, app, &scene, main_layout[1]);
    }
}

/// Maps playfield units onto a terminal rectangle.
struct Playfield {
    area: Rect,
}

impl Playfield {
    fn cell(&self, position: Position) -> Option<(u16, u16)> {
        if self.area.width == 0 || self.area.height == 0 {
            return None;
        }
        let fx = (position.x / PLAYFIELD_WIDTH).clamp(0.0, 1.0);
        let fy = (position.y / PLAYFIELD_HEIGHT).clamp(0.0, 1.0);
        let x = self.area.x + ((fx * f32::from(self.area.width)) as u16).min(self.area.width - 1);
        let y = self.area.y + ((fy * f32::from(self.area.height)) as u16).min(self.area.height - 1);
        Some((x, y))
    }

    fn draw(&self, f: &mut Frame, command: &DrawCommand) {
        match command {
            DrawCommand::Item {
                category,
                position,
                special,
            } => {
                let mut style = Style::default().fg(category.color).add_modifier(Modifier::BOLD);
                if *special {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                if let Some((x, y)) = self.cell(*position) {
                    self.put_centered(f, x, y, category.symbol, style);
                }
            }
            DrawCommand::Receptacle {
                category,
                position,
                highlighted,
            } => {
                let label = format!("\\_{}_/", category.symbol);
                let mut style = Style::default().fg(category.color);
                if *highlighted {
                    style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                }
                if let Some((x, y)) = self.cell(*position) {
                    self.put_centered(f, x, y, &label, style);
                }
            }
            DrawCommand::Text {
                text,
                position,
                tone,
            } => {
                if let Some((x, y)) = self.cell(*position) {
                    self.put_centered(f, x, y, text, tone_style(*tone));
                }
            }
            DrawCommand::Button(button) => self.draw_button(f, button),
        }
    }

    fn draw_button(&self, f: &mut Frame, button: &Button) {
        let Some((x, y)) = self.cell(button.position) else {
            return;
        };
        match button.style {
            WidgetStyle::Plain => {
                let style = if button.selected {
                    Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
                } else {
                    Style::default()
                };
                self.put_centered(f, x, y, &format!("  {}  ", button.label), style);
            }
            WidgetStyle::Modern => {
                let (border, text) = if button.selected {
                    (
                        Style::default().fg(Color::LightGreen),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    (Style::default().fg(Color::DarkGray), Style::default())
                };

                let width = (button.label.chars().count() as u16 + 6).min(self.area.width);
                let rect = Rect {
                    x: x.saturating_sub(width / 2).max(self.area.x),
                    y: y.saturating_sub(1).max(self.area.y),
                    width,
                    height: 3,
                }
                .intersection(self.area);

                // Boxes need three rows per button slot; short terminals get a one-line frame
                if rect.height < 3 || self.area.height < MODERN_BUTTON_MIN_ROWS {
                    self.put_centered(f, x, y, &format!("[ {} ]", button.label), text);
                    return;
                }

                let widget = Paragraph::new(Span::styled(button.label.clone(), text))
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .border_style(border),
                    );
                f.render_widget(widget, rect);
            }
        }
    }

    // Writes `text` centered on column `x`, clipped to the playfield
    fn put_centered(&self, f: &mut Frame, x: u16, y: u16, text: &str, style: Style) {
        let width = text.chars().count() as u16;
        let start = x.saturating_sub(width / 2).max(self.area.x);
        let buf = f.buffer_mut();
        for (i, ch) in text.chars().enumerate() {
            let cx = start + i as u16;
            if cx >= self.area.right() {
                break;
            }
            if let Some(cell) = buf.cell_mut((cx, y)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}

fn render_particles(f: &mut Frame, app: &mut App, playfield: &Playfield) {
    let particles: Vec<(Position, Color, f32)> = app
        .world
        .query::<&Particle>()
        .iter(&app.world)
        .map(|p| (p.position, p.color, p.size))
        .collect();

    for (position, color, size) in particles {
        let inside = (0.0..=PLAYFIELD_WIDTH).contains(&position.x)
            && (0.0..=PLAYFIELD_HEIGHT).contains(&position.y);
        if !inside {
            continue;
        }
        let Some((x, y)) = playfield.cell(position) else {
            continue;
        };
        let symbol = if size > 0.7 {
            "•"
        } else if size > 0.4 {
            "∙"
        } else {
            "·"
        };
        if let Some(cell) = f.buffer_mut().cell_mut((x, y)) {
            // Particles never cover fruit or text
            if cell.symbol() == " " {
                cell.set_symbol(symbol);
                cell.set_fg(color);
            }
        }
    }
}

fn render_side_panel(f: &mut Frame, app: &App, scene: &Scene, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(11)])
        .split(area);

    let stats: Vec<Line> = scene
        .hud
        .iter()
        .map(|(text, tone)| Line::styled(text.clone(), tone_style(*tone)))
        .collect();
    let info = Paragraph::new(stats)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Round "));
    f.render_widget(info, layout[0]);

    let audio = app.world.resource::<AudioState>();
    let mut controls: Vec<Line> = app
        .machine
        .engine()
        .receptacles()
        .iter()
        .enumerate()
        .map(|(i, receptacle)| {
            Line::from(vec![
                Span::raw(format!("{}: ", i + 1)),
                Span::styled(
                    receptacle.category.symbol,
                    Style::default().fg(receptacle.category.color),
                ),
                Span::raw(format!(" {}", receptacle.category.identifier)),
            ])
        })
        .collect();
    controls.push(Line::raw("←/→ + Enter: pick"));
    controls.push(Line::raw("Esc: menu  Q: quit"));
    let on_off = |enabled: bool| if enabled { "on" } else { "off" };
    controls.push(Line::raw(format!(
        "M: music {}  N: sfx {}",
        on_off(audio.is_music_enabled()),
        on_off(audio.is_sound_enabled())
    )));
    controls.push(Line::raw(format!("+/-: volume {:.0}%", audio.get_volume() * 100.0)));
    let help = Paragraph::new(controls)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Controls "));
    f.render_widget(help, layout[1]);
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Title => Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
        Tone::Normal => Style::default(),
        Tone::Dim => Style::default().fg(Color::DarkGray),
        Tone::Highlight => Style::default().fg(Color::LightGreen),
        Tone::Warning => Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
    }
}

// Moves `rect` by the shake offset while keeping it inside `bounds`
fn shifted(rect: Rect, offset: (i16, i16), bounds: Rect) -> Rect {
    let max_x = i32::from(bounds.right().saturating_sub(rect.width)).max(i32::from(bounds.x));
    let max_y = i32::from(bounds.bottom().saturating_sub(rect.height)).max(i32::from(bounds.y));
    let x = (i32::from(rect.x) + i32::from(offset.0)).clamp(i32::from(bounds.x), max_x);
    let y = (i32::from(rect.y) + i32::from(offset.1)).clamp(i32::from(bounds.y), max_y);
    Rect {
        x: x as u16,
        y: y as u16,
        ..rect
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
