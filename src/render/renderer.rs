use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Difficulty, GameState, ItemKind, MenuItem, MenuScreen, Snapshot, Vec2};

const RAINBOW: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Draws a [`Snapshot`] into the terminal
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot), chunks[0]);

        match snapshot.state {
            GameState::Menu(screen) => {
                frame.render_widget(self.render_menu(screen, snapshot), chunks[1]);
            }
            GameState::Playing | GameState::Paused => {
                frame.render_widget(self.render_arena(chunks[1], snapshot), chunks[1]);
            }
            GameState::GameOver => {
                frame.render_widget(self.render_game_over(snapshot), chunks[1]);
            }
        }

        frame.render_widget(self.render_controls(snapshot.state), chunks[2]);
    }

    fn render_arena(&self, area: Rect, snapshot: &Snapshot) -> Paragraph<'_> {
        // Leave room for the border
        let cols = area.width.saturating_sub(2) as usize;
        let rows = area.height.saturating_sub(2) as usize;
        let mut cells = vec![vec![Span::raw(" "); cols]; rows];

        if let Some((position, kind)) = snapshot.item {
            if let Some((c, r)) = project(position.to_vec2(), snapshot.arena, cols, rows) {
                cells[r][c] = Span::styled(
                    "●",
                    Style::default()
                        .fg(item_color(kind))
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        // Tail first so the head is drawn on top
        for (i, point) in snapshot.segments.iter().enumerate().rev() {
            let Some((c, r)) = project(*point, snapshot.arena, cols, rows) else {
                continue;
            };
            let style = if i == 0 {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if snapshot.rainbow_active {
                Style::default().fg(RAINBOW[i % RAINBOW.len()])
            } else {
                Style::default().fg(Color::Yellow)
            };
            cells[r][c] = Span::styled(if i == 0 { "■" } else { "□" }, style);
        }

        let lines: Vec<Line> = cells.into_iter().map(Line::from).collect();

        let title = if snapshot.state == GameState::Paused {
            " PAUSED - Space to continue "
        } else {
            " Snake "
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
    }

    fn render_menu(&self, screen: MenuScreen, snapshot: &Snapshot) -> Paragraph<'_> {
        let labels: Vec<&str> = match screen {
            MenuScreen::TopMenu => MenuItem::ALL.iter().map(|item| item.label()).collect(),
            MenuScreen::DifficultySelect => Difficulty::ALL.iter().map(|d| d.label()).collect(),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, label) in labels.into_iter().enumerate() {
            let line = if i == snapshot.selected_index {
                Line::from(Span::styled(
                    format!("> {label}"),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(label, Style::default().fg(Color::White)))
            };
            text.push(line);
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.best_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Difficulty: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.difficulty.label(), Style::default().fg(Color::White)),
        ];
        if snapshot.muted {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("muted", Style::default().fg(Color::DarkGray)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Best Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.best_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to return to the menu", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: GameState) -> Paragraph<'_> {
        let hint = match state {
            GameState::Menu(MenuScreen::TopMenu) => "↑↓ select | Enter confirm | M mute",
            GameState::Menu(MenuScreen::DifficultySelect) => {
                "↑↓ select | Enter confirm | Esc back"
            }
            GameState::Playing => "↑↓←→ or WASD to move | P/Esc pause | M mute",
            GameState::Paused => "Space/Esc resume | M mute",
            GameState::GameOver => "Space menu | M mute",
        };

        Paragraph::new(Line::from(Span::styled(hint, Style::default().fg(Color::Cyan))))
            .alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Basic => Color::Red,
        ItemKind::Golden => Color::Yellow,
        ItemKind::Speed => Color::Green,
        ItemKind::Slow => Color::Blue,
        ItemKind::Rainbow => Color::Magenta,
    }
}

/// Map a world point onto a `cols` x `rows` character grid
fn project(point: Vec2, arena: (f64, f64), cols: usize, rows: usize) -> Option<(usize, usize)> {
    if cols == 0 || rows == 0 || point.x < 0.0 || point.y < 0.0 {
        return None;
    }
    let (width, height) = arena;
    let c = (point.x / width * cols as f64) as usize;
    let r = (point.y / height * rows as f64) as usize;
    (c < cols && r < rows).then_some((c, r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_corners() {
        let arena = (600.0, 600.0);
        assert_eq!(project(Vec2::new(0.0, 0.0), arena, 60, 30), Some((0, 0)));
        assert_eq!(project(Vec2::new(599.0, 599.0), arena, 60, 30), Some((59, 29)));
        assert_eq!(project(Vec2::new(300.0, 300.0), arena, 60, 30), Some((30, 15)));
    }

    #[test]
    fn test_project_outside() {
        let arena = (600.0, 600.0);
        assert_eq!(project(Vec2::new(-1.0, 10.0), arena, 60, 30), None);
        assert_eq!(project(Vec2::new(600.0, 10.0), arena, 60, 30), None);
        assert_eq!(project(Vec2::new(10.0, 10.0), arena, 0, 30), None);
    }
}
