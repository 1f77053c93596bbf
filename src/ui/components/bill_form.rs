use crate::ui::app::{App, Field};
use crate::utils::describe_plan;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FIELDS: [Field; 3] = [Field::Plan, Field::Usage, Field::Days];

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Inputs
            Constraint::Length(2), // Plan summary
            Constraint::Length(7), // Bill
            Constraint::Length(1), // Status
            Constraint::Min(0),
            Constraint::Length(2), // Help text
        ])
        .split(f.area());

    render_inputs(f, app, chunks[0]);
    render_plan_summary(f, app, chunks[1]);
    render_bill(f, app, chunks[2]);
    render_status(f, app, chunks[3]);

    let help = Paragraph::new("Tab/↑/↓: Field  ←/→: Plan  Enter: Calculate  Esc: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[5]);
}

fn render_inputs(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Bill")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = FIELDS
        .iter()
        .map(|&field| {
            let is_focused = field == app.focus;
            let marker = if is_focused { "▶ " } else { "  " };
            let value = match field {
                Field::Plan => format!("◀ {} ▶", app.field_text(field)),
                _ if is_focused => format!("{}_", app.field_text(field)),
                _ => app.field_text(field).to_string(),
            };

            let style = if is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::styled(format!("{}{:<6}", marker, field.label()), style),
                Span::styled(value, style.add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_plan_summary(f: &mut Frame, app: &App, area: Rect) {
    let summary = app
        .form
        .plan
        .parse::<u32>()
        .ok()
        .and_then(|id| app.table.get(id))
        .map(|plan| describe_plan(&app.currency_symbol, plan))
        .unwrap_or_default();

    let paragraph = Paragraph::new(format!("  {}", summary))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(paragraph, area);
}

fn render_bill(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Result");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = match &app.output {
        Some(rendered) => {
            let all = rendered.lines();
            let last = all.len() - 1;
            all.iter()
                .enumerate()
                .map(|(i, text)| {
                    if i == last {
                        Line::styled(
                            text.to_string(),
                            Style::default().add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Line::from(text.to_string())
                    }
                })
                .collect()
        }
        None => vec![Line::styled(
            "Enter usage and days, then press Enter",
            Style::default().fg(Color::DarkGray),
        )],
    };

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = &app.message {
        let status = Paragraph::new(format!("  {}", message)).style(Style::default().fg(Color::Red));
        f.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::PlanTable;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_result_lines() {
        let mut app = App::new(PlanTable::builtin().clone(), "¥".to_string());
        app.form.usage = "25".to_string();
        app.form.days = "15".to_string();
        app.submit();

        let screen = draw(&app);
        assert!(screen.contains("Base fee = ¥975"));
        assert!(screen.contains("Total = ¥20872"));
        assert!(screen.contains("up to 20 @ ¥730"));
    }

    #[test]
    fn test_renders_error_message() {
        let mut app = App::new(PlanTable::builtin().clone(), "¥".to_string());
        app.submit();

        let screen = draw(&app);
        assert!(screen.contains(crate::form::INVALID_INPUT_MESSAGE));
    }
}
