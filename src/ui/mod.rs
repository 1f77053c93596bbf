pub mod app;
pub mod components;

use crate::billing::PlanTable;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

pub use app::App;

/// Run the interactive bill form until the user quits
pub fn run_bill_form(
    table: PlanTable,
    currency_symbol: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, App::new(table, currency_symbol));
    ratatui::restore();

    result
}

fn run(
    terminal: &mut ratatui::DefaultTerminal,
    mut app: App,
) -> Result<(), Box<dyn std::error::Error>> {
    while !app.should_quit {
        terminal.draw(|f| components::bill_form::render(f, &app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}
