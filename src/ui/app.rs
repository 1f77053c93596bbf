use crate::billing::PlanTable;
use crate::form::{BillForm, RenderedBill};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input field currently receiving keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Plan,
    Usage,
    Days,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Plan => Field::Usage,
            Field::Usage => Field::Days,
            Field::Days => Field::Plan,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Plan => Field::Days,
            Field::Usage => Field::Plan,
            Field::Days => Field::Usage,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Plan => "Plan",
            Field::Usage => "Usage",
            Field::Days => "Days",
        }
    }
}

pub struct App {
    pub table: PlanTable,
    pub currency_symbol: String,
    pub form: BillForm,
    pub focus: Field,
    pub output: Option<RenderedBill>,
    pub message: Option<String>,
    pub should_quit: bool,
    plan_ids: Vec<u32>,
    selected_plan: usize,
}

impl App {
    pub fn new(table: PlanTable, currency_symbol: String) -> Self {
        let plan_ids: Vec<u32> = table.ids().collect();
        let plan = plan_ids.first().map(u32::to_string).unwrap_or_default();

        Self {
            table,
            currency_symbol,
            form: BillForm::new(plan, "", "30"),
            focus: Field::Usage,
            output: None,
            message: None,
            should_quit: false,
            plan_ids,
            selected_plan: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => self.submit(),
            KeyCode::Left if self.focus == Field::Plan => self.cycle_plan(-1),
            KeyCode::Right if self.focus == Field::Plan => self.cycle_plan(1),
            KeyCode::Backspace if self.focus != Field::Plan => {
                self.focused_text_mut().pop();
            }
            KeyCode::Char(c) if self.focus != Field::Plan && is_numeric_char(c) => {
                self.focused_text_mut().push(c);
            }
            _ => {}
        }
    }

    /// Compute the bill; on failure keep the previous result and show the error
    pub fn submit(&mut self) {
        match self.form.submit(&self.table, &self.currency_symbol) {
            Ok(rendered) => {
                self.output = Some(rendered);
                self.message = None;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::Plan => &self.form.plan,
            Field::Usage => &self.form.usage,
            Field::Days => &self.form.days,
        }
    }

    fn focused_text_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Plan => &mut self.form.plan,
            Field::Usage => &mut self.form.usage,
            Field::Days => &mut self.form.days,
        }
    }

    fn cycle_plan(&mut self, delta: i32) {
        if self.plan_ids.is_empty() {
            return;
        }

        let len = self.plan_ids.len() as i32;
        self.selected_plan = (self.selected_plan as i32 + delta).rem_euclid(len) as usize;
        self.form.plan = self.plan_ids[self.selected_plan].to_string();
    }
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app() -> App {
        App::new(PlanTable::builtin().clone(), "¥".to_string())
    }

    #[test]
    fn test_new_app_defaults() {
        let app = app();
        assert_eq!(app.field_text(Field::Plan), "1");
        assert_eq!(app.field_text(Field::Days), "30");
        assert_eq!(app.focus, Field::Usage);
        assert!(app.output.is_none());
    }

    #[test]
    fn test_field_cycling() {
        assert_eq!(Field::Plan.next().next().next(), Field::Plan);
        assert_eq!(Field::Plan.prev(), Field::Days);
    }

    #[test]
    fn test_plan_selector_wraps() {
        let mut app = app();
        app.focus = Field::Plan;
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.field_text(Field::Plan), "10");
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.field_text(Field::Plan), "3");
    }

    #[test]
    fn test_submit_fills_output() {
        let mut app = app();
        type_text(&mut app, "25");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        type_text(&mut app, "15");
        app.handle_key(key(KeyCode::Enter));

        let output = app.output.as_ref().unwrap();
        assert_eq!(output.total, "Total = ¥20872");
        assert!(app.message.is_none());
    }

    #[test]
    fn test_invalid_input_keeps_previous_output() {
        let mut app = app();
        type_text(&mut app, "10");
        app.submit();
        let previous = app.output.clone();
        assert!(previous.is_some());

        app.handle_key(key(KeyCode::Char('-')));
        app.submit();
        assert_eq!(app.output, previous);
        assert_eq!(
            app.message.as_deref(),
            Some(crate::form::INVALID_INPUT_MESSAGE)
        );
    }

    #[test]
    fn test_quit_keys() {
        let mut esc = app();
        esc.handle_key(key(KeyCode::Esc));
        assert!(esc.should_quit);

        let mut ctrl_c = app();
        ctrl_c.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(ctrl_c.should_quit);
    }

    #[test]
    fn test_letters_are_ignored() {
        let mut app = app();
        type_text(&mut app, "1a2");
        assert_eq!(app.field_text(Field::Usage), "12");
    }
}
