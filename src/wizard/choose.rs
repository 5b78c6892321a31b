// ABOUTME: Local UI state of the selection step: tile cursors, focus, prompt editing
// Selections are forwarded to WizardState; incompatible brands raise a blocking notice

use super::{WizardError, WizardState};
use crate::app::text_editor::TextEditor;
use crate::catalog::{BRANDS, INCOMPATIBLE_BRAND_NOTICE, TRENDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooseFocus {
    Trends,
    Brands,
    Prompt,
    Generate,
}

impl ChooseFocus {
    const ALL: [Self; 4] = [Self::Trends, Self::Brands, Self::Prompt, Self::Generate];

    fn offset(self, by: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ALL[(idx + by).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone)]
pub struct ChooseState {
    pub focus: ChooseFocus,
    pub trend_cursor: usize,
    pub brand_cursor: usize,
    pub prompt: TextEditor,
    /// Blocking notice; input is swallowed until it is dismissed
    pub notice: Option<String>,
}

impl ChooseState {
    pub fn new(wizard: &WizardState) -> Self {
        let trend_cursor = wizard
            .trend()
            .and_then(|t| TRENDS.iter().position(|c| c.id == t.id))
            .unwrap_or(0);
        let brand_cursor = BRANDS
            .iter()
            .position(|b| b.name == wizard.brand())
            .unwrap_or(0);
        Self {
            focus: ChooseFocus::Trends,
            trend_cursor,
            brand_cursor,
            prompt: TextEditor::from_string(wizard.prompt()),
            notice: None,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.focus == ChooseFocus::Prompt
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.offset(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.offset(-1);
    }

    pub fn move_left(&mut self) {
        match self.focus {
            ChooseFocus::Trends => {
                self.trend_cursor = (self.trend_cursor + TRENDS.len() - 1) % TRENDS.len();
            }
            ChooseFocus::Brands => {
                self.brand_cursor = (self.brand_cursor + BRANDS.len() - 1) % BRANDS.len();
            }
            ChooseFocus::Prompt => self.prompt.move_cursor_left(),
            ChooseFocus::Generate => {}
        }
    }

    pub fn move_right(&mut self) {
        match self.focus {
            ChooseFocus::Trends => self.trend_cursor = (self.trend_cursor + 1) % TRENDS.len(),
            ChooseFocus::Brands => self.brand_cursor = (self.brand_cursor + 1) % BRANDS.len(),
            ChooseFocus::Prompt => self.prompt.move_cursor_right(),
            ChooseFocus::Generate => {}
        }
    }

    /// Enter/space on the focused element
    pub fn activate(&mut self, wizard: &mut WizardState) -> Result<(), WizardError> {
        match self.focus {
            ChooseFocus::Trends => {
                wizard.select_trend(&TRENDS[self.trend_cursor]);
                self.sync_prompt(wizard);
                Ok(())
            }
            ChooseFocus::Brands => self.pick_brand(wizard),
            ChooseFocus::Prompt => {
                self.input_char('\n', wizard);
                Ok(())
            }
            ChooseFocus::Generate => wizard.start_generation(),
        }
    }

    fn pick_brand(&mut self, wizard: &mut WizardState) -> Result<(), WizardError> {
        let brand = &BRANDS[self.brand_cursor];
        match wizard.select_brand(brand.name) {
            Ok(()) => {
                self.sync_prompt(wizard);
                Ok(())
            }
            Err(e @ WizardError::IncompatibleBrand { .. }) => {
                self.notice = Some(INCOMPATIBLE_BRAND_NOTICE.to_string());
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn input_char(&mut self, ch: char, wizard: &mut WizardState) {
        if self.is_typing() {
            self.prompt.insert_char(ch);
            wizard.set_prompt(self.prompt.text());
        }
    }

    pub fn backspace(&mut self, wizard: &mut WizardState) {
        if self.is_typing() {
            self.prompt.backspace();
            wizard.set_prompt(self.prompt.text());
        }
    }

    /// Reload the editor after the wizard recomputed its prompt
    pub fn sync_prompt(&mut self, wizard: &WizardState) {
        if self.prompt.text() != wizard.prompt() {
            self.prompt = TextEditor::from_string(wizard.prompt());
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
