//! Terminal rendering for markdown output
//!
//! Uses termimad for styled output, with a plain-text mode for pipes and
//! tests.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders core display output either styled or as plain markdown
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
    /// Skin for activity lines that need attention
    alert_skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Green);
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        let mut alert_skin = skin.clone();
        alert_skin.bold.set_fg(Color::Red);

        Self {
            rich_enabled,
            skin,
            alert_skin,
        }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                // Keep the hash marks visible so IDs in "# 3. Wheat" stay readable
                println!("\x1b[32m{line}\x1b[0m");
            } else if line.contains("**overdue**") {
                self.alert_skin.print_inline(line);
                println!();
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
