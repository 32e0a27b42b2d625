//! Prompt styling shared by every interactive question.

use console::{Style, style};
use dialoguer::theme::ColorfulTheme;

/// Theme for the connection prompts and the table picker.
///
/// Checked tables render green so the pre-selected state is obvious.
pub fn dialoguer_theme() -> ColorfulTheme {
    ColorfulTheme {
        active_item_style: Style::new().green().bold(),
        active_item_prefix: style("›".to_string()).green().bold(),
        inactive_item_prefix: style(" ".to_string()),
        checked_item_prefix: style("[x]".to_string()).green(),
        unchecked_item_prefix: style("[ ]".to_string()).dim(),
        prompt_style: Style::new().bold(),
        prompt_prefix: style("?".to_string()).cyan().bold(),
        success_prefix: style("✔".to_string()).green().bold(),
        error_prefix: style("✖".to_string()).red().bold().italic(),
        hint_style: Style::new().dim(),
        values_style: Style::new().green(),
        ..Default::default()
    }
}
