use serenity::builder::{CreateActionRow, CreateButton};
use serenity::model::application::ButtonStyle;

use crate::vote::Vote;

/// Discord rejects button labels longer than this.
const MAX_LABEL_CHARS: usize = 80;

pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{truncated}...")
    }
}

/// One button per option. The custom id is the option's index, which is
/// what the component handler reads back.
pub fn vote_buttons(vote: &Vote) -> Vec<CreateActionRow> {
    let buttons = vote
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            CreateButton::new(i.to_string())
                .label(truncate_str(&option.label, MAX_LABEL_CHARS))
                .style(ButtonStyle::Primary)
        })
        .collect();

    vec![CreateActionRow::Buttons(buttons)]
}

/// Option index encoded in a vote button's custom id.
pub fn parse_vote_button(custom_id: &str) -> Option<usize> {
    custom_id.parse().ok()
}
