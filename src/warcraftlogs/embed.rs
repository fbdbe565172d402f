use serenity::builder::CreateEmbed;

use super::client::report_url;
use super::models::Report;
use super::summary;

const REPORT_COLOR: u32 = 0x0099FF;

/// Discord rejects empty field values.
fn or_dash(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// `Tuesday, 14 March 2023` in UTC.
pub fn format_start_time(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%A, %-d %B %Y").to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}

pub fn report_summary(report: &Report) -> CreateEmbed {
    let title = report
        .zone
        .as_ref()
        .map_or(report.title.as_str(), |z| z.name.as_str());

    let mut embed = CreateEmbed::new()
        .title(title)
        .url(report_url(&report.code))
        .description(format_start_time(report.start_time))
        .color(REPORT_COLOR);

    for (difficulty, section) in summary::boss_sections(report) {
        embed = embed.field(difficulty.label(), or_dash(section), false);
    }

    let rankings = report
        .rankings
        .as_ref()
        .map(|r| r.data.as_slice())
        .unwrap_or_default();

    let top = summary::top_parse(rankings).unwrap_or_default();
    embed = embed.field("Top parse", or_dash(top), false);

    let roster = summary::participants(rankings);
    embed
        .field("Damage", or_dash(summary::render_roster(&roster.dps)), true)
        .field("Healing", or_dash(summary::render_roster(&roster.healers)), true)
        .field("Tanking", or_dash(summary::render_roster(&roster.tanks)), true)
}
