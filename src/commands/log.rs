use poise::CreateReply;

use crate::utils::embed;
use crate::warcraftlogs::client::{self, QueryError};
use crate::{Context, Error};

fn failure_message(err: &QueryError) -> String {
    match err {
        QueryError::ReportNotFound(code) => format!("No report found for `{code}`."),
        QueryError::NoGuildConfigured => {
            "Give a report id; no guild is configured for the latest report.".to_string()
        }
        _ => "Could not fetch the log from Warcraft Logs. Try again later.".to_string(),
    }
}

async fn log_impl(ctx: Context<'_>, id: Option<String>) -> Result<(), Error> {
    // Report lookups take longer than the interaction deadline.
    ctx.defer().await?;

    let data = ctx.data();
    let Some(credentials) = data.secrets.warcraft_logs() else {
        ctx.send(CreateReply::default().embed(embed::error(
            "Warcraft Logs credentials are not configured.",
        )))
        .await?;
        return Ok(());
    };

    let result = client::fetch_report(
        &data.http_client,
        &credentials,
        id.as_deref(),
        data.settings.analytics_guild_id,
    )
    .await;

    let reply = match result {
        Ok(report) => {
            CreateReply::default().embed(crate::warcraftlogs::embed::report_summary(&report))
        }
        Err(e) => {
            tracing::error!("Failed to fetch report {:?}: {e}", id);
            CreateReply::default().embed(embed::error(&failure_message(&e)))
        }
    };

    ctx.send(reply).await?;
    Ok(())
}

/// Fetches the warcraft log
#[poise::command(slash_command, guild_only)]
pub async fn log(
    ctx: Context<'_>,
    #[description = "The report ID"] id: Option<String>,
) -> Result<(), Error> {
    log_impl(ctx, id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message() {
        assert_eq!(
            failure_message(&QueryError::ReportNotFound("abc".to_string())),
            "No report found for `abc`."
        );
        assert!(failure_message(&QueryError::EmptyResponse).contains("Try again later"));
    }
}
