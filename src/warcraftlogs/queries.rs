pub const REPORT_QUERY: &str = r#"
query Report($code: String!) {
    reportData {
        report(code: $code) {
            code title startTime
            zone { name }
            fights(killType: Encounters) { id name difficulty kill fightPercentage }
            rankings
        }
    }
}
"#;

pub const LATEST_REPORT_QUERY: &str = r#"
query LatestReport($guildId: Int!) {
    reportData {
        reports(guildID: $guildId, limit: 1) { data { code } }
    }
}
"#;
