use serde::Deserialize;

// GraphQL response wrapper
#[derive(Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

// Report lookup
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReportQueryData {
    pub report_data: ReportLookup,
}

#[derive(Deserialize, Debug)]
pub struct ReportLookup {
    pub report: Option<Report>,
}

// Most recent report of a guild
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LatestReportData {
    pub report_data: LatestReportLookup,
}

#[derive(Deserialize, Debug)]
pub struct LatestReportLookup {
    pub reports: ReportPage,
}

#[derive(Deserialize, Debug)]
pub struct ReportPage {
    pub data: Vec<ReportCode>,
}

#[derive(Deserialize, Debug)]
pub struct ReportCode {
    pub code: String,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub code: String,
    pub title: String,
    /// Milliseconds since the Unix epoch.
    pub start_time: i64,
    pub zone: Option<Zone>,
    #[serde(default)]
    pub fights: Vec<Fight>,
    pub rankings: Option<Rankings>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Zone {
    pub name: String,
}

/// One boss attempt. Fields are optional upstream for non-encounter fights.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Fight {
    pub id: i64,
    pub name: String,
    pub difficulty: Option<u8>,
    pub kill: Option<bool>,
    pub fight_percentage: Option<f64>,
}

// `rankings` is an opaque JSON scalar upstream; these are the parts we read.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Rankings {
    #[serde(default)]
    pub data: Vec<FightRanking>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct FightRanking {
    pub encounter: Encounter,
    #[serde(default)]
    pub roles: Roles,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Encounter {
    pub name: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Roles {
    pub tanks: RoleRanking,
    pub healers: RoleRanking,
    pub dps: RoleRanking,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct RoleRanking {
    pub characters: Vec<RankedCharacter>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RankedCharacter {
    pub name: String,
    pub rank_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_report() {
        let json = r#"{
            "reportData": {
                "report": {
                    "code": "vjxphMbz3GqYkCng",
                    "title": "Tuesday raid",
                    "startTime": 1678800000000,
                    "zone": { "name": "Vault of the Incarnates" },
                    "fights": [
                        { "id": 2, "name": "Eranog", "difficulty": 4, "kill": true, "fightPercentage": 0.0 },
                        { "id": 5, "name": "Terros", "difficulty": 4, "kill": false, "fightPercentage": 12.34 }
                    ],
                    "rankings": {
                        "data": [
                            {
                                "encounter": { "id": 2587, "name": "Eranog" },
                                "roles": {
                                    "tanks": { "name": "Tanks", "characters": [{ "name": "Brom", "rankPercent": 55 }] },
                                    "healers": { "name": "Healers", "characters": [] },
                                    "dps": { "name": "DPS", "characters": [{ "name": "Ash", "rankPercent": 97.5, "amount": 100 }] }
                                }
                            }
                        ]
                    }
                }
            }
        }"#;
        let data: ReportQueryData = serde_json::from_str(json).unwrap();
        let report = data.report_data.report.unwrap();
        assert_eq!(report.code, "vjxphMbz3GqYkCng");
        assert_eq!(report.zone.unwrap().name, "Vault of the Incarnates");
        assert_eq!(report.fights.len(), 2);
        assert_eq!(report.fights[1].fight_percentage, Some(12.34));
        assert_eq!(report.fights[0].kill, Some(true));

        let rankings = report.rankings.unwrap();
        assert_eq!(rankings.data[0].encounter.name, "Eranog");
        assert_eq!(rankings.data[0].roles.dps.characters[0].rank_percent, Some(97.5));
        assert!(rankings.data[0].roles.healers.characters.is_empty());
    }

    #[test]
    fn test_deserialize_missing_report() {
        let json = r#"{ "reportData": { "report": null } }"#;
        let data: ReportQueryData = serde_json::from_str(json).unwrap();
        assert!(data.report_data.report.is_none());
    }

    #[test]
    fn test_deserialize_latest_report() {
        let json = r#"{ "reportData": { "reports": { "data": [{ "code": "abc" }] } } }"#;
        let data: LatestReportData = serde_json::from_str(json).unwrap();
        assert_eq!(data.report_data.reports.data[0].code, "abc");
    }
}
