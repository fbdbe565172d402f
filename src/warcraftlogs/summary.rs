use std::collections::{BTreeMap, BTreeSet};

use super::models::{Fight, FightRanking, Report, RoleRanking};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Normal,
    Heroic,
    Mythic,
}

impl Difficulty {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            3 => Some(Self::Normal),
            4 => Some(Self::Heroic),
            5 => Some(Self::Mythic),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Heroic => "Heroic",
            Self::Mythic => "Mythic",
        }
    }
}

/// Best attempt at one boss: `0.0` once killed, otherwise the lowest
/// remaining boss health seen on a wipe.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPull {
    pub name: String,
    pub percentage: f64,
}

/// Best pulls per difficulty, bosses in order of first appearance.
pub fn best_pulls(fights: &[Fight]) -> BTreeMap<Difficulty, Vec<BestPull>> {
    let mut pulls: BTreeMap<Difficulty, Vec<BestPull>> = BTreeMap::new();

    for fight in fights {
        let Some(difficulty) = fight.difficulty.and_then(Difficulty::from_code) else {
            tracing::debug!("Skipping fight {} without a raid difficulty", fight.id);
            continue;
        };

        let percentage = if fight.kill.unwrap_or(false) {
            0.0
        } else {
            fight.fight_percentage.unwrap_or(100.0)
        };

        let bosses = pulls.entry(difficulty).or_default();
        match bosses.iter_mut().find(|b| b.name == fight.name) {
            Some(best) => best.percentage = best.percentage.min(percentage),
            None => bosses.push(BestPull {
                name: fight.name.clone(),
                percentage,
            }),
        }
    }

    pulls
}

/// One line per boss, killed bosses without a percentage.
pub fn render_pulls(pulls: &[BestPull]) -> String {
    pulls
        .iter()
        .map(|pull| {
            if pull.percentage > 0.0 {
                format!("{} ({}%)", pull.name, pull.percentage)
            } else {
                pull.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rendered boss sections, hardest difficulty first.
pub fn boss_sections(report: &Report) -> Vec<(Difficulty, String)> {
    best_pulls(&report.fights)
        .into_iter()
        .rev()
        .map(|(difficulty, pulls)| (difficulty, render_pulls(&pulls)))
        .collect()
}

/// Character names that appeared in each role, deduplicated and sorted.
#[derive(Debug, Default, PartialEq)]
pub struct Participants {
    pub dps: BTreeSet<String>,
    pub healers: BTreeSet<String>,
    pub tanks: BTreeSet<String>,
}

pub fn participants(rankings: &[FightRanking]) -> Participants {
    let mut roster = Participants::default();
    let names = |role: &RoleRanking| {
        role.characters
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<_>>()
    };

    for fight in rankings {
        roster.dps.extend(names(&fight.roles.dps));
        roster.healers.extend(names(&fight.roles.healers));
        roster.tanks.extend(names(&fight.roles.tanks));
    }

    roster
}

pub fn render_roster(names: &BTreeSet<String>) -> String {
    names.iter().cloned().collect::<Vec<_>>().join("\n")
}

/// Highest rank percentile in the report, e.g. `97.5% Ash (Eranog)`.
pub fn top_parse(rankings: &[FightRanking]) -> Option<String> {
    let mut best: Option<(f64, String)> = None;

    for fight in rankings {
        let roles = [&fight.roles.tanks, &fight.roles.healers, &fight.roles.dps];
        for character in roles.iter().flat_map(|r| r.characters.iter()) {
            let Some(rank) = character.rank_percent else {
                continue;
            };
            if best.as_ref().map_or(true, |(top, _)| rank > *top) {
                best = Some((
                    rank,
                    format!("{rank}% {} ({})", character.name, fight.encounter.name),
                ));
            }
        }
    }

    best.map(|(_, line)| line)
}
