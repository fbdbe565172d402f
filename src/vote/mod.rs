pub mod embed;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::store::{StoreError, VoteStore};
use crate::utils::components::truncate_str;

/// Options beyond this many are dropped when a vote is created.
pub const MAX_OPTIONS: usize = 5;

// Discord embed limits. The title is the lookup key read back from the
// message, so it is rejected rather than shortened.
pub const MAX_TITLE_CHARS: usize = 256;
pub const MAX_DESCRIPTION_CHARS: usize = 4096;
const MAX_LABEL_CHARS: usize = 256;
const MAX_FIELD_VALUE_CHARS: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    #[error("a vote titled `{0}` is already open")]
    DuplicateTitle(String),
    #[error("no open vote titled `{0}`")]
    NotFound(String),
    #[error("anonymous votes can not be changed")]
    AlreadyVoted,
    #[error("vote has no option #{0}")]
    UnknownOption(usize),
    #[error("no options given")]
    NoOptions,
    #[error("the {field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NamedBallot {
    pub voter_id: u64,
    pub name: String,
}

/// Per-option state. The variant is picked when the vote is created and
/// never changes: anonymous votes count, named votes remember who voted,
/// in the order they voted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Tally {
    Counter(u32),
    NamedBallots(Vec<NamedBallot>),
}

impl Tally {
    fn empty(anonymity: bool) -> Self {
        if anonymity {
            Tally::Counter(0)
        } else {
            Tally::NamedBallots(Vec::new())
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Tally::Counter(n) => *n as usize,
            Tally::NamedBallots(ballots) => ballots.len(),
        }
    }

    /// `-` when empty, the count for anonymous votes, one voter per line otherwise.
    pub fn render(&self) -> String {
        match self {
            Tally::Counter(0) => "-".to_string(),
            Tally::Counter(n) => n.to_string(),
            Tally::NamedBallots(ballots) if ballots.is_empty() => "-".to_string(),
            Tally::NamedBallots(ballots) => {
                let names = ballots
                    .iter()
                    .map(|b| b.name.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                truncate_str(&names, MAX_FIELD_VALUE_CHARS)
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VoteOption {
    pub label: String,
    pub tally: Tally,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Vote {
    pub title: String,
    pub description: Option<String>,
    pub anonymity: bool,
    pub options: Vec<VoteOption>,
    /// Users who already voted. Only tracked for anonymous votes.
    #[serde(default)]
    pub voters: BTreeSet<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ballot {
    Counted,
    Added,
    Retracted,
}

/// Splits on commas, trims, drops empty entries and keeps the first
/// [`MAX_OPTIONS`]. Repeated labels stay separate options; overlong labels
/// are shortened to fit an embed field name.
pub fn parse_options(options: &str) -> Vec<String> {
    options
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .take(MAX_OPTIONS)
        .map(|o| truncate_str(o, MAX_LABEL_CHARS))
        .collect()
}

fn check_len(value: &str, field: &'static str, max: usize) -> Result<(), VoteError> {
    if value.chars().count() > max {
        return Err(VoteError::TooLong { field, max });
    }
    Ok(())
}

impl Vote {
    pub fn create(
        title: &str,
        description: Option<String>,
        anonymity: bool,
        options: &str,
    ) -> Result<Self, VoteError> {
        check_len(title, "title", MAX_TITLE_CHARS)?;
        if let Some(ref description) = description {
            check_len(description, "description", MAX_DESCRIPTION_CHARS)?;
        }

        let options: Vec<VoteOption> = parse_options(options)
            .into_iter()
            .map(|label| VoteOption {
                label,
                tally: Tally::empty(anonymity),
            })
            .collect();

        if options.is_empty() {
            return Err(VoteError::NoOptions);
        }

        Ok(Self {
            title: title.to_string(),
            description,
            anonymity,
            options,
            voters: BTreeSet::new(),
        })
    }

    /// Anonymous votes accept one ballot per user, ever. Named votes toggle:
    /// voting for an option you already hold retracts it, and a user may hold
    /// several options at once.
    pub fn register(
        &mut self,
        index: usize,
        voter_id: u64,
        display_name: &str,
    ) -> Result<Ballot, VoteError> {
        if index >= self.options.len() {
            return Err(VoteError::UnknownOption(index));
        }
        if self.anonymity && self.voters.contains(&voter_id) {
            return Err(VoteError::AlreadyVoted);
        }

        let ballot = match &mut self.options[index].tally {
            Tally::Counter(n) => {
                *n += 1;
                Ballot::Counted
            }
            Tally::NamedBallots(ballots) => {
                match ballots.iter().position(|b| b.voter_id == voter_id) {
                    Some(held) => {
                        ballots.remove(held);
                        Ballot::Retracted
                    }
                    None => {
                        ballots.push(NamedBallot {
                            voter_id,
                            name: display_name.to_string(),
                        });
                        Ballot::Added
                    }
                }
            }
        };

        if self.anonymity {
            self.voters.insert(voter_id);
        }
        Ok(ballot)
    }
}

/// Opens a new vote. Fails without touching the store if the input does not
/// fit a Discord message or the title is taken.
pub async fn start(
    store: &VoteStore,
    title: &str,
    description: Option<String>,
    anonymity: bool,
    options: &str,
) -> Result<Vote, VoteError> {
    let vote = Vote::create(title, description, anonymity, options)?;
    store.insert_new(vote.clone()).await?;

    tracing::info!(
        "Vote opened: {} ({} options, anonymous: {})",
        vote.title,
        vote.options.len(),
        vote.anonymity
    );
    Ok(vote)
}

pub async fn cast_ballot(
    store: &VoteStore,
    title: &str,
    index: usize,
    voter_id: u64,
    display_name: &str,
) -> Result<(Vote, Ballot), VoteError> {
    let (vote, ballot) = store
        .update(|votes| {
            let vote = votes
                .get_mut(title)
                .ok_or_else(|| VoteError::NotFound(title.to_string()))?;
            let ballot = vote.register(index, voter_id, display_name)?;
            Ok((vote.clone(), ballot))
        })
        .await?;

    tracing::info!("{} | Vote registered for {}", title, vote.options[index].label);
    Ok((vote, ballot))
}

/// Removes the vote and returns its final state.
pub async fn end(store: &VoteStore, title: &str) -> Result<Vote, VoteError> {
    let vote = store.remove(title).await?;

    tracing::info!("Vote ended: {}", vote.title);
    Ok(vote)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(vote: &Vote) -> Vec<&str> {
        vote.options.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn test_parse_options_trims_and_drops_empty() {
        assert_eq!(parse_options(" a, ,b ,, c "), vec!["a", "b", "c"]);
        assert!(parse_options(" , ,").is_empty());
    }

    #[test]
    fn test_parse_options_keeps_first_five() {
        let parsed = parse_options("1,2,3,4,5,6,7");
        assert_eq!(parsed, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_parse_options_keeps_duplicates() {
        assert_eq!(parse_options(" Yes , No ,Yes"), vec!["Yes", "No", "Yes"]);
    }

    #[test]
    fn test_create_picks_tally_shape() {
        let anon = Vote::create("t", None, true, "a,b").unwrap();
        assert!(anon
            .options
            .iter()
            .all(|o| o.tally == Tally::Counter(0)));

        let named = Vote::create("t", None, false, "a,b").unwrap();
        assert!(named
            .options
            .iter()
            .all(|o| matches!(&o.tally, Tally::NamedBallots(b) if b.is_empty())));
        assert_eq!(labels(&named), vec!["a", "b"]);
    }

    #[test]
    fn test_create_without_options_fails() {
        assert!(matches!(
            Vote::create("t", None, true, " , "),
            Err(VoteError::NoOptions)
        ));
    }

    #[test]
    fn test_anonymous_second_ballot_rejected() {
        let mut vote = Vote::create("t", None, true, "a,b").unwrap();
        assert_eq!(vote.register(0, 1, "Ana").unwrap(), Ballot::Counted);

        let before = vote.clone();
        assert!(matches!(vote.register(1, 1, "Ana"), Err(VoteError::AlreadyVoted)));
        assert!(matches!(vote.register(0, 1, "Ana"), Err(VoteError::AlreadyVoted)));
        assert_eq!(vote, before);
        assert_eq!(vote.options[0].tally, Tally::Counter(1));
        assert_eq!(vote.options[1].tally, Tally::Counter(0));
    }

    #[test]
    fn test_named_same_option_twice_retracts() {
        let mut vote = Vote::create("t", None, false, "a,b").unwrap();
        assert_eq!(vote.register(0, 1, "Ana").unwrap(), Ballot::Added);
        assert_eq!(vote.register(0, 2, "Bo").unwrap(), Ballot::Added);
        assert_eq!(vote.options[0].tally.count(), 2);

        assert_eq!(vote.register(0, 1, "Ana").unwrap(), Ballot::Retracted);
        assert_eq!(vote.options[0].tally.count(), 1);
        match &vote.options[0].tally {
            Tally::NamedBallots(b) => assert!(b.iter().all(|ballot| ballot.voter_id != 1)),
            other => panic!("unexpected tally {other:?}"),
        }
    }

    #[test]
    fn test_named_voter_can_hold_several_options() {
        let mut vote = Vote::create("t", None, false, "a,b").unwrap();
        vote.register(0, 1, "Ana").unwrap();
        vote.register(1, 1, "Ana").unwrap();
        assert_eq!(vote.options[0].tally.count(), 1);
        assert_eq!(vote.options[1].tally.count(), 1);
        assert!(vote.voters.is_empty());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut vote = Vote::create("t", None, true, "a").unwrap();
        assert!(matches!(vote.register(3, 1, "Ana"), Err(VoteError::UnknownOption(3))));
        assert!(vote.voters.is_empty());
    }

    #[test]
    fn test_render_tally() {
        assert_eq!(Tally::Counter(0).render(), "-");
        assert_eq!(Tally::Counter(4).render(), "4");
        assert_eq!(Tally::NamedBallots(Vec::new()).render(), "-");
    }

    #[test]
    fn test_named_tally_lists_voters_in_voting_order() {
        let mut vote = Vote::create("t", None, false, "a").unwrap();
        vote.register(0, 900, "Zed").unwrap();
        vote.register(0, 100, "Ana").unwrap();
        vote.register(0, 500, "Bo").unwrap();
        assert_eq!(vote.options[0].tally.render(), "Zed\nAna\nBo");

        // Retracting and voting again moves the voter to the end
        vote.register(0, 900, "Zed").unwrap();
        vote.register(0, 900, "Zed").unwrap();
        assert_eq!(vote.options[0].tally.render(), "Ana\nBo\nZed");
    }

    #[test]
    fn test_named_tally_fits_embed_field() {
        let mut vote = Vote::create("t", None, false, "a").unwrap();
        for voter in 0..100u64 {
            vote.register(0, voter, &"n".repeat(32)).unwrap();
        }
        let rendered = vote.options[0].tally.render();
        assert_eq!(rendered.chars().count(), 1024);
        assert!(rendered.ends_with("..."));
    }

    #[test]
    fn test_overlong_title_rejected() {
        let err = Vote::create(&"x".repeat(257), None, true, "a").unwrap_err();
        assert!(matches!(err, VoteError::TooLong { field: "title", max: 256 }));
        assert!(Vote::create(&"x".repeat(256), None, true, "a").is_ok());

        let err = Vote::create("t", Some("d".repeat(4097)), true, "a").unwrap_err();
        assert!(matches!(err, VoteError::TooLong { field: "description", .. }));
    }

    #[test]
    fn test_overlong_label_shortened() {
        let parsed = parse_options(&format!("{}, b", "y".repeat(300)));
        assert_eq!(parsed[0].chars().count(), 256);
        assert!(parsed[0].ends_with("..."));
        assert_eq!(parsed[1], "b");
    }
}
