//! Card import command implementation
//!
//! Converts a Trello card into a GitHub issue and links the two: the card's
//! short URL is commented on the issue, and the issue URL is attached to the
//! card. Both link writes are attempted; a failed one is logged, not fatal —
//! the issue already exists at that point and aborting would not undo it.

use crate::config::Config;
use crate::github::{GitHubClient, Issue};
use crate::http::HttpClient;
use crate::import;
use crate::trello::{self, TrelloClient};
use anyhow::Result;
use log::warn;

/// Import a card from a configured board as a GitHub issue
pub fn run_import_card(card_number: u64, kind: &str) -> Result<()> {
    let config = Config::load()?;
    let github_settings = config.github()?;
    let trello_settings = config.trello()?;
    let board_id = config.board_id_for(kind)?;

    let github = GitHubClient::new(&github_settings.repository, &github_settings.token);
    let trello = TrelloClient::new(&trello_settings.key, &trello_settings.token);

    import_card(&github, &trello, board_id, card_number)?;
    Ok(())
}

/// The import flow, separated from config/client construction for testing
pub fn import_card<G: HttpClient, T: HttpClient>(
    github: &GitHubClient<G>,
    trello: &TrelloClient<T>,
    board_id: &str,
    card_number: u64,
) -> Result<Issue> {
    let board = trello.get_board(board_id)?;
    let card = trello.get_card(board_id, card_number)?;
    let defs = trello.get_custom_fields(board_id)?;
    let fields = trello::resolve_custom_fields(&defs, &card);

    let user = github.current_user()?;
    let payload = import::issue_payload(&card, &fields, &user.login);

    let issue = github.create_issue(&payload)?;
    println!(
        "Created issue #{} from card #{} on board {}",
        issue.number, card.id_short, board.name
    );

    if let Err(err) = github.add_comment(issue.number, &card.short_url) {
        warn!("Could not comment the card link on issue #{}: {err}", issue.number);
    }
    if let Err(err) = trello.attach_url(&card.id, &issue.html_url) {
        warn!("Could not attach the issue link to card #{}: {err}", card.id_short);
    }

    Ok(issue)
}
