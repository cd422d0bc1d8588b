//! Interactive listing: search, filter and page through posts from stdin

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;

use super::list::format_listing;
use crate::content::LoadContext;
use crate::listing::{CategoryFilter, FilterState, ListingEvent, ListingSession, SessionInput};
use crate::Blog;

const HELP: &str = "Type to search. Commands: :cat NAME, :all, :next, :prev, :page N, :clear, :reset, :quit";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Input(SessionInput),
    Quit,
}

/// Parse a line typed at the prompt; `None` for an unknown command
pub fn parse_line(line: &str) -> Option<BrowseCommand> {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Some(BrowseCommand::Input(SessionInput::Keystroke(
            line.to_string(),
        )));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let event = match name {
        "quit" | "q" => return Some(BrowseCommand::Quit),
        "cat" if !arg.is_empty() => ListingEvent::CategorySelected(CategoryFilter::parse(arg)),
        "all" => ListingEvent::CategorySelected(CategoryFilter::All),
        "next" | "n" => ListingEvent::NextPage,
        "prev" | "p" => ListingEvent::PreviousPage,
        "page" => ListingEvent::GoToPage(arg.parse().ok()?),
        "clear" => ListingEvent::ClearSearch,
        "reset" => ListingEvent::Reset,
        _ => return None,
    };

    Some(BrowseCommand::Input(SessionInput::Event(event)))
}

/// Run an interactive listing session on stdin/stdout
pub async fn run(blog: &Blog) -> Result<()> {
    let load = blog.catalog().load(LoadContext::Listing).await;
    if load.is_unavailable() {
        tracing::warn!("Post metadata unavailable at {}", blog.source().describe());
    }

    let presenter = blog.presenter(load.posts, FilterState::default());
    let (input, mut output, session) =
        ListingSession::new(presenter, blog.config.search_debounce()).spawn(16);

    let printer = tokio::spawn(async move {
        while let Some(instruction) = output.recv().await {
            println!("{}", format_listing(&instruction));
        }
    });

    println!("{}", HELP);

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    while let Some(line) = lines.next().await {
        match parse_line(&line?) {
            Some(BrowseCommand::Quit) => break,
            Some(BrowseCommand::Input(message)) => {
                if input.send(message).await.is_err() {
                    break;
                }
            }
            None => println!("{}", HELP),
        }
    }

    drop(input);
    let presenter = session.await?;
    printer.await?;
    tracing::debug!("Browse session ended with {:?}", presenter.state());

    Ok(())
}
