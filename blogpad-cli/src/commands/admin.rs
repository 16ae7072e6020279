//! Interactive admin dashboard.

use anyhow::{Context, Result, bail};
use app::{
    AppContext, ClientError, Route,
    components::{PostForm, post_form::FORM_HEADING},
    pages::{AdminDashboard, Confirm},
};
use shared::models::PostId;
use std::io::{self, Write};

use super::prompt;
use crate::render;

const HELP: &str = "\
Commands:
  list            show the dashboard again
  refresh         reload posts from the server
  new             create a post
  delete <id>     delete a post
  edit <id>       open a post for editing
  help            show this help
  quit            leave the dashboard";

/// Yes/no question on the terminal. Anything but `y` or `yes` declines.
#[derive(Debug, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        io::stdout().flush().ok();
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    let dashboard = AdminDashboard::new(ctx.clone());
    dashboard.mount().await;
    if dashboard.take_redirect() == Some(Route::Login) {
        bail!("not signed in; run `blogpad login` first");
    }

    print!("{}", render::dashboard(&dashboard.state()));
    println!("{HELP}");

    let result = repl(&dashboard).await;
    dashboard.unmount();
    result
}

async fn repl(dashboard: &AdminDashboard) -> Result<()> {
    while let Some(line) = read_command()? {
        let (command, argument) = line
            .split_once(char::is_whitespace)
            .map_or((line.as_str(), ""), |(command, rest)| (command, rest.trim()));

        match command {
            "" => continue,
            "list" => {}
            "refresh" => dashboard.refresh().await,
            "new" => create(dashboard).await?,
            "delete" => match parse_id(argument) {
                // Failures land in the error banner.
                Some(id) => {
                    let _ = dashboard.delete_post(&id, &StdinConfirm).await;
                }
                None => println!("usage: delete <id>"),
            },
            "edit" => match parse_id(argument) {
                Some(id) => dashboard.edit_post(&id),
                None => println!("usage: edit <id>"),
            },
            "help" => {
                println!("{HELP}");
                continue;
            }
            "quit" | "exit" => break,
            other => {
                println!("Unknown command '{other}'. Type 'help' for a list.");
                continue;
            }
        }

        match dashboard.take_redirect() {
            Some(Route::Login) => bail!("session expired; run `blogpad login` to sign in again"),
            Some(route) if !route.is_implemented() => {
                println!("{route} is not available in this client yet.");
            }
            Some(route) => println!("Leaving the dashboard for {route}."),
            None => {}
        }
        print!("{}", render::dashboard(&dashboard.state()));
    }
    Ok(())
}

async fn create(dashboard: &AdminDashboard) -> Result<()> {
    dashboard.open_create_form();
    println!("-- {FORM_HEADING} --");

    let mut form = PostForm::new();
    form.set_title(prompt("Title: ")?);
    form.set_content(prompt("Content: ")?);
    println!("{}", PostForm::submit_label(true));

    if let Err(err) = dashboard.submit_form(&mut form).await {
        if let ClientError::Validation(message) = err {
            println!("{message}");
        }
        dashboard.close_create_form();
    }
    Ok(())
}

fn parse_id(argument: &str) -> Option<PostId> {
    (!argument.is_empty()).then(|| PostId::from(argument))
}

/// `None` once stdin is closed.
fn read_command() -> Result<Option<String>> {
    print!("admin> ");
    io::stdout().flush().ok();
    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok((read > 0).then(|| line.trim().to_string()))
}
