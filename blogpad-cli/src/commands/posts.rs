use anyhow::{Result, bail};
use app::{
    AppContext, ClientError,
    components::PostForm,
    pages::{BlogList, Confirm, admin_dashboard::DELETE_PROMPT},
};
use clap::Subcommand;
use shared::models::{PostId, PostInput};

use super::{admin::StdinConfirm, prompt};
use crate::render;

#[derive(Subcommand, Debug)]
pub enum PostsCommand {
    /// List all posts
    List,

    /// Show a single post
    Show {
        /// Post identifier
        id: PostId,
    },

    /// Create a post (requires a session)
    Create {
        /// Post title; prompted for when omitted
        #[arg(long, short)]
        title: Option<String>,

        /// Post body; prompted for when omitted
        #[arg(long, short)]
        content: Option<String>,
    },

    /// Replace a post's title and content (requires a session)
    Update {
        /// Post identifier
        id: PostId,

        #[arg(long, short)]
        title: String,

        #[arg(long, short)]
        content: String,
    },

    /// Delete a post (requires a session)
    Delete {
        /// Post identifier
        id: PostId,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub async fn run(ctx: &AppContext, command: PostsCommand) -> Result<()> {
    match command {
        PostsCommand::List => list(ctx).await,
        PostsCommand::Show { id } => {
            let post = ctx
                .posts
                .get(&id)
                .await
                .map_err(|err| explain(err, "failed to fetch post"))?;
            print!("{}", render::post_detail(&post));
            Ok(())
        }
        PostsCommand::Create { title, content } => create(ctx, title, content).await,
        PostsCommand::Update { id, title, content } => {
            let post = ctx
                .posts
                .update(&id, &PostInput::new(title, content))
                .await
                .map_err(|err| explain(err, "failed to update post"))?;
            println!("Updated {}", render::post_line(&post));
            Ok(())
        }
        PostsCommand::Delete { id, yes } => {
            if !yes && !StdinConfirm.confirm(DELETE_PROMPT) {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.posts
                .delete(&id)
                .await
                .map_err(|err| explain(err, "failed to delete post"))?;
            println!("Deleted post {id}.");
            Ok(())
        }
    }
}

async fn list(ctx: &AppContext) -> Result<()> {
    let page = BlogList::new(ctx.clone());
    page.mount().await;
    let state = page.state();
    if let Some(error) = state.error {
        bail!(error);
    }
    print!("{}", render::post_listing(&state.posts));
    Ok(())
}

async fn create(ctx: &AppContext, title: Option<String>, content: Option<String>) -> Result<()> {
    let mut form = PostForm::new();
    form.set_title(match title {
        Some(title) => title,
        None => prompt("Title: ")?,
    });
    form.set_content(match content {
        Some(content) => content,
        None => prompt("Content: ")?,
    });

    let post = form
        .submit(|input| async move { ctx.posts.create(&input).await })
        .await
        .map_err(|err| explain(err, "failed to create post"))?;
    println!("Created {}", render::post_line(&post));
    Ok(())
}

/// Turn a client error into something actionable for the terminal.
fn explain(err: ClientError, action: &'static str) -> anyhow::Error {
    match err {
        ClientError::Validation(message) => anyhow::anyhow!(message),
        err if err.is_unauthorized() => anyhow::Error::new(err)
            .context("session expired or missing; run `blogpad login` to sign in again"),
        err => anyhow::Error::new(err).context(action),
    }
}
