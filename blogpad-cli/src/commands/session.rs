use anyhow::{Result, anyhow, bail};
use app::{
    AppContext, ClientError,
    pages::{LoginPage, SignupPage},
};
use rpassword::prompt_password;
use shared::{config::client::Config, models::AuthResponse};

use super::prompt;

pub async fn login(ctx: &AppContext, email: Option<String>) -> Result<()> {
    let page = LoginPage::new(ctx.clone());
    page.set_email(required(email, "Email: ")?);
    page.set_password(prompt_password("Password: ")?);

    let response = page.submit().await.map_err(|err| failure(&err, page.state().error))?;
    print_signed_in(&response, ctx);
    Ok(())
}

pub async fn signup(
    ctx: &AppContext,
    username: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let page = SignupPage::new(ctx.clone());
    page.set_username(required(username, "Username: ")?);
    page.set_email(required(email, "Email: ")?);
    page.set_password(prompt_password("Password: ")?);

    let response = page.submit().await.map_err(|err| failure(&err, page.state().error))?;
    if ctx.auth.is_authenticated() {
        print_signed_in(&response, ctx);
    } else {
        println!(
            "{}",
            response.message.as_deref().unwrap_or("Account created.")
        );
        println!("No session token was issued; run `blogpad login` to sign in.");
    }
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    let was_signed_in = ctx.auth.is_authenticated();
    ctx.auth.logout()?;
    if was_signed_in {
        println!("Signed out.");
    } else {
        println!("No session token stored.");
    }
    Ok(())
}

pub fn status(config: &Config, ctx: &AppContext) {
    println!("server: {}", ctx.client.base_url());
    println!("token store: {}", config.session.store_path().display());
    if ctx.auth.is_authenticated() {
        println!("Signed in (token stored under '{}').", ctx.client.session().key());
    } else {
        println!("Not signed in.");
    }
}

fn required(value: Option<String>, label: &str) -> Result<String> {
    let value = match value {
        Some(value) => value.trim().to_string(),
        None => prompt(label)?,
    };
    if value.is_empty() {
        bail!("{} must not be empty", label.trim_end_matches([':', ' ']));
    }
    Ok(value)
}

/// The screen's message when it recorded one, otherwise the raw error.
fn failure(err: &ClientError, shown: Option<String>) -> anyhow::Error {
    shown.map_or_else(|| anyhow!("{err}"), |message| anyhow!(message))
}

fn print_signed_in(response: &AuthResponse, ctx: &AppContext) {
    match response.user.as_ref().and_then(|user| user.display_name()) {
        Some(name) => println!("Logged in as {name}"),
        None => println!("Logged in."),
    }
    println!("server: {}", ctx.client.base_url());
}
