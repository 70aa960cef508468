//! Session commands: login, register, logout, profile.

use crate::context::{take, Context};
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use dialoguer::Password;
use shopfront_sdk::ProfileUpdate;

#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    pub email: String,
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Display name
    pub name: String,

    /// Account email
    pub email: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the signed-in profile
    Show,

    /// Update name, email, or password
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },
}

pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let password = Password::new().with_prompt("Password").interact()?;

    let spinner = ctx.output.spinner("Signing in...");
    let result = ctx.storefront.login(&args.email, &password).await;
    spinner.finish_and_clear();
    result?;

    let session = take(ctx.storefront.store().session().snapshot())?;
    ctx.output
        .success(&format!("Signed in as {}", session.profile.name));
    if session.profile.is_admin {
        ctx.output.info("Admin commands are available");
    }
    Ok(())
}

pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let password = Password::new().with_prompt("Password").interact()?;
    let confirm = Password::new().with_prompt("Confirm password").interact()?;

    let spinner = ctx.output.spinner("Creating account...");
    let result = ctx
        .storefront
        .register(&args.name, &args.email, &password, &confirm)
        .await;
    spinner.finish_and_clear();
    result?;

    let session = take(ctx.storefront.store().session().snapshot())?;
    ctx.output
        .success(&format!("Welcome, {}", session.profile.name));
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    if ctx.storefront.store().current_user().is_none() {
        ctx.output.info("Not signed in");
        return Ok(());
    }
    ctx.storefront.logout()?;
    ctx.output.success("Signed out");
    Ok(())
}

pub async fn profile(args: ProfileArgs, ctx: &Context) -> Result<()> {
    let Some(user) = ctx.storefront.store().current_user() else {
        bail!("not signed in (try `shopfront login`)");
    };

    match args.command {
        ProfileCommand::Show => {
            let spinner = ctx.output.spinner("Loading profile...");
            ctx.storefront.load_user(user.id).await;
            spinner.finish_and_clear();

            let profile = take(ctx.storefront.store().user_detail().snapshot())?;
            ctx.output.header("Profile");
            ctx.output.kv("Name", &profile.name);
            ctx.output.kv("Email", &profile.email);
            ctx.output.kv("Admin", if profile.is_admin { "yes" } else { "no" });
            Ok(())
        }
        ProfileCommand::Update { name, email, password } => {
            let password = if password {
                Some(Password::new().with_prompt("New password").interact()?)
            } else {
                None
            };
            let update = ProfileUpdate {
                name: name.unwrap_or(user.name),
                email: email.unwrap_or(user.email),
                password,
            };

            let spinner = ctx.output.spinner("Updating profile...");
            let result = ctx.storefront.update_profile(update).await;
            spinner.finish_and_clear();
            result?;

            take(ctx.storefront.store().profile_update().snapshot())?;
            ctx.output.success("Profile updated");
            Ok(())
        }
    }
}
