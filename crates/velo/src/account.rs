// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `velo login` and `velo subscriptions`.

use colored::Colorize;
use serde::Serialize;
use velo_client::ApiClient;
use velo_config::model::SessionConfig;
use velo_core::model::{AuthResponse, Subscription};
use velo_core::types::SubscriptionStatus;

use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct SessionSection<'a> {
    session: &'a SessionConfig,
}

/// A `[session]` table ready to paste into `velo.toml`.
fn session_snippet(auth: &AuthResponse) -> Result<String, CliError> {
    let session = SessionConfig {
        token: Some(auth.token.clone()),
        user_id: Some(auth.user_id),
        name: Some(auth.name.clone()),
        email: Some(auth.email.clone()),
        role: auth.role,
    };
    toml::to_string(&SessionSection { session: &session })
        .map_err(|e| CliError::Output(e.to_string()))
}

/// Signs in and prints the session; nothing is written to disk.
pub async fn run_login(client: &ApiClient, email: &str, password: &str) -> Result<(), CliError> {
    let auth = client.login(email, password).await?;
    eprintln!("Signed in as {} ({}). Add this to velo.toml:", auth.name, auth.role);
    print!("{}", session_snippet(&auth)?);
    Ok(())
}

pub async fn run_subscriptions(
    client: &ApiClient,
    json: bool,
    use_color: bool,
) -> Result<(), CliError> {
    let subscriptions = client.my_subscriptions().await?;
    if json {
        return output::print_json(&subscriptions);
    }
    if subscriptions.is_empty() {
        println!("No subscriptions.");
        return Ok(());
    }
    for subscription in &subscriptions {
        println!("{}", subscription_line(subscription, use_color));
    }
    Ok(())
}

fn subscription_line(s: &Subscription, use_color: bool) -> String {
    let name = match (&s.session_type_name, &s.session_type_option_name) {
        (Some(st), Some(opt)) => format!("{st} ({opt})"),
        (Some(st), None) => st.clone(),
        (None, Some(opt)) => opt.clone(),
        (None, None) => format!("option #{}", s.session_type_option_id),
    };
    let status = s.status.to_string();
    let status = match (use_color, s.status) {
        (true, SubscriptionStatus::Active) => status.green().to_string(),
        (true, SubscriptionStatus::Paused) => status.yellow().to_string(),
        (true, _) => status.red().to_string(),
        (false, _) => status,
    };
    format!(
        "{:>6}  {:<12}  {:<32}  {}/{} sessions left  {} .. {}  {}",
        s.id,
        s.player_name,
        name,
        s.tokens_remaining,
        s.tokens_per_period,
        s.current_period_start,
        s.current_period_end,
        status
    )
}
