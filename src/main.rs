// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! `agentwallet-console` - operator console over the AgentWallet API.
//!
//! Each command maps onto one resource operation and prints the result as
//! pretty JSON on stdout. Errors go to stderr: exit code 1 for failed calls,
//! 2 for usage errors.

use std::process::ExitCode;

use agentwallet_console::api::{
    AgentFilters, AgentStatus, AuditLogFilters, LoginRequest, RegisterRequest, TransactionFilters,
    TransactionStatus, WalletFilters,
};
use agentwallet_console::telemetry;
use agentwallet_console::{ApiClient, ClientConfig, ClientError, SessionEvent};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tracing::debug;

const USAGE: &str = "\
usage: agentwallet-console <command> [args]

auth:
  login <email> <password>
  register <email> <password> <organization>
  logout
  status

resources:
  overview
  agents [status]          agent <id>
  wallets [chain]          wallet <id>
  transactions [status]    transaction <id>
  policies                 policy <id>
  audit-log [action]
  analytics [days]

billing:
  billing
  tiers
  upgrade <tier>";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login { email: String, password: String },
    Register { email: String, password: String, organization: String },
    Logout,
    Status,
    Overview,
    Agents(Option<AgentStatus>),
    Agent(String),
    Wallets(Option<String>),
    Wallet(String),
    Transactions(Option<TransactionStatus>),
    Transaction(String),
    Policies,
    Policy(String),
    AuditLog(Option<String>),
    Analytics(Option<u32>),
    Billing,
    Tiers,
    Upgrade(String),
}

#[derive(Debug, PartialEq, Eq)]
struct UsageError(String);

impl Command {
    fn parse(args: &[String]) -> Result<Self, UsageError> {
        let (name, rest) = args
            .split_first()
            .ok_or_else(|| UsageError("missing command".to_string()))?;
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("register", [email, password, organization]) => Command::Register {
                email: email.to_string(),
                password: password.to_string(),
                organization: organization.to_string(),
            },
            ("logout", []) => Command::Logout,
            ("status", []) => Command::Status,
            ("overview", []) => Command::Overview,
            ("agents", []) => Command::Agents(None),
            ("agents", [status]) => Command::Agents(Some(parse_enum("agent status", status)?)),
            ("agent", [id]) => Command::Agent(id.to_string()),
            ("wallets", []) => Command::Wallets(None),
            ("wallets", [chain]) => Command::Wallets(Some(chain.to_string())),
            ("wallet", [id]) => Command::Wallet(id.to_string()),
            ("transactions", []) => Command::Transactions(None),
            ("transactions", [status]) => {
                Command::Transactions(Some(parse_enum("transaction status", status)?))
            }
            ("transaction", [id]) => Command::Transaction(id.to_string()),
            ("policies", []) => Command::Policies,
            ("policy", [id]) => Command::Policy(id.to_string()),
            ("audit-log", []) => Command::AuditLog(None),
            ("audit-log", [action]) => Command::AuditLog(Some(action.to_string())),
            ("analytics", []) => Command::Analytics(None),
            ("analytics", [days]) => Command::Analytics(Some(days.parse().map_err(|_| {
                UsageError(format!("days must be a positive integer, got '{days}'"))
            })?)),
            ("billing", []) => Command::Billing,
            ("tiers", []) => Command::Tiers,
            ("upgrade", [tier]) => Command::Upgrade(tier.to_string()),
            (other, _) => {
                return Err(UsageError(format!(
                    "unknown command or wrong arguments: {other}"
                )))
            }
        };
        Ok(command)
    }
}

/// Parse a closed enum using its wire name.
fn parse_enum<T: DeserializeOwned>(what: &str, value: &str) -> Result<T, UsageError> {
    serde_json::from_value(Value::String(value.to_string()))
        .map_err(|_| UsageError(format!("unknown {what} '{value}'")))
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(ClientError::Encode)
}

async fn run(client: &ApiClient, command: Command) -> Result<Value, ClientError> {
    match command {
        Command::Login { email, password } => {
            let response = client
                .auth()
                .login(&LoginRequest::new(email, password))
                .await?;
            to_json(response.user)
        }
        Command::Register {
            email,
            password,
            organization,
        } => {
            let details = RegisterRequest {
                email,
                password,
                organization_name: organization,
            };
            let response = client.auth().register(&details).await?;
            to_json(response.user)
        }
        Command::Logout => {
            client.auth().logout()?;
            Ok(json!({ "signed_in": false }))
        }
        Command::Status => Ok(json!({
            "signed_in": client.session().is_active(),
            "api_url": client.engine().base_url(),
        })),
        Command::Overview => to_json(client.dashboard().overview().await?),
        Command::Agents(status) => {
            let filters = AgentFilters {
                status,
                ..AgentFilters::default()
            };
            to_json(client.agents().list(Some(&filters)).await?)
        }
        Command::Agent(id) => to_json(client.agents().get(&id).await?),
        Command::Wallets(chain) => {
            let filters = WalletFilters {
                chain,
                ..WalletFilters::default()
            };
            to_json(client.wallets().list(Some(&filters)).await?)
        }
        Command::Wallet(id) => to_json(client.wallets().get(&id).await?),
        Command::Transactions(status) => {
            let filters = TransactionFilters {
                status,
                ..TransactionFilters::default()
            };
            to_json(client.transactions().list(Some(&filters)).await?)
        }
        Command::Transaction(id) => to_json(client.transactions().get(&id).await?),
        Command::Policies => to_json(client.policies().list(None).await?),
        Command::Policy(id) => to_json(client.policies().get(&id).await?),
        Command::AuditLog(action) => {
            let filters = AuditLogFilters {
                action,
                ..AuditLogFilters::default()
            };
            to_json(client.audit_log().list(Some(&filters)).await?)
        }
        Command::Analytics(days) => {
            let analytics = client.analytics();
            let summary = analytics.summary(days).await?;
            let daily = analytics.daily_spend(days).await?;
            let agents = analytics.agent_breakdown().await?;
            Ok(json!({
                "summary": to_json(summary)?,
                "daily_spend": to_json(daily)?,
                "agent_breakdown": to_json(agents)?,
            }))
        }
        Command::Billing => to_json(client.billing().current().await?),
        Command::Tiers => to_json(client.billing().tiers().await?),
        Command::Upgrade(tier) => to_json(client.billing().upgrade(&tier).await?),
    }
}

/// Print a hint whenever the session expires. Ends when every session
/// handle has been dropped.
async fn watch_session(mut events: broadcast::Receiver<SessionEvent>) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::Expired { login_path }) => {
                eprintln!("Session expired. Sign in again ({login_path}): agentwallet-console login <email> <password>");
            }
            Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = telemetry::init_tracing() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(UsageError(reason)) => {
            eprintln!("{reason}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let client = match ClientConfig::from_env()
        .map_err(ClientError::from)
        .and_then(|config| ApiClient::from_config(&config))
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    debug!(api_url = client.engine().base_url(), "Console ready");
    let watcher = tokio::spawn(watch_session(client.session().subscribe()));
    let outcome = run(&client, command).await;
    drop(client);
    // Let the watcher drain pending events before exiting.
    let _ = watcher.await;

    match outcome.and_then(|value| serde_json::to_string_pretty(&value).map_err(ClientError::Encode)) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
