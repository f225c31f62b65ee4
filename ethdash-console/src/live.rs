use std::time::Duration;
use ethdash_shared::services::dashboard::Dashboard;
use ethdash_shared::services::wallet_provider::{AccountsChanged, AccountsNotifier};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, warn};
use crate::terminal::TerminalSurface;

/// A line typed into the console, mapped onto the dashboard's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect,
    Disconnect,
    RefreshGas,
    RefreshTokens,
    Switch(Vec<String>),
    Show,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let command = match parts.next()?.to_lowercase().as_str() {
        "connect" | "c" => Command::Connect,
        "disconnect" | "d" => Command::Disconnect,
        "gas" | "g" => Command::RefreshGas,
        "tokens" | "t" => Command::RefreshTokens,
        "switch" | "accounts" => Command::Switch(parts.map(str::to_string).collect()),
        "show" | "s" => Command::Show,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Runs until Ctrl-C or `quit`: periodic refreshes, typed commands and
/// accounts-changed notifications all funnel through this one task.
pub async fn run_live(
    dash: &mut Dashboard<TerminalSurface>,
    notifier: AccountsNotifier,
    mut accounts_changed: AccountsChanged,
    gas_refresh: Duration,
    token_refresh: Duration,
    auto_connect: bool,
) {
    dash.start().await;
    if auto_connect {
        if let Err(e) = dash.connect().await {
            error!(%e, "Initial connect failed");
        }
    }
    dash.surface().print_panel();
    println!("Commands: connect, disconnect, gas, tokens, switch <address...>, show, quit");

    let mut gas_ticker = ticker(gas_refresh);
    let mut token_ticker = ticker(token_refresh);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("🛑 Received shutdown signal, terminating...");
                break;
            }
            _ = gas_ticker.tick() => {
                dash.refresh_gas().await;
                dash.surface().print_panel();
            }
            _ = token_ticker.tick() => {
                if dash.refresh_tokens().await.is_some() {
                    dash.surface().print_panel();
                }
            }
            Some(accounts) = accounts_changed.recv() => {
                if let Err(e) = dash.on_accounts_changed(&accounts).await {
                    error!(%e, "Could not apply account change");
                }
                dash.surface().print_panel();
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        if !handle_line(dash, &notifier, &line).await {
                            break;
                        }
                    }
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        warn!(%e, "stdin closed");
                        stdin_open = false;
                    }
                }
            }
        }
    }
}

/// Applies one typed command. Returns false when the session should end.
async fn handle_line(dash: &mut Dashboard<TerminalSurface>, notifier: &AccountsNotifier, line: &str) -> bool {
    let Some(command) = parse_command(line) else {
        if !line.trim().is_empty() {
            println!("Unknown command: {}", line.trim());
        }
        return true;
    };

    match command {
        Command::Connect => {
            if let Err(e) = dash.connect().await {
                error!(%e, "Connect failed");
            }
        }
        Command::Disconnect => dash.disconnect(),
        Command::RefreshGas => {
            dash.refresh_gas().await;
        }
        Command::RefreshTokens => {
            if dash.refresh_tokens().await.is_none() {
                println!("Connect a wallet first");
            }
        }
        // Delivered like a wallet-side notification and rendered when it arrives
        Command::Switch(accounts) => {
            if notifier.send(accounts).is_err() {
                warn!("Accounts channel closed");
            }
            return true;
        }
        Command::Show => {}
        Command::Quit => return false,
    }

    dash.surface().print_panel();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("connect"), Some(Command::Connect));
        assert_eq!(parse_command("  G "), Some(Command::RefreshGas));
        assert_eq!(parse_command("switch"), Some(Command::Switch(Vec::new())));
        assert_eq!(
            parse_command("switch 0xa826d3484625b29dfcbdaee6ca636a1acb439bf8"),
            Some(Command::Switch(vec!["0xa826d3484625b29dfcbdaee6ca636a1acb439bf8".to_string()]))
        );
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("reload"), None);
        assert_eq!(parse_command(""), None);
    }
}
