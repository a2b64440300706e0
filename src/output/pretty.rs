use chrono::DateTime;
use colored::Colorize;
use terminal_size::{terminal_size, Width};

use crate::catalog::AppSummary;
use crate::steam::{AppInfo, PlayerStats};

const DEFAULT_WIDTH: usize = 70;
const MAX_WIDTH: usize = 100;

/// Safely truncate a string to n characters, appending "..." if truncated.
/// Works correctly with multi-byte UTF-8 characters.
fn truncate_str(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_chars {
        let truncated: String = chars.iter().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Separator width: the terminal width, capped
fn rule_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| (w as usize).min(MAX_WIDTH))
        .unwrap_or(DEFAULT_WIDTH)
}

fn rule() -> String {
    "─".repeat(rule_width())
}

fn unknown() -> String {
    "unknown".dimmed().to_string()
}

/// Store descriptions are HTML; keep the text only
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Format catalog search results for pretty output
pub fn format_search(results: &[AppSummary]) -> String {
    if results.is_empty() {
        return "No games found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Games".bold()));
    output.push_str(&rule());
    output.push('\n');

    let name_width = rule_width().saturating_sub(12).max(20);
    for app in results {
        output.push_str(&format!(
            "{:>9}  {}\n",
            app.appid.to_string().cyan(),
            truncate_str(&app.name, name_width)
        ));
    }

    output
}

/// Format compiled app info for pretty output
pub fn format_app_info(info: &AppInfo, show_achievements: bool) -> String {
    let mut output = String::new();

    let name = info.name.as_deref().unwrap_or("(unnamed)");
    output.push_str(&format!("{} [{}]\n", name.bold(), info.appid));
    output.push_str(&rule());
    output.push('\n');

    if let Some(ref short) = info.short_description {
        output.push_str(&format!("{}\n\n", strip_tags(short)));
    }

    let price = match (info.is_free, &info.price_overview) {
        (Some(true), _) => "Free".green().to_string(),
        (_, Some(price)) => match (&price.final_formatted, price.discount_percent) {
            (Some(text), Some(pct)) if pct > 0 => format!("{} ({}%)", text, -pct),
            (Some(text), _) => text.clone(),
            _ => unknown(),
        },
        _ => unknown(),
    };
    output.push_str(&format!("{} {}\n", "Price:".cyan(), price));

    let release = info
        .release_date
        .as_ref()
        .map(|r| match (&r.date, r.coming_soon) {
            (Some(date), true) => format!("{} {}", date, "(coming soon)".yellow()),
            (Some(date), false) => date.clone(),
            (None, _) => unknown(),
        })
        .unwrap_or_else(unknown);
    output.push_str(&format!("{} {}\n", "Released:".cyan(), release));

    if let Some(ref developers) = info.developers {
        output.push_str(&format!("{} {}\n", "Developers:".cyan(), developers.join(", ")));
    }
    if let Some(ref publishers) = info.publishers {
        output.push_str(&format!("{} {}\n", "Publishers:".cyan(), publishers.join(", ")));
    }
    if let Some(platforms) = info.platforms {
        let names: Vec<&str> = [
            (platforms.windows, "Windows"),
            (platforms.mac, "macOS"),
            (platforms.linux, "Linux"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
        output.push_str(&format!("{} {}\n", "Platforms:".cyan(), names.join(", ")));
    }
    if let Some(ref website) = info.website {
        output.push_str(&format!("{} {}\n", "Website:".cyan(), website.dimmed()));
    }
    if let Some(ref dlc) = info.dlc {
        output.push_str(&format!("{} {}\n", "DLC:".cyan(), dlc.len()));
    }

    match info.achievements {
        Some(ref achievements) => {
            output.push_str(&format!("{} {}\n", "Achievements:".cyan(), achievements.len()));
            if show_achievements && !achievements.is_empty() {
                output.push('\n');
                for achievement in achievements {
                    let marker = if achievement.hidden {
                        "hidden".dimmed().to_string()
                    } else {
                        String::new()
                    };
                    output.push_str(&format!("  • {} {}\n", achievement.display_name, marker));
                    if let Some(ref description) = achievement.description {
                        output.push_str(&format!("    {}\n", description.dimmed()));
                    }
                }
            }
        }
        None => output.push_str(&format!("{} {}\n", "Achievements:".cyan(), "none".dimmed())),
    }

    output
}

/// Format a user's achievement progress for pretty output
pub fn format_user_stats(stats: &PlayerStats, locked_only: bool) -> String {
    let mut output = String::new();

    let game = stats.game_name.as_deref().unwrap_or("(unknown game)");
    let total = stats.achievements.len();
    let unlocked = stats.unlocked_count();

    output.push_str(&format!("{}\n", game.bold()));
    if let Some(ref steam_id) = stats.steam_id {
        output.push_str(&format!("{} {}\n", "Player:".cyan(), steam_id));
    }
    output.push_str(&rule());
    output.push('\n');

    if total == 0 {
        output.push_str("No achievements recorded.\n");
        return output;
    }

    let percent = unlocked as f64 * 100.0 / total as f64;
    output.push_str(&format!(
        "{} {}/{} ({:.0}%)\n\n",
        "Unlocked:".cyan(),
        unlocked,
        total,
        percent
    ));

    for achievement in &stats.achievements {
        if locked_only && achievement.achieved {
            continue;
        }
        if achievement.achieved {
            let when = achievement
                .unlock_time
                .filter(|t| *t > 0)
                .and_then(|t| DateTime::from_timestamp(t, 0))
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            output.push_str(&format!(
                "  {} {} {}\n",
                "✓".green(),
                achievement.name,
                when.dimmed()
            ));
        } else {
            output.push_str(&format!("  {} {}\n", "✗".dimmed(), achievement.name.dimmed()));
        }
    }

    output
}

/// Format a resolved Steam id for pretty output
pub fn format_steam_id(name: &str, steamid: u64) -> String {
    format!("{} {} → {}", "✓".green(), name.bold(), steamid)
}
