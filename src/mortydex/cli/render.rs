//! # Rendering
//!
//! Turns command results into terminal text. Every `render_*` function
//! returns a `String` so output can be asserted on without a terminal;
//! `print_*` wrappers write to stdout.
//!
//! Layout (widths, truncation, padding) is computed on plain text before
//! colors are applied, so ANSI codes never throw off alignment.

use chrono::{DateTime, Utc};
use colored::*;
use mortydex::api::{CharacterRow, CharacterView, CmdMessage, ConfigKey, MessageLevel};
use mortydex::commands::comments::short_id;
use mortydex::config::DexConfig;
use mortydex::filter::{FilterSelection, FilterState};
use mortydex::model::{Comment, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const FAVORITE_MARKER: &str = "♥";
pub const NAME_WIDTH: usize = 32;
pub const SPECIES_WIDTH: usize = 16;
pub const STATUS_WIDTH: usize = 8;
pub const TIME_WIDTH: usize = 14;

pub fn render_character_list(rows: &[CharacterRow], empty_message: &str) -> String {
    if rows.is_empty() {
        return format!("{}\n", empty_message.dimmed());
    }

    let mut out = String::new();
    for row in rows {
        let c = &row.character;
        let marker = if row.is_favorite {
            FAVORITE_MARKER.red().to_string()
        } else {
            " ".to_string()
        };

        let name = pad_to_width(&truncate_to_width(&c.name, NAME_WIDTH), NAME_WIDTH);
        let name = if row.is_deleted {
            name.dimmed().to_string()
        } else {
            name.bold().to_string()
        };
        let species = pad_to_width(&truncate_to_width(&c.species, SPECIES_WIDTH), SPECIES_WIDTH);

        out.push_str(&format!(
            "{} {:>4}. {} {} {} {}\n",
            marker,
            c.id.to_string().yellow(),
            name,
            species,
            status_label(c.status, STATUS_WIDTH),
            c.gender.as_str().dimmed()
        ));
    }
    out
}

pub fn render_character_view(view: &CharacterView) -> String {
    let detail = &view.detail;
    let c = &detail.character;
    let mut out = String::new();

    let marker = if view.is_favorite {
        format!("{} ", FAVORITE_MARKER.red())
    } else {
        String::new()
    };
    let deleted = if view.is_deleted {
        format!("  {}", "[deleted]".dimmed())
    } else {
        String::new()
    };
    out.push_str(&format!(
        "{}{} {}{}\n",
        marker,
        c.name.bold(),
        format!("#{}", c.id).yellow(),
        deleted
    ));
    out.push_str(&format!("{}\n", "-".repeat(40).dimmed()));

    let fields = [
        ("Status", status_label(c.status, 0)),
        ("Species", c.species.clone()),
        ("Gender", c.gender.as_str().to_string()),
        ("Origin", detail.origin.clone()),
        ("Location", detail.location.clone()),
        ("Image", c.image_url.dimmed().to_string()),
    ];
    for (label, value) in fields {
        out.push_str(&format!("  {:<10} {}\n", format!("{}:", label), value));
    }

    out.push_str(&format!(
        "\n{} ({})\n",
        "Episodes".bold(),
        detail.episodes.len()
    ));
    for episode in &detail.episodes {
        out.push_str(&format!("  {}  {}\n", episode.code.cyan(), episode.name));
    }

    out.push_str(&format!(
        "\n{} ({})\n",
        "Comments".bold(),
        view.comments.len()
    ));
    if view.comments.is_empty() {
        out.push_str(&format!("  {}\n", "No comments yet".dimmed()));
    } else {
        out.push_str(&render_comments(&view.comments));
    }
    out
}

/// One line per comment: short id, age, text exactly as stored.
pub fn render_comments(comments: &[Comment]) -> String {
    let mut out = String::new();
    for comment in comments {
        out.push_str(&format!(
            "  {} {}  {}\n",
            short_id(&comment.id).yellow(),
            format_time_ago(comment.created_at).dimmed(),
            comment.text
        ));
    }
    out
}

pub fn render_filters(state: &FilterState) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<9} {}\n",
        "Applied:",
        describe_selection(&state.applied)
    ));
    out.push_str(&format!(
        "{:<9} {}\n",
        "Pending:",
        describe_selection(&state.pending)
    ));
    let search = if state.applied.search.is_empty() {
        "none".dimmed().to_string()
    } else {
        format!("\"{}\"", state.applied.search)
    };
    out.push_str(&format!("{:<9} {}\n", "Search:", search));
    if state.has_uncommitted_changes() {
        out.push_str(&format!(
            "{}\n",
            "Pending changes not applied (run `mortydex filter apply`)".yellow()
        ));
    }
    out
}

fn describe_selection(selection: &FilterSelection) -> String {
    if selection.has_active_filters() {
        selection.describe()
    } else {
        "none".dimmed().to_string()
    }
}

pub fn render_config(config: &DexConfig) -> String {
    let mut out = String::new();
    for key in ConfigKey::ALL {
        let value = config.get(*key);
        let value = if value.is_empty() {
            "(unset)".dimmed().to_string()
        } else {
            value
        };
        out.push_str(&format!("{} = {}\n", key.name(), value));
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn status_label(status: Status, width: usize) -> String {
    let label = format!("{:<width$}", status.as_str(), width = width);
    match status {
        Status::Alive => label.green().to_string(),
        Status::Dead => label.red().to_string(),
        Status::Unknown => label.dimmed().to_string(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mortydex::filter::{FilterEdit, MembershipScope};
    use mortydex::model::{Character, CharacterDetail, Episode, Gender};
    use mortydex::store::comments::escape_html;

    fn plain() {
        colored::control::set_override(false);
    }

    fn row(id: u32, name: &str, favorite: bool) -> CharacterRow {
        CharacterRow {
            character: Character::new(id, name, "Human", Status::Alive, Gender::Male),
            is_favorite: favorite,
            is_deleted: false,
        }
    }

    fn comment(text: &str, minutes_ago: i64) -> Comment {
        Comment {
            id: "3f2a1b2c-0000-4000-8000-000000000000".to_string(),
            character_id: 1,
            text: text.to_string(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn empty_list_shows_message() {
        plain();
        assert_eq!(
            render_character_list(&[], "No characters found.").trim(),
            "No characters found."
        );
    }

    #[test]
    fn list_marks_favorites() {
        plain();
        let output = render_character_list(&[row(1, "Rick Sanchez", true), row(2, "Morty Smith", false)], "");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(FAVORITE_MARKER));
        assert!(lines[0].contains("   1. Rick Sanchez"));
        assert!(!lines[1].contains(FAVORITE_MARKER));
        assert!(lines[1].contains("Alive"));
    }

    #[test]
    fn long_names_are_truncated_to_column() {
        plain();
        let long = "Abradolf Lincler the Third of Dimension C-137 Prime";
        let output = render_character_list(&[row(5, long, false)], "");
        assert!(output.contains('…'));
        assert!(!output.contains("Prime"));
    }

    #[test]
    fn truncate_respects_wide_characters() {
        assert_eq!(truncate_to_width("Rick", 10), "Rick");
        let cut = truncate_to_width("ミスター・ミーシックス", 8);
        assert!(cut.width() <= 8);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn comments_render_stored_text_verbatim() {
        plain();
        let output = render_comments(&[comment("&lt;b&gt;Wubba&lt;&#x2F;b&gt;", 3)]);
        assert!(output.contains("3f2a1b2c"));
        assert!(output.contains("&lt;b&gt;Wubba&lt;&#x2F;b&gt;"));
        assert!(output.contains("minutes ago"));
    }

    #[test]
    fn literal_entities_typed_by_the_user_survive_rendering() {
        plain();
        let stored = escape_html("use &lt; for <");
        let output = render_comments(&[comment(&stored, 1)]);
        assert!(output.contains("use &lt; for &lt;"));
        assert!(!output.contains("use < for"));
    }

    #[test]
    fn view_shows_detail_and_comments() {
        plain();
        let view = CharacterView {
            detail: CharacterDetail {
                character: Character::new(1, "Rick Sanchez", "Human", Status::Alive, Gender::Male),
                origin: "Earth (C-137)".to_string(),
                location: "Citadel of Ricks".to_string(),
                episodes: vec![Episode {
                    id: 1,
                    name: "Pilot".to_string(),
                    code: "S01E01".to_string(),
                }],
            },
            is_favorite: true,
            is_deleted: true,
            comments: vec![],
        };
        let output = render_character_view(&view);
        assert!(output.starts_with(FAVORITE_MARKER));
        assert!(output.contains("Rick Sanchez #1"));
        assert!(output.contains("[deleted]"));
        assert!(output.contains("Earth (C-137)"));
        assert!(output.contains("S01E01  Pilot"));
        assert!(output.contains("Comments (0)"));
        assert!(output.contains("No comments yet"));
    }

    #[test]
    fn filters_show_pending_warning() {
        plain();
        let mut state = FilterState::default();
        state.edit(&FilterEdit {
            scope: Some(MembershipScope::Starred),
            ..Default::default()
        });
        let output = render_filters(&state);
        assert!(output.contains("Applied:  none"));
        assert!(output.contains("Pending:  character=starred"));
        assert!(output.contains("Pending changes not applied"));

        state.commit();
        assert!(!render_filters(&state).contains("Pending changes"));
    }

    #[test]
    fn config_lists_every_key() {
        plain();
        let output = render_config(&DexConfig::default());
        for key in ConfigKey::ALL {
            assert!(output.contains(key.name()));
        }
        assert!(output.contains("catalog-file = (unset)"));
    }

    #[test]
    fn messages_one_per_line() {
        plain();
        let output = render_messages(&[CmdMessage::success("done"), CmdMessage::warning("careful")]);
        assert_eq!(output, "done\ncareful\n");
    }
}
