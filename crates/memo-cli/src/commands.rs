//! Subcommand handlers. Each one talks to the session only.

use anyhow::{anyhow, bail, Context, Result};
use memo_core::{display_title, find_theme, format_timestamp, segments, ContentSegment, Note};
use memo_store::{default_backup_file_name, ImportOptions, Session};
use std::path::PathBuf;

use crate::cli::{
    BackupCommand, NoteCommand, PasswordCommand, PathCommand, SettingsCommand, UserCommand,
};

/// Characters of the id shown in listings.
const SHORT_ID_LEN: usize = 8;

/// Fail early when notes of an encrypted profile cannot be read.
fn require_unlocked(session: &Session) -> Result<()> {
    if session.is_unlocked() {
        return Ok(());
    }
    match session.password_hint() {
        Some(hint) => bail!(
            "profile '{}' is encrypted; pass --password (hint: {})",
            session.username(),
            hint
        ),
        None => bail!(
            "profile '{}' is encrypted; pass --password",
            session.username()
        ),
    }
}

/// Theme key/name or a literal `#RRGGBB` color.
pub fn resolve_color(input: &str) -> Result<String> {
    if let Some(theme) = find_theme(input) {
        return Ok(theme.background.to_string());
    }
    let hex = input.trim();
    let valid = hex.len() == 7
        && hex.starts_with('#')
        && hex[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(hex.to_uppercase())
    } else {
        Err(anyhow!("unknown color '{}'", input))
    }
}

/// Index of the note whose id equals `id` or uniquely starts with it.
pub fn find_note(notes: &[Note], id: &str) -> Result<usize> {
    if let Some(i) = notes.iter().position(|n| n.id() == id) {
        return Ok(i);
    }
    let matches: Vec<usize> = notes
        .iter()
        .enumerate()
        .filter(|(_, n)| !id.is_empty() && n.id().starts_with(id))
        .map(|(i, _)| i)
        .collect();
    match matches.as_slice() {
        [i] => Ok(*i),
        [] => bail!("no note with id '{}'", id),
        _ => bail!("id prefix '{}' matches {} notes", id, matches.len()),
    }
}

fn short_id(note: &Note) -> &str {
    let id = note.id();
    id.char_indices()
        .nth(SHORT_ID_LEN)
        .map(|(i, _)| &id[..i])
        .unwrap_or(id)
}

/// Notes that are about to be modified; unlike the listing commands an
/// unreadable file is an error so it is never overwritten.
async fn load_for_update(session: &Session) -> Result<Vec<Note>> {
    session
        .try_load_notes()
        .await
        .with_context(|| format!("notes of '{}' could not be read", session.username()))
}

async fn save(session: &Session, notes: &[Note]) -> Result<()> {
    if session.save_notes(notes).await {
        Ok(())
    } else {
        bail!("notes could not be saved (see log output)")
    }
}

// ─── users ─────────────────────────────────────────────────────────────────

pub async fn users(session: &mut Session, cmd: UserCommand) -> Result<()> {
    match cmd {
        UserCommand::List => {
            let current = session.username().to_string();
            for name in session.list_users().await {
                let marker = if name == current { '*' } else { ' ' };
                println!("{} {}", marker, name);
            }
        }
        UserCommand::Add { name } => {
            if !session.add_user(&name).await {
                bail!("could not add user '{}'", name);
            }
            println!("Added user '{}'", name.trim());
        }
        UserCommand::Remove { name } => {
            if !session.remove_user(&name).await {
                bail!("user '{}' was not removed", name);
            }
            println!("Removed user '{}'", name);
        }
        UserCommand::Switch { name } => {
            if !session.switch_user(&name).await {
                bail!("no user named '{}'", name);
            }
            println!("Current user is now '{}'", session.username());
        }
    }
    Ok(())
}

// ─── notes ─────────────────────────────────────────────────────────────────

pub async fn notes(session: &Session, cmd: NoteCommand) -> Result<()> {
    require_unlocked(session)?;

    match cmd {
        NoteCommand::List => {
            let notes = session.load_notes().await;
            if notes.is_empty() {
                println!("No notes.");
            }
            for note in &notes {
                println!(
                    "{}  {}  {}",
                    short_id(note),
                    format_timestamp(note.modified_at()),
                    display_title(note)
                );
            }
        }
        NoteCommand::Add {
            content,
            title,
            color,
            font_size,
        } => {
            let mut notes = load_for_update(session).await?;
            let mut note = session.create_note(notes.len()).await.with_content(content);
            if let Some(title) = title {
                note.set_title(title);
            }
            if let Some(color) = color {
                note.set_color(resolve_color(&color)?);
            }
            if let Some(size) = font_size {
                note.set_font_size(size);
            }
            let id = note.id().to_string();
            notes.push(note);
            save(session, &notes).await?;
            println!("{}", id);
        }
        NoteCommand::Search { query } => {
            let hits = session.search(&query).await;
            if hits.is_empty() {
                println!("No matching notes.");
            }
            for hit in hits {
                println!("{}  {}", hit.id, hit.title);
                if !hit.preview.is_empty() {
                    println!("    {}", hit.preview);
                }
            }
        }
        NoteCommand::Show { id } => {
            let notes = session.load_notes().await;
            let note = &notes[find_note(&notes, &id)?];
            println!("{}", display_title(note));
            println!("id: {}", note.id());
            if note.explicit_title().is_empty() {
                println!("title: derived from content");
            } else {
                println!("title: {}", note.explicit_title());
            }
            println!(
                "color: {} (text {})  font: {}",
                note.color(),
                note.foreground_color(),
                note.font_size()
            );
            println!(
                "position: {}, {}  size: {} x {}",
                note.left(),
                note.top(),
                note.width(),
                note.height()
            );
            for (label, value) in note.info_lines() {
                println!("{}: {}", label.to_lowercase(), value);
            }
            println!();
            for segment in segments(note.content(), note.images()) {
                match segment {
                    ContentSegment::Text(text) => print!("{}", text),
                    ContentSegment::Image { index, data } => {
                        print!("<image {} ({} bytes base64)>", index, data.len())
                    }
                }
            }
            println!();
        }
        NoteCommand::Edit {
            id,
            content,
            title,
            color,
            font_size,
        } => {
            let mut notes = load_for_update(session).await?;
            let index = find_note(&notes, &id)?;
            let note = &mut notes[index];
            if let Some(content) = content {
                note.set_content(content);
            }
            if let Some(title) = title {
                note.set_title(title);
            }
            if let Some(color) = color {
                note.set_color(resolve_color(&color)?);
            }
            if let Some(size) = font_size {
                note.set_font_size(size);
            }
            save(session, &notes).await?;
            println!("Updated {}", short_id(&notes[index]));
        }
        NoteCommand::Delete { id } => {
            let mut notes = load_for_update(session).await?;
            let index = find_note(&notes, &id)?;
            let removed = notes.remove(index);
            save(session, &notes).await?;
            println!("Deleted {}", short_id(&removed));
        }
    }
    Ok(())
}

// ─── password ──────────────────────────────────────────────────────────────

pub async fn password(session: &mut Session, cmd: PasswordCommand) -> Result<()> {
    match cmd {
        PasswordCommand::Status => {
            if session.is_encryption_enabled() {
                println!("Encryption: enabled");
                if let Some(hint) = session.password_hint() {
                    println!("Hint: {}", hint);
                }
            } else {
                println!("Encryption: disabled");
            }
        }
        PasswordCommand::Set { new_password, hint } => {
            require_unlocked(session)?;
            memo_crypto::validate_password(&new_password)?;
            if !session.setup_password(&new_password, hint.as_deref()).await {
                bail!("password could not be set");
            }
            println!("Encryption enabled for '{}'", session.username());
        }
        PasswordCommand::Remove => {
            if !session.is_encryption_enabled() {
                println!("Encryption is already disabled");
                return Ok(());
            }
            require_unlocked(session)?;
            if !session.disable_encryption().await {
                bail!("encryption could not be disabled");
            }
            println!("Encryption disabled for '{}'", session.username());
        }
    }
    Ok(())
}

// ─── path ──────────────────────────────────────────────────────────────────

pub async fn path(session: &Session, cmd: PathCommand) -> Result<()> {
    match cmd {
        PathCommand::Show => {
            let path = session.current_data_path().await;
            let origin = if session.uses_custom_path().await {
                "custom"
            } else {
                "default"
            };
            println!("{} ({})", path.display(), origin);
        }
        PathCommand::Set { dir } => {
            let dir = if dir.is_absolute() {
                dir
            } else {
                std::env::current_dir()
                    .context("current directory is unavailable")?
                    .join(dir)
            };
            if !session.set_data_path(Some(&dir)).await {
                bail!("data path could not be recorded");
            }
            println!("Notes for '{}' now stored in {}", session.username(), dir.display());
        }
        PathCommand::Reset => {
            if !session.set_data_path(None).await {
                bail!("data path could not be reset");
            }
            println!("Notes for '{}' stored in the default location", session.username());
        }
    }
    Ok(())
}

// ─── settings ──────────────────────────────────────────────────────────────

pub async fn settings(session: &Session, cmd: SettingsCommand) -> Result<()> {
    match cmd {
        SettingsCommand::Show => {
            let s = session.settings().await;
            println!("background-color: {}", s.background_color);
            println!("note-color: {}", s.default_note_color);
            println!("note-text-color: {}", s.default_note_text_color);
            println!("language: {}", s.language);
        }
        SettingsCommand::Set { key, value } => {
            let mut s = session.settings().await;
            match key.as_str() {
                "background-color" => s.background_color = resolve_color(&value)?,
                "note-color" => s.default_note_color = resolve_color(&value)?,
                "note-text-color" => s.default_note_text_color = resolve_color(&value)?,
                "language" => {
                    let lang = value.trim().to_lowercase();
                    if !memo_core::defaults::SUPPORTED_LANGUAGES.contains(&lang.as_str()) {
                        bail!("unsupported language '{}'", value);
                    }
                    s.language = lang;
                }
                other => bail!("unknown setting '{}'", other),
            }
            if !session.save_settings(&s).await {
                bail!("settings could not be saved");
            }
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}

// ─── backup ────────────────────────────────────────────────────────────────

pub async fn backup(session: &mut Session, cmd: BackupCommand) -> Result<()> {
    match cmd {
        BackupCommand::Export { path } => {
            let path = path.unwrap_or_else(|| {
                PathBuf::from(default_backup_file_name(&chrono::Local::now()))
            });
            session.export_backup(&path).await?;
            println!("Exported '{}' to {}", session.username(), path.display());
        }
        BackupCommand::Import {
            path,
            target_name,
            switch,
        } => {
            let options = ImportOptions {
                target_name,
                switch_to: switch,
            };
            let name = session.import_backup(&path, &options).await?;
            println!("Imported profile '{}'", name);
            if switch {
                println!("Current user is now '{}'", name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_core::Provenance;

    #[test]
    fn test_resolve_color() {
        assert_eq!(resolve_color("pink").unwrap(), "#FFB3D9");
        assert_eq!(resolve_color("Navy Blue").unwrap(), "#2C3E50");
        assert_eq!(resolve_color("#abcdef").unwrap(), "#ABCDEF");
        assert!(resolve_color("#abc").is_err());
        assert!(resolve_color("fuchsia").is_err());
    }

    #[test]
    fn test_find_note_by_prefix() {
        let notes = vec![
            Note::new(Provenance::default()),
            Note::new(Provenance::default()),
        ];
        let full = notes[1].id().to_string();
        assert_eq!(find_note(&notes, &full).unwrap(), 1);
        assert_eq!(find_note(&notes, &full[..12]).unwrap(), 1);
        assert!(find_note(&notes, "zzzz").is_err());
        assert!(find_note(&notes, "").is_err());
    }

    #[test]
    fn test_short_id() {
        let note = Note::new(Provenance::default());
        assert_eq!(short_id(&note).len(), 8);
        assert!(note.id().starts_with(short_id(&note)));
    }
}
