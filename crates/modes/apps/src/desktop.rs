//! Minimal desktop-entry file parsing: just the keys a launcher menu needs.

/// The relevant subset of one `.desktop` file.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DesktopEntry {
    pub(crate) name: String,
    pub(crate) generic: Option<String>,
    pub(crate) exec: String,
}

/// Parse the `[Desktop Entry]` group of a desktop file.
///
/// Returns `None` for files that should not appear in a launcher: missing
/// `Name` or `Exec`, a non-application `Type`, or the `NoDisplay`/`Hidden`
/// flags.
pub(crate) fn parse(contents: &str) -> Option<DesktopEntry> {
    let mut in_entry_group = false;
    let mut name = None;
    let mut generic = None;
    let mut exec = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(group) = line.strip_prefix('[') {
            in_entry_group = group.strip_suffix(']') == Some("Desktop Entry");
            continue;
        }
        if !in_entry_group {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match (key.trim(), value.trim()) {
            ("Name", value) => name = Some(value.to_string()),
            ("GenericName", value) => generic = Some(value.to_string()),
            ("Exec", value) => exec = Some(clean_exec(value)),
            ("Type", value) if value != "Application" => return None,
            ("NoDisplay", "true") | ("Hidden", "true") => return None,
            _ => {}
        }
    }

    Some(DesktopEntry {
        name: name?,
        generic,
        exec: exec?,
    })
}

/// Strip the `%f`-style field codes a desktop `Exec` line may carry.
fn clean_exec(exec: &str) -> String {
    exec.split_whitespace()
        .filter(|token| !(token.len() == 2 && token.starts_with('%')))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_typical_entry() {
        let entry = parse(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=Firefox\n\
             GenericName=Web Browser\n\
             Exec=firefox %u\n",
        )
        .expect("entry");
        assert_eq!(entry.name, "Firefox");
        assert_eq!(entry.generic.as_deref(), Some("Web Browser"));
        assert_eq!(entry.exec, "firefox");
    }

    #[test]
    fn rejects_hidden_and_nodisplay_entries() {
        assert!(parse("[Desktop Entry]\nName=X\nExec=x\nNoDisplay=true\n").is_none());
        assert!(parse("[Desktop Entry]\nName=X\nExec=x\nHidden=true\n").is_none());
    }

    #[test]
    fn rejects_non_application_types() {
        assert!(parse("[Desktop Entry]\nType=Link\nName=X\nExec=x\n").is_none());
    }

    #[test]
    fn rejects_entries_without_name_or_exec() {
        assert!(parse("[Desktop Entry]\nName=X\n").is_none());
        assert!(parse("[Desktop Entry]\nExec=x\n").is_none());
    }

    #[test]
    fn only_reads_the_desktop_entry_group() {
        let entry = parse(
            "[Desktop Entry]\n\
             Name=App\n\
             Exec=app\n\
             [Desktop Action new-window]\n\
             Name=New Window\n\
             Exec=app --new-window\n",
        )
        .expect("entry");
        assert_eq!(entry.name, "App");
        assert_eq!(entry.exec, "app");
    }

    #[test]
    fn exec_field_codes_are_stripped() {
        assert_eq!(clean_exec("vlc --started-from-file %U"), "vlc --started-from-file");
        assert_eq!(clean_exec("gimp-2.10 %F"), "gimp-2.10");
    }
}
