//! The host tool's `settings.json` and the update hook registered in it.
//!
//! Only `hooks.PreToolUse` entries whose command carries the marker are
//! ever touched. Everything else is re-serialized as read, in the same key
//! order.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::Result;

const HOOKS_KEY: &str = "hooks";
const PRE_TOOL_USE_KEY: &str = "PreToolUse";

/// The hook entry to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
    /// Substring identifying entries owned by docs-mirror.
    pub marker: String,
    /// Host tool event matcher (e.g. `Read`).
    pub matcher: String,
    /// Shell command the host runs.
    pub command: String,
}

/// Whether a `PreToolUse` entry runs a command carrying `marker`.
///
/// Recognizes both `{matcher, hooks: [{command}]}` entries and older flat
/// `{command}` entries.
pub fn references_marker(entry: &Value, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }

    let carries = |v: &Value| {
        v.get("command")
            .and_then(Value::as_str)
            .is_some_and(|c| c.contains(marker))
    };

    if carries(entry) {
        return true;
    }

    entry
        .get(HOOKS_KEY)
        .and_then(Value::as_array)
        .is_some_and(|hooks| hooks.iter().any(carries))
}

/// Every hook command string under `hooks.PreToolUse`.
pub fn hook_commands(settings: &Value) -> Vec<String> {
    let Some(entries) = pre_tool_use(settings) else {
        return Vec::new();
    };

    let mut commands = Vec::new();
    for entry in entries {
        if let Some(cmd) = entry.get("command").and_then(Value::as_str) {
            commands.push(cmd.to_string());
        }
        for hook in entry
            .get(HOOKS_KEY)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            if let Some(cmd) = hook.get("command").and_then(Value::as_str) {
                commands.push(cmd.to_string());
            }
        }
    }
    commands
}

fn pre_tool_use(settings: &Value) -> Option<&Vec<Value>> {
    settings
        .get(HOOKS_KEY)?
        .get(PRE_TOOL_USE_KEY)?
        .as_array()
}

/// Drop entries carrying `marker`, returning how many were dropped.
fn strip_entries(settings: &mut Value, marker: &str) -> usize {
    let Some(entries) = settings
        .get_mut(HOOKS_KEY)
        .and_then(|h| h.get_mut(PRE_TOOL_USE_KEY))
        .and_then(Value::as_array_mut)
    else {
        return 0;
    };

    let before = entries.len();
    entries.retain(|entry| !references_marker(entry, marker));
    before - entries.len()
}

/// Register `hook`, replacing any entries that carry its marker.
///
/// A document whose root (or `hooks`, or `hooks.PreToolUse`) has the wrong
/// shape is replaced by an empty one of the right shape.
pub fn upsert_hook(settings: Value, hook: &HookSpec) -> Value {
    let mut settings = match settings {
        Value::Object(_) => settings,
        _ => Value::Object(Map::new()),
    };

    strip_entries(&mut settings, &hook.marker);

    let entry = json!({
        "matcher": hook.matcher,
        "hooks": [{
            "type": "command",
            "command": hook.command,
        }],
    });

    if let Value::Object(root) = &mut settings {
        let hooks = root
            .entry(HOOKS_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !hooks.is_object() {
            *hooks = Value::Object(Map::new());
        }
        if let Value::Object(hooks) = hooks {
            let list = hooks
                .entry(PRE_TOOL_USE_KEY)
                .or_insert_with(|| Value::Array(Vec::new()));
            if !list.is_array() {
                *list = Value::Array(Vec::new());
            }
            if let Value::Array(list) = list {
                list.push(entry);
            }
        }
    }

    settings
}

/// Remove every entry carrying `marker`, then drop a `PreToolUse` list or
/// `hooks` object left empty. Returns the new document and the removal count.
pub fn remove_hooks(mut settings: Value, marker: &str) -> (Value, usize) {
    let removed = strip_entries(&mut settings, marker);

    if let Some(hooks) = settings.get_mut(HOOKS_KEY).and_then(Value::as_object_mut) {
        let list_empty = hooks
            .get(PRE_TOOL_USE_KEY)
            .and_then(Value::as_array)
            .is_some_and(Vec::is_empty);
        if list_empty {
            hooks.remove(PRE_TOOL_USE_KEY);
        }
    }

    if let Some(root) = settings.as_object_mut() {
        let hooks_empty = root
            .get(HOOKS_KEY)
            .and_then(Value::as_object)
            .is_some_and(Map::is_empty);
        if hooks_empty {
            root.remove(HOOKS_KEY);
        }
    }

    (settings, removed)
}

/// Contents of the settings file as found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsDocument {
    Missing,
    Parsed(Value),
    /// Present but not valid JSON; holds the parse error.
    Malformed(String),
}

/// What registering the hook changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookRegistration {
    /// The settings file did not exist before.
    pub created: bool,
    /// The previous file was not valid JSON and was replaced.
    pub replaced_malformed: bool,
    /// Backup taken before writing, if there was a file to back up.
    pub backup: Option<PathBuf>,
}

/// What removing hooks did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookRemoval {
    /// No settings file.
    Missing,
    /// Not valid JSON; left untouched.
    Malformed(String),
    Removed { count: usize, backup: PathBuf },
}

/// The host settings file plus its backup location.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    backup: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>, backup: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup: backup.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<SettingsDocument> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SettingsDocument::Missing)
            }
            Err(e) => return Err(e.into()),
        };

        Ok(match serde_json::from_str(&content) {
            Ok(value) => SettingsDocument::Parsed(value),
            Err(e) => SettingsDocument::Malformed(e.to_string()),
        })
    }

    /// Register `hook`, backing up any existing file first.
    pub fn register(&self, hook: &HookSpec) -> Result<HookRegistration> {
        let (current, created, replaced_malformed) = match self.read()? {
            SettingsDocument::Missing => (Value::Object(Map::new()), true, false),
            SettingsDocument::Parsed(value) => (value, false, false),
            SettingsDocument::Malformed(e) => {
                tracing::warn!("replacing malformed {}: {}", self.path.display(), e);
                (Value::Object(Map::new()), false, true)
            }
        };

        let backup = if created { None } else { Some(self.backup()?) };
        self.write(&upsert_hook(current, hook))?;

        Ok(HookRegistration {
            created,
            replaced_malformed,
            backup,
        })
    }

    /// Remove every hook carrying `marker`, backing up the file first.
    pub fn unregister(&self, marker: &str) -> Result<HookRemoval> {
        let current = match self.read()? {
            SettingsDocument::Missing => return Ok(HookRemoval::Missing),
            SettingsDocument::Malformed(e) => return Ok(HookRemoval::Malformed(e)),
            SettingsDocument::Parsed(value) => value,
        };

        let backup = self.backup()?;
        let (updated, count) = remove_hooks(current, marker);
        self.write(&updated)?;

        Ok(HookRemoval::Removed { count, backup })
    }

    fn backup(&self) -> Result<PathBuf> {
        std::fs::copy(&self.path, &self.backup)?;
        tracing::debug!("backed up settings to {}", self.backup.display());
        Ok(self.backup.clone())
    }

    fn write(&self, settings: &Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(settings).map_err(anyhow::Error::from)?;
        content.push('\n');
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
