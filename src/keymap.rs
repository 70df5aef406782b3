use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A named, matchable key chord with its help labels.
pub struct KeyBinding {
    chords: &'static [(KeyCode, KeyModifiers)],
    pub help_key: &'static str,
    pub help_desc: &'static str,
}

impl KeyBinding {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.chords.iter().any(|(code, mods)| key.code == *code && key.modifiers == *mods)
    }
}

pub struct Keymap {
    pub commit: KeyBinding,
    pub regen: KeyBinding,
    pub quit: KeyBinding,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            commit: KeyBinding {
                chords: &[(KeyCode::Enter, KeyModifiers::NONE)],
                help_key: "enter",
                help_desc: "commit",
            },
            regen: KeyBinding {
                chords: &[(KeyCode::Char('r'), KeyModifiers::CONTROL)],
                help_key: "ctrl+r",
                help_desc: "regenerate",
            },
            quit: KeyBinding {
                chords: &[(KeyCode::Char('q'), KeyModifiers::NONE), (KeyCode::Char('c'), KeyModifiers::CONTROL)],
                help_key: "q",
                help_desc: "quit",
            },
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
