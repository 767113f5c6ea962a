/// Global keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    ToggleDebug,
    TogglePanel,
}

#[inline]
pub fn shortcut_for_key(key: &str) -> Option<Shortcut> {
    match key {
        "d" | "D" => Some(Shortcut::ToggleDebug),
        "h" | "H" => Some(Shortcut::TogglePanel),
        _ => None,
    }
}
