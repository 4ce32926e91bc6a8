//! Autocomplete dropdown: the suggestion list plus a highlighted cursor.
//!
//! `Visible` always holds at least one suggestion and `selected`, when set,
//! indexes into it. Every transition replaces the state as a whole.

use crate::suggest::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Nothing the dropdown cares about; the event keeps its default meaning.
    Ignored,
    Updated,
    /// A suggestion was picked and the dropdown closed.
    Commit(Suggestion),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dropdown {
    #[default]
    Hidden,
    Visible {
        suggestions: Vec<Suggestion>,
        selected: Option<usize>,
    },
}

impl Dropdown {
    /// Replace the list. An empty list hides the dropdown; nothing starts highlighted.
    pub fn render(&mut self, suggestions: Vec<Suggestion>) {
        *self = if suggestions.is_empty() {
            Dropdown::Hidden
        } else {
            Dropdown::Visible { suggestions, selected: None }
        };
    }

    pub fn hide(&mut self) {
        *self = Dropdown::Hidden;
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Dropdown::Visible { .. })
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Dropdown::Visible { suggestions, .. } => suggestions,
            Dropdown::Hidden => &[],
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            Dropdown::Visible { selected, .. } => *selected,
            Dropdown::Hidden => None,
        }
    }

    pub fn key(&mut self, key: Key) -> Reaction {
        let Dropdown::Visible { suggestions, selected } = self else {
            return Reaction::Ignored;
        };
        let Some(last) = suggestions.len().checked_sub(1) else {
            return Reaction::Ignored;
        };
        match key {
            Key::ArrowDown => {
                *selected = Some(selected.map_or(0, |i| (i + 1).min(last)));
                Reaction::Updated
            }
            Key::ArrowUp => {
                *selected = Some(selected.map_or(0, |i| i.saturating_sub(1)));
                Reaction::Updated
            }
            Key::Enter => {
                let Some(picked) = selected.map(|i| suggestions[i].clone()) else {
                    return Reaction::Ignored;
                };
                self.hide();
                Reaction::Commit(picked)
            }
            Key::Escape => {
                self.hide();
                Reaction::Updated
            }
            Key::Other => Reaction::Ignored,
        }
    }

    /// Mouse click on a rendered item: highlight it, then behave like Enter.
    pub fn click(&mut self, index: usize) -> Reaction {
        match self {
            Dropdown::Visible { suggestions, selected } if index < suggestions.len() => {
                *selected = Some(index);
                self.key(Key::Enter)
            }
            _ => Reaction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_trilogy() -> Vec<Suggestion> {
        vec![
            Suggestion::new("The Matrix", "1999"),
            Suggestion::new("The Matrix Reloaded", "2003"),
            Suggestion::new("The Matrix Revolutions", "2003"),
        ]
    }

    #[test]
    fn test_render() {
        let mut dropdown = Dropdown::default();
        dropdown.render(matrix_trilogy());
        assert!(dropdown.is_visible());
        assert_eq!(dropdown.selected(), None);

        dropdown.key(Key::ArrowDown);
        dropdown.render(matrix_trilogy());
        assert_eq!(dropdown.selected(), None, "render resets the cursor");

        dropdown.render(vec![]);
        assert_eq!(dropdown, Dropdown::Hidden);
    }

    #[test]
    fn test_arrow_navigation_clamps() {
        let mut dropdown = Dropdown::default();
        dropdown.render(matrix_trilogy());

        let mut walked = Vec::new();
        for _ in 0..5 {
            assert_eq!(dropdown.key(Key::ArrowDown), Reaction::Updated);
            walked.push(dropdown.selected().unwrap());
        }
        assert_eq!(walked, vec![0, 1, 2, 2, 2]);

        for _ in 0..4 {
            dropdown.key(Key::ArrowUp);
        }
        assert_eq!(dropdown.selected(), Some(0));
        assert!(dropdown.is_visible());
    }

    #[test]
    fn test_arrow_up_from_nothing_selects_first() {
        let mut dropdown = Dropdown::default();
        dropdown.render(matrix_trilogy());
        dropdown.key(Key::ArrowUp);
        assert_eq!(dropdown.selected(), Some(0));
    }

    #[test]
    fn test_enter() {
        let mut dropdown = Dropdown::default();
        dropdown.render(matrix_trilogy());
        assert_eq!(dropdown.key(Key::Enter), Reaction::Ignored);
        assert!(dropdown.is_visible());

        dropdown.key(Key::ArrowDown);
        dropdown.key(Key::ArrowDown);
        assert_eq!(dropdown.key(Key::Enter), Reaction::Commit(Suggestion::new("The Matrix Reloaded", "2003")));
        assert_eq!(dropdown, Dropdown::Hidden);
    }

    #[test]
    fn test_escape_and_hidden_keys() {
        let mut dropdown = Dropdown::default();
        for key in [Key::ArrowDown, Key::ArrowUp, Key::Enter, Key::Escape] {
            assert_eq!(dropdown.key(key), Reaction::Ignored);
        }

        dropdown.render(matrix_trilogy());
        dropdown.key(Key::ArrowDown);
        assert_eq!(dropdown.key(Key::Escape), Reaction::Updated);
        assert_eq!(dropdown, Dropdown::Hidden);
    }

    #[test]
    fn test_click() {
        let mut dropdown = Dropdown::default();
        dropdown.render(matrix_trilogy());
        assert_eq!(dropdown.click(7), Reaction::Ignored);
        assert_eq!(dropdown.click(2), Reaction::Commit(Suggestion::new("The Matrix Revolutions", "2003")));
        assert!(!dropdown.is_visible());
    }
}
