use crate::TodoItem;

/// Which subset of the list is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Done,
    Undone,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Done, Filter::Undone];

    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Done => item.completed,
            Filter::Undone => !item.completed,
        }
    }

    /// Ordered subsequence of `items` matching the filter.
    pub fn apply<'a>(&self, items: &'a [TodoItem]) -> Vec<&'a TodoItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Done => "Done",
            Filter::Undone => "Undone",
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn items() -> Vec<TodoItem> {
        [("a", true), ("b", false), ("c", true), ("d", false)]
            .into_iter()
            .map(|(text, completed)| TodoItem {
                id: Uuid::new_v4(),
                text: text.to_string(),
                completed,
            })
            .collect()
    }

    fn texts(items: Vec<&TodoItem>) -> Vec<&str> {
        items.into_iter().map(|item| item.text.as_str()).collect()
    }

    #[test]
    fn all_is_identity() {
        let items = items();
        let shown: Vec<TodoItem> = Filter::All.apply(&items).into_iter().cloned().collect();
        assert_eq!(shown, items);
    }

    #[test]
    fn done_keeps_completed_in_order() {
        let items = items();
        let shown = Filter::Done.apply(&items);
        assert!(shown.iter().all(|item| item.completed));
        assert!(shown.iter().all(|item| items.contains(item)));
        assert_eq!(texts(shown), ["a", "c"]);
    }

    #[test]
    fn undone_keeps_pending_in_order() {
        let items = items();
        assert_eq!(texts(Filter::Undone.apply(&items)), ["b", "d"]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(Filter::Done.apply(&[]).is_empty());
    }
}
