//! Heading hierarchy built from the flat sequence of headings in a document.

use std::cmp::Ordering;

/// A heading and the headings nested under it.
///
/// Placeholders (empty `name`) stand in for skipped levels, e.g. the level-2
/// parent of a level-3 heading that directly follows a level-1 heading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub id: String,
    pub name: String,
    pub children: Vec<Heading>,
}

impl Heading {
    fn placeholder(level: u8) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }
}

/// Incremental builder for the heading tree.
///
/// Keeps one open sibling list per level from the top level down to the
/// level of the last added heading.
#[derive(Debug, Default)]
pub struct HeadingTracker {
    open: Vec<Vec<Heading>>,
}

impl HeadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, level: u8, id: impl Into<String>, name: impl Into<String>) {
        let level = level.max(1);
        let heading = Heading {
            level,
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        };

        let Some(current) = self.current_level() else {
            self.push_placeholders(1, level);
            self.open.push(vec![heading]);
            return;
        };

        match level.cmp(&current) {
            Ordering::Equal => self.push_sibling(heading),
            Ordering::Greater => {
                self.push_placeholders(current + 1, level);
                self.open.push(vec![heading]);
            }
            Ordering::Less => {
                while self.current_level().is_some_and(|top| top > level) && self.collapse_top() {}
                self.push_sibling(heading);
            }
        }
    }

    /// Close all open lists and return the top-level headings.
    ///
    /// Leading levels that hold nothing but a single placeholder are dropped,
    /// so a document starting at level 2 yields level-2 roots.
    pub fn finish(mut self) -> Vec<Heading> {
        let removable = self.open.len().saturating_sub(1);
        let leading = self
            .open
            .iter()
            .take(removable)
            .take_while(|list| matches!(list.as_slice(), [only] if only.is_placeholder()))
            .count();
        self.open.drain(..leading);

        while self.collapse_top() {}
        self.open.pop().unwrap_or_default()
    }

    fn current_level(&self) -> Option<u8> {
        self.open
            .last()
            .and_then(|list| list.last())
            .map(|heading| heading.level)
    }

    fn push_placeholders(&mut self, from: u8, to: u8) {
        for level in from..to {
            self.open.push(vec![Heading::placeholder(level)]);
        }
    }

    fn push_sibling(&mut self, heading: Heading) {
        match self.open.last_mut() {
            Some(list) => list.push(heading),
            None => self.open.push(vec![heading]),
        }
    }

    /// Pop the deepest list and attach it to the last heading one level up.
    fn collapse_top(&mut self) -> bool {
        if self.open.len() < 2 {
            return false;
        }
        let Some(children) = self.open.pop() else {
            return false;
        };
        if let Some(parent) = self.open.last_mut().and_then(|list| list.last_mut()) {
            parent.children = children;
        }
        true
    }
}
