//! Back/forward bookkeeping for engines that don't expose their own list.

/// Navigation the view asked for and is waiting to see committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingNavigation {
    Back,
    Forward,
    Reload,
}

/// Session history reconstructed from committed page loads.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<String>,
    index: usize,
    pending: Option<PendingNavigation>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `navigation` to commit next. Returns false, and clears any
    /// older expectation, when there is no entry in that direction.
    pub fn request(&mut self, navigation: PendingNavigation) -> bool {
        let possible = match navigation {
            PendingNavigation::Back => self.can_go_back(),
            PendingNavigation::Forward => self.can_go_forward(),
            PendingNavigation::Reload => !self.is_empty(),
        };
        self.pending = possible.then_some(navigation);
        possible
    }

    /// Record that a load for `url` started.
    ///
    /// A pending step only moves the cursor when `url` is the entry it
    /// targets; any other load is a new entry.
    pub fn commit(&mut self, url: &str) {
        match self.pending.take() {
            Some(PendingNavigation::Back) if self.is_entry(self.index.checked_sub(1), url) => {
                self.index -= 1;
            }
            Some(PendingNavigation::Forward) if self.is_entry(Some(self.index + 1), url) => {
                self.index += 1;
            }
            Some(PendingNavigation::Reload) if self.current() == Some(url) => {}
            _ => self.push(url),
        }
    }

    fn is_entry(&self, index: Option<usize>, url: &str) -> bool {
        index
            .and_then(|i| self.entries.get(i))
            .is_some_and(|entry| entry == url)
    }

    fn push(&mut self, url: &str) {
        let current = self.current().map(str::to_string);
        match current.as_deref() {
            None => {
                self.entries.push(url.to_string());
                self.index = 0;
            }
            Some(current) if current == url => {}
            // The initial blank document is replaced, not kept as an entry.
            Some("about:blank") if self.entries.len() == 1 => {
                self.entries[0] = url.to_string();
            }
            Some(_) => {
                self.entries.truncate(self.index + 1);
                self.entries.push(url.to_string());
                self.index += 1;
            }
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
