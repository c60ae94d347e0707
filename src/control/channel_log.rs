use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 1000;

/// Scroll-back of data-channel traffic: `- open`, `> sent`, `< received`,
/// ` RTT n ms`, `- close`. Oldest lines fall off once full.
#[derive(Debug, Clone)]
pub struct ChannelLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Default for ChannelLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ChannelLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines, each terminated by `\n`.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.iter().fold(String::new(), |mut acc, l| {
            acc.push_str(l);
            acc.push('\n');
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_newest_lines() {
        let mut log = ChannelLog::with_capacity(2);
        log.push("- open");
        log.push("> ping 0");
        log.push("< pong 0");
        assert_eq!(log.len(), 2);
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["> ping 0", "< pong 0"]);
        assert_eq!(log.render(), "> ping 0\n< pong 0\n");
    }
}
