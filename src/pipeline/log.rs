//! Append-only log of pipeline milestones.

use parking_lot::Mutex;

/// Callback receiving every log line as it is appended.
pub type LogObserver<'a> = dyn Fn(&str) + Sync + 'a;

/// Thread-safe, append-only sequence of human-readable log lines.
///
/// Lines are kept in append order and are never dropped. An optional
/// observer sees each line right after it is recorded, under the same lock,
/// so live output order matches the final sequence.
pub struct LogSequence<'a> {
    lines: Mutex<Vec<String>>,
    observer: Option<&'a LogObserver<'a>>,
}

impl<'a> LogSequence<'a> {
    pub fn new(observer: Option<&'a LogObserver<'a>>) -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            observer,
        }
    }

    /// Append one line.
    pub fn push(&self, line: impl Into<String>) {
        let line = line.into();
        let mut lines = self.lines.lock();
        if let Some(observer) = self.observer {
            observer(&line);
        }
        lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Copy of the lines recorded so far.
    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order() {
        let logs = LogSequence::new(None);
        logs.push("one");
        logs.push(String::from("two"));
        assert_eq!(logs.len(), 2);
        assert_eq!(logs.into_lines(), ["one", "two"]);
    }

    #[test]
    fn test_observer_sees_every_line() {
        let seen = Mutex::new(Vec::new());
        let observer = |line: &str| seen.lock().push(line.to_string());
        let logs = LogSequence::new(Some(&observer));
        logs.push("a");
        logs.push("b");
        assert_eq!(logs.snapshot(), *seen.lock());
    }

    #[test]
    fn test_concurrent_pushes_are_not_lost() {
        let logs = LogSequence::new(None);
        std::thread::scope(|s| {
            for t in 0..8 {
                let logs = &logs;
                s.spawn(move || {
                    for i in 0..100 {
                        logs.push(format!("{t}-{i}"));
                    }
                });
            }
        });
        assert_eq!(logs.len(), 800);
    }
}
