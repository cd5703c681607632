use core::fmt;
use serde::{Deserialize, Serialize};

/// A whole number of elapsed seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElapsedTime(u32);

impl ElapsedTime {
    pub const ZERO: Self = Self(0);

    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn total_secs(self) -> u32 {
        self.0
    }

    pub const fn minutes(self) -> u32 {
        self.0 / 60
    }

    pub const fn seconds(self) -> u32 {
        self.0 % 60
    }

    /// Human phrasing used in the end-of-round prompt, e.g. `2 minutes and 5 seconds`.
    pub fn sentence(self) -> Sentence {
        Sentence(self)
    }
}

/// `mm:ss`, minutes grow past two digits when needed.
impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sentence(ElapsedTime);

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const fn plural(n: u32) -> &'static str {
            if n == 1 { "" } else { "s" }
        }

        let (min, sec) = (self.0.minutes(), self.0.seconds());
        if min > 0 {
            write!(
                f,
                "{} minute{} and {} second{}",
                min,
                plural(min),
                sec,
                plural(sec)
            )
        } else {
            write!(f, "{} second{}", sec, plural(sec))
        }
    }
}

/// Tick-driven stopwatch. Something external calls [`Stopwatch::tick`] once per second.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed: ElapsedTime,
    running: bool,
}

impl Stopwatch {
    pub const fn new() -> Self {
        Self {
            elapsed: ElapsedTime::ZERO,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances by one second while running; returns whether the count changed.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed = ElapsedTime(self.elapsed.0.saturating_add(1));
        }
        self.running
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    pub const fn total_secs(&self) -> u32 {
        self.elapsed.total_secs()
    }

    pub const fn minutes(&self) -> u32 {
        self.elapsed.minutes()
    }

    pub const fn seconds(&self) -> u32 {
        self.elapsed.seconds()
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.elapsed, f)
    }
}
