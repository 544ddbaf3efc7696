use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

use log::info;

/// Keeps track of the time spent in named phases of a computation.
#[derive(Default)]
pub struct Timing {
    results: Rc<RefCell<Vec<(String, Duration)>>>,
}

/// A phase that is being timed, the duration is only recorded by [Timer::finish].
pub struct Timer {
    name: String,
    start: Instant,
    results: Rc<RefCell<Vec<(String, Duration)>>>,
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts timing the phase with the given name.
    pub fn start(&mut self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            results: self.results.clone(),
        }
    }

    /// Returns the recorded phases in the order in which they finished.
    pub fn results(&self) -> Vec<(String, Duration)> {
        self.results.borrow().clone()
    }

    /// Prints the recorded phases to stderr.
    pub fn print(&self) {
        for (name, time) in self.results.borrow().iter() {
            eprintln!("Time {}: {:.3}s", name, time.as_secs_f64());
        }
    }
}

impl Timer {
    /// Records the time elapsed since the phase was started.
    pub fn finish(&mut self) {
        let time = self.start.elapsed();
        info!("Time {}: {:.3}s", self.name, time.as_secs_f64());

        self.results.borrow_mut().push((self.name.clone(), time));
    }
}
