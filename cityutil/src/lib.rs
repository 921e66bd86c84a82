//! Small utilities shared by every crate in the workspace: OSM-style tag maps, counters, a
//! hierarchical `Timer` that logs how long each phase of a run took, and logger setup.

#[macro_use]
extern crate log;

mod collections;
pub mod logger;
mod tags;
mod time;

pub use crate::collections::{Counter, MultiMap};
pub use crate::tags::Tags;
pub use crate::time::{elapsed_seconds, prettyprint_time, Timer};

pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}
