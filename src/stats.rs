use std::{
    fmt::Display,
    io::{stdout, Write},
};

use derive_more::AddAssign;
use serde::Serialize;

#[derive(Default, Clone, Copy, AddAssign, Debug, Serialize)]
pub struct Timing {
    /// build + trace
    pub total: f64,
    /// filling the matrix
    pub build: f64,
    /// walking back from the terminal cell
    pub trace: f64,
}

/// Statistics of one alignment, or of many when summed with `+=`.
#[derive(Default, Clone, Copy, AddAssign, Debug, Serialize)]
pub struct AlignStats {
    /// Length of `a` after clamping.
    pub len_a: usize,
    /// Length of `b` after clamping.
    pub len_b: usize,
    /// Number of matrix cells computed.
    pub cells: usize,
    /// Number of alignments that were impossible within the band.
    pub impossible: usize,
    pub timing: Timing,
    pub sample_size: usize,
}

impl AlignStats {
    /// Stats of a single pair; lengths are counted in symbols.
    pub fn init<C>(a: &[C], b: &[C]) -> Self {
        Self {
            len_a: a.len(),
            len_b: b.len(),
            sample_size: 1,
            ..Default::default()
        }
    }

    fn format<T: Display>(&self, width: usize, title: &str, val: T) -> (String, String) {
        (format!("{:>width$}", title), format!("{:>width$}", val))
    }

    fn format_avg(&self, width: usize, title: &str, val: f64) -> (String, String) {
        let avg = val / self.sample_size.max(1) as f64;
        (format!("{:>width$}", title), format!("{:>width$.2}", avg))
    }

    /// Column headers and values, averaged over the samples.
    pub fn values(&self) -> (Vec<String>, Vec<String>) {
        [
            self.format(7, "nr", self.sample_size),
            self.format_avg(10, "|a|", self.len_a as f64),
            self.format_avg(10, "|b|", self.len_b as f64),
            self.format_avg(12, "cells", self.cells as f64),
            self.format(6, "inf", self.impossible),
            self.format_avg(8, "t", 1000. * self.timing.total),
            self.format_avg(8, "build", 1000. * self.timing.build),
            self.format_avg(8, "trace", 1000. * self.timing.trace),
        ]
        .into_iter()
        .unzip()
    }

    pub fn print_header(&self) {
        println!("{}", self.values().0.join(" "));
    }

    pub fn print(&self) {
        println!("{}", self.values().1.join(" "));
    }

    /// Overwrite the current terminal line with these stats.
    pub fn print_no_newline(&self) {
        print!("\r{}", self.values().1.join(" "));
        let _ = stdout().flush();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accumulate_and_average() {
        let mut total = AlignStats::default();
        let mut s = AlignStats::init(b"ACGT", b"ACG");
        s.cells = 20;
        total += s;
        let mut s = AlignStats::init(b"AC", b"A");
        s.cells = 6;
        s.impossible = 1;
        total += s;

        assert_eq!(total.sample_size, 2);
        assert_eq!(total.cells, 26);
        assert_eq!(total.impossible, 1);
        let (header, values) = total.values();
        assert_eq!(header.len(), values.len());
        assert_eq!(values[1].trim(), "3.00");
        assert_eq!(values[3].trim(), "13.00");
    }
}
