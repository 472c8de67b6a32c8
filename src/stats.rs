use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

const REPORT_INTERVAL: Duration = Duration::from_millis(500);

pub trait Recorder {
    fn record(&mut self, generation: usize, alive: usize);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> String;
}

/// Generation rate and population, reported twice a second
pub struct RateRecord {
    generation: usize,
    alive: usize,
    steps_since_report: usize,
    last_report: Instant,
}
impl RateRecord {
    pub fn new(alive: usize) -> Self {
        Self {
            generation: 0,
            alive,
            steps_since_report: 0,
            last_report: Instant::now(),
        }
    }
}
impl Recorder for RateRecord {
    fn record(&mut self, generation: usize, alive: usize) {
        self.generation = generation;
        self.alive = alive;
        self.steps_since_report += 1;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed() >= REPORT_INTERVAL
    }
    fn report(&mut self) -> String {
        let rate = self.steps_since_report as f64 / self.last_report.elapsed().as_secs_f64();
        self.last_report = Instant::now();
        self.steps_since_report = 0;

        format!(
            "{:.02}gen/s gen:{} alive:{}",
            rate, self.generation, self.alive
        )
    }
}

struct Sample {
    generation: usize,
    delta_us: u128,
    alive: usize,
}

/// Keeps every generation's timing and population for a CSV dump
pub struct CsvRecord {
    inner: RateRecord,
    samples: Vec<Sample>,
    last: Instant,
}
impl CsvRecord {
    pub fn new(alive: usize) -> Self {
        Self {
            inner: RateRecord::new(alive),
            samples: Vec::new(),
            last: Instant::now(),
        }
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "gen,delta_us,alive")?;
        for s in &self.samples {
            writeln!(out, "{},{},{}", s.generation, s.delta_us, s.alive)?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }
}
impl Recorder for CsvRecord {
    fn record(&mut self, generation: usize, alive: usize) {
        let now = Instant::now();
        self.samples.push(Sample {
            generation,
            delta_us: now.duration_since(self.last).as_micros(),
            alive,
        });
        self.last = now;
        self.inner.record(generation, alive);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> String {
        self.inner.report()
    }
}

/// Picks the CSV recorder only when its output will be saved
pub enum Recording {
    Rate(RateRecord),
    Csv(CsvRecord),
}
impl Recording {
    pub fn new(alive: usize, csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new(alive))
        } else {
            Self::Rate(RateRecord::new(alive))
        }
    }

    /// Writes the CSV samples, a no-op when only rates were kept
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Rate(_) => Ok(()),
        }
    }
}
impl Recorder for Recording {
    fn record(&mut self, generation: usize, alive: usize) {
        match self {
            Self::Rate(r) => r.record(generation, alive),
            Self::Csv(r) => r.record(generation, alive),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Rate(r) => r.has_report(),
            Self::Csv(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> String {
        match self {
            Self::Rate(r) => r.report(),
            Self::Csv(r) => r.report(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_one_row_per_generation() {
        let mut rec = CsvRecord::new(5);
        rec.record(1, 6);
        rec.record(2, 9);

        let mut out = Vec::new();
        rec.write_to(&mut out).expect("write to vec");
        let text = String::from_utf8(out).expect("utf8");
        let rows: Vec<_> = text.lines().collect();

        assert_eq!(rows[0], "gen,delta_us,alive");
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("1,") && rows[1].ends_with(",6"));
        assert!(rows[2].starts_with("2,") && rows[2].ends_with(",9"));
    }

    #[test]
    fn report_shows_latest_generation() {
        let mut rec = RateRecord::new(0);
        rec.record(7, 42);

        let report = rec.report();

        assert!(report.contains("gen:7"), "{report}");
        assert!(report.contains("alive:42"), "{report}");
    }
}
