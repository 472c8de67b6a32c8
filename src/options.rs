use lifegrid::Rule;
use lifegrid::engine::{CAVE_CYCLES, CaveConfig, SmoothConfig};
use lifegrid::error::Error;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_GRID: (usize, usize) = (500, 500);
const FALLBACK_TERMINAL: (usize, usize) = (80, 24);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Dense,
    Sparse,
    Smooth,
    Cave,
}
impl EngineKind {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "dense" => Some(Self::Dense),
            "sparse" => Some(Self::Sparse),
            "smooth" => Some(Self::Smooth),
            "cave" => Some(Self::Cave),
            _ => None,
        }
    }

    /// Smooth and cave fields default to the terminal's size
    fn sized_by_terminal(self) -> bool {
        matches!(self, Self::Smooth | Self::Cave)
    }
}

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn options() -> getopts::Options {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "render in the terminal");
        opts.optopt("e", "engine", "dense, sparse, smooth or cave", "ENGINE");
        opts.optopt("i", "input", "pattern file (.rle or x,y rows)", "FILE");
        opts.optopt("r", "rule", "life or maze", "RULE");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("t", "threads", "size of the worker pool", "COUNT");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "radius", "smooth life outer radius", "CELLS");
        opts.optopt("", "density", "initial live/wall probability", "P");
        opts.optopt("", "seed", "seed for random fills", "N");
        opts.optopt("", "stats", "write stats csv to file", "FILE");
        opts
    }

    /// Parses arguments, returning `None` once help has been printed
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, Error> {
        let opts = Self::options();
        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifegrid [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>, Error> {
        let env = std::env::args().skip(1).collect::<Vec<_>>();
        Self::new(&env)
    }

    fn get<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, Error> {
        match self.matches.opt_str(name) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| Error::InvalidOption { name, value }),
        }
    }

    pub fn engine(&self) -> Result<EngineKind, Error> {
        match self.matches.opt_str("engine") {
            None => Ok(EngineKind::Dense),
            Some(value) => EngineKind::new(&value).ok_or(Error::InvalidOption {
                name: "engine",
                value,
            }),
        }
    }
    pub fn rule(&self) -> Result<Rule, Error> {
        match self.matches.opt_str("rule") {
            None => Ok(Rule::LIFE),
            Some(value) => Rule::by_name(&value).ok_or(Error::InvalidOption {
                name: "rule",
                value,
            }),
        }
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn threads(&self) -> Result<Option<usize>, Error> {
        self.get("threads")
    }
    pub fn seed(&self) -> Result<Option<u64>, Error> {
        self.get("seed")
    }

    pub fn generations(&self, kind: EngineKind) -> Result<usize, Error> {
        let default = match kind {
            EngineKind::Cave => CAVE_CYCLES,
            _ => usize::MAX,
        };
        Ok(self.get("gens")?.unwrap_or(default))
    }
    pub fn sleep(&self) -> Result<Option<Duration>, Error> {
        Ok(match self.get("sleep")? {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(Duration::from_millis(100)),
            None => None,
        })
    }

    fn terminal_size() -> (usize, usize) {
        match crossterm::terminal::size() {
            // leave the last row for the report line
            Ok((cols, rows)) => (cols as usize, rows.saturating_sub(1).max(1) as usize),
            Err(err) => {
                log::debug!("terminal size unavailable ({err}), using {FALLBACK_TERMINAL:?}");
                FALLBACK_TERMINAL
            }
        }
    }

    pub fn grid_size(&self, kind: EngineKind) -> Result<(usize, usize), Error> {
        let default = if self.console() || kind.sized_by_terminal() {
            Self::terminal_size()
        } else {
            DEFAULT_GRID
        };

        let width = self.get::<usize>("width")?.unwrap_or(default.0);
        let height = self.get::<usize>("height")?.unwrap_or(default.1);
        if width == 0 {
            return Err(Error::InvalidOption {
                name: "width",
                value: width.to_string(),
            });
        }
        if height == 0 {
            return Err(Error::InvalidOption {
                name: "height",
                value: height.to_string(),
            });
        }
        Ok((width, height))
    }

    pub fn smooth_config(&self) -> Result<SmoothConfig, Error> {
        let default = SmoothConfig::default();
        Ok(SmoothConfig {
            radius: self.get("radius")?.unwrap_or(default.radius),
            p_alive: self.probability()?.unwrap_or(default.p_alive),
        })
    }
    pub fn cave_config(&self) -> Result<CaveConfig, Error> {
        let default = CaveConfig::default();
        Ok(CaveConfig {
            density: self.probability()?.unwrap_or(default.density),
        })
    }
    fn probability(&self) -> Result<Option<f64>, Error> {
        match self.get::<f64>("density")? {
            Some(p) if !(0.0..=1.0).contains(&p) => Err(Error::InvalidOption {
                name: "density",
                value: p.to_string(),
            }),
            p => Ok(p),
        }
    }

    pub fn input_file(&self) -> Option<PathBuf> {
        self.matches.opt_str("input").map(PathBuf::from)
    }
    pub fn stats_file(&self) -> Option<PathBuf> {
        self.matches.opt_str("stats").map(PathBuf::from)
    }
}
