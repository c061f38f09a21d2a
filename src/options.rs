use anyhow::{Result, anyhow, bail};
use crossterm::style::Color;
use lifeterm::{CellSet, HistoryDepth, Region};
use regex::Regex;

const RATE: u32 = 20;
const MIN_RATE: u32 = 1;
const MAX_RATE: u32 = 100;
const BG_COLOR: &str = "#292929";
const LINE_COLOR: &str = "#fffafa";
const HEADLESS_GRID: (i32, i32) = (500, 500);

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("", "headless", "run without the interactive screen");
        opts.optflag("u", "unbounded", "evaluate the rule beyond the viewport");
        opts.optopt("w", "width", "viewport width in cells", "CELLS");
        opts.optopt("h", "height", "viewport height in cells", "CELLS");
        opts.optopt("s", "cell-size", "cell edge in terminal cells, 1 to 16", "SIZE");
        opts.optopt("f", "fill", "initial fill type", "TYPE");
        opts.optopt("r", "rate", "initial generations per second", "RATE");
        opts.optopt("", "min-rate", "lower bound for the tick rate", "RATE");
        opts.optopt("", "max-rate", "upper bound for the tick rate", "RATE");
        opts.optopt(
            "",
            "history",
            "snapshots to retain, --history=-1 for unbounded",
            "DEPTH",
        );
        opts.optopt("", "bg-color", "background color as #rrggbb", "HEX");
        opts.optopt("", "line-color", "gridline and cell color as #rrggbb", "HEX");
        opts.optopt("g", "gens", "generations to run when headless", "COUNT");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifeterm [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    pub fn config(&self) -> Result<Config> {
        let headless = self.matches.opt_present("headless");

        let cell_size = self.get("cell-size")?.unwrap_or(1u16);
        if !(1..=16).contains(&cell_size) {
            bail!("--cell-size must be between 1 and 16, got {cell_size}");
        }

        let (width, height) = self.grid_size(headless, cell_size)?;
        if width < 1 || height < 1 {
            bail!("grid dimensions must be at least 1x1, got {width}x{height}");
        }

        let rates = RateRange {
            min: self.get("min-rate")?.unwrap_or(MIN_RATE),
            initial: self.get("rate")?.unwrap_or(RATE),
            max: self.get("max-rate")?.unwrap_or(MAX_RATE),
        };
        if rates.min < 1 || rates.min > rates.initial || rates.initial > rates.max {
            bail!(
                "tick rates must satisfy 1 <= min <= initial <= max, got {}/{}/{}",
                rates.min,
                rates.initial,
                rates.max
            );
        }

        let history = match self.get::<i64>("history")? {
            Some(raw) => HistoryDepth::from_raw(raw)?,
            None => HistoryDepth::default(),
        };

        let background = self.matches.opt_str("bg-color");
        let line = self.matches.opt_str("line-color");
        let palette = Palette {
            background: parse_color(background.as_deref().unwrap_or(BG_COLOR))?,
            line: parse_color(line.as_deref().unwrap_or(LINE_COLOR))?,
        };

        let fill = match self.matches.opt_str("fill") {
            Some(ref mode) => {
                FillMode::new(mode).ok_or_else(|| anyhow!("unknown fill type {mode:?}"))?
            }
            None => FillMode::Empty,
        };

        Ok(Config {
            grid: Region::of_size(width, height),
            cell_size,
            rates,
            history,
            unbounded: self.matches.opt_present("unbounded"),
            palette,
            fill,
            headless,
            gens: self.get("gens")?.unwrap_or(usize::MAX),
        })
    }

    fn grid_size(&self, headless: bool, cell_size: u16) -> Result<(i32, i32)> {
        // only touch the terminal when a dimension was left out
        if let (Some(width), Some(height)) = (self.get("width")?, self.get("height")?) {
            return Ok((width, height));
        }

        let default = if headless {
            HEADLESS_GRID
        } else {
            let (cols, rows) = crossterm::terminal::size()?;
            (
                (i32::from(cols) / (2 * i32::from(cell_size))).max(1),
                (i32::from(rows.saturating_sub(1)) / i32::from(cell_size)).max(1),
            )
        };
        Ok((
            self.get("width")?.unwrap_or(default.0),
            self.get("height")?.unwrap_or(default.1),
        ))
    }

    fn get<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>>
    where
        T::Err: std::fmt::Display,
    {
        self.matches
            .opt_get(name)
            .map_err(|err| anyhow!("invalid --{name}: {err}"))
    }
}

pub struct Config {
    pub grid: Region,
    pub cell_size: u16,
    pub rates: RateRange,
    pub history: HistoryDepth,
    pub unbounded: bool,
    pub palette: Palette,
    pub fill: FillMode,
    pub headless: bool,
    pub gens: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct RateRange {
    pub min: u32,
    pub initial: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub line: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    pub fn seed<R: rand::Rng + ?Sized>(&self, region: Region, rng: &mut R) -> CellSet {
        let mut cells = CellSet::new();
        match self {
            Self::Random => cells.randomize(region, 0.5, rng),
            Self::Alternating => {
                for pos in region.cells() {
                    if (pos.x + pos.y) % 2 == 0 {
                        cells.activate(pos);
                    }
                }
            }
            Self::All => cells.fill(region),
            Self::Empty => {}
        }
        cells
    }
}

fn parse_color(hex: &str) -> Result<Color> {
    let pattern = Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap();
    let Some((_, [r, g, b])) = pattern.captures(hex).map(|caps| caps.extract()) else {
        bail!("invalid color {hex:?}: expected #rrggbb");
    };
    Ok(Color::Rgb {
        r: u8::from_str_radix(r, 16)?,
        g: u8::from_str_radix(g, 16)?,
        b: u8::from_str_radix(b, 16)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeterm::Pos2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn args(of: &[&str]) -> Args {
        Args::new(of).expect("parse args").expect("not a help run")
    }

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    #[test]
    fn fill_mode_parses() {
        let config = args(&["--headless", "--fill", "alternating"])
            .config()
            .expect("config");

        assert_eq!(config.fill, FillMode::Alternating);
    }

    #[test]
    fn unknown_fill_mode_is_rejected() {
        let result = args(&["--headless", "--fill", "diagonal"]).config();

        assert!(result.is_err());
    }

    #[test]
    fn headless_defaults_apply() {
        let config = args(&["--headless"]).config().expect("config");

        assert_eq!(config.grid, Region::of_size(500, 500));
        assert_eq!(config.rates.min, 1);
        assert_eq!(config.rates.initial, 20);
        assert_eq!(config.rates.max, 100);
        assert_eq!(config.history, HistoryDepth::default());
        assert_eq!(config.fill, FillMode::Empty);
        assert_eq!(config.cell_size, 1);
        assert!(!config.unbounded);
        assert_eq!(config.gens, usize::MAX);
    }

    #[test]
    fn explicit_dimensions_override_defaults() {
        let config = args(&["-w", "12", "-h", "7", "--headless"])
            .config()
            .expect("config");

        assert_eq!(config.grid, Region::of_size(12, 7));
    }

    #[test]
    fn history_sentinel_disables_the_bound() {
        let config = args(&["--headless", "--history=-1"]).config().expect("config");

        assert_eq!(config.history, HistoryDepth::Unbounded);
    }

    #[test]
    fn zero_history_depth_is_rejected() {
        let result = args(&["--headless", "--history", "0"]).config();

        assert!(result.is_err());
    }

    #[test]
    fn rate_ordering_is_enforced() {
        let result = args(&["--headless", "--rate", "200"]).config();

        assert!(result.is_err());
    }

    #[test]
    fn color_parses_with_or_without_hash() {
        let snow = Color::Rgb {
            r: 255,
            g: 250,
            b: 250,
        };

        assert_eq!(parse_color("#fffafa").expect("with hash"), snow);
        assert_eq!(parse_color("fffafa").expect("without hash"), snow);
        assert!(parse_color("snow").is_err());
        assert!(parse_color("#fff").is_err());
    }

    #[test]
    fn seed_all_fills_the_region() {
        let mut rng = StdRng::seed_from_u64(1);
        let region = Region::of_size(3, 2);

        let cells = FillMode::All.seed(region, &mut rng);

        assert_eq!(cells.len(), 6);
        assert!(region.cells().all(|p| cells.contains(p)));
    }

    #[test]
    fn seed_alternating_uses_parity() {
        let mut rng = StdRng::seed_from_u64(1);

        let cells = FillMode::Alternating.seed(Region::of_size(3, 3), &mut rng);

        assert_eq!(cells.len(), 5);
        assert!(cells.contains(pos(0, 0)));
        assert!(!cells.contains(pos(1, 0)));
        assert!(cells.contains(pos(1, 1)));
    }

    #[test]
    fn seed_random_stays_inside_the_region() {
        let mut rng = StdRng::seed_from_u64(99);
        let region = Region::of_size(4, 3);

        let cells = FillMode::Random.seed(region, &mut rng);

        assert!(cells.iter().all(|p| region.contains(p)));
    }

    #[test]
    fn seed_empty_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);

        assert!(FillMode::Empty.seed(Region::of_size(5, 4), &mut rng).is_empty());
    }
}
