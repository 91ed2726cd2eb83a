use std::path::PathBuf;
use std::time::Duration;

pub const USAGE: &str =
    "usage: pose-timer [--fast] [--gui] [--demo] [--limit SECONDS] [MODEL_FILE ...]";

#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub fast: bool,
    pub gui: bool,
    pub demo: bool,
    pub limit: Option<Duration>,
    pub model_files: Vec<PathBuf>,
}

impl Args {
    /// Parses everything after the program name.
    pub fn parse<I>(raw: I) -> Result<Self, Box<dyn std::error::Error + Send + Sync>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = Args::default();

        let mut raw = raw.into_iter();
        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--fast" => args.fast = true,
                "--gui" => args.gui = true,
                "--demo" => args.demo = true,
                "--limit" => {
                    let value = raw.next().ok_or(USAGE)?;
                    args.limit = Some(parse_limit(&value)?);
                }
                "--help" | "-h" => return Err(USAGE.into()),
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown flag {}\n{}", flag, USAGE).into())
                }
                path => args.model_files.push(PathBuf::from(path)),
            }
        }

        Ok(args)
    }
}

fn parse_limit(value: &str) -> Result<Duration, Box<dyn std::error::Error + Send + Sync>> {
    let seconds: f64 = value
        .parse()
        .map_err(|e| format!("invalid --limit {}: {}", value, e))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| format!("invalid --limit {}: {}", value, e).into())
}
