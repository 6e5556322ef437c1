//! Command line interface.

use clap::{Args, Parser};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::domain::{Forecast, ForecastRequest, ForecastType, Unit};
use crate::infrastructure::{
    AppConfig, FixturePageFetcher, ForecastError, ForecastResult, HttpPageFetcher, PageFetcher,
};
use crate::parsers::parser_registry;

pub const MISSING_HORIZON: &str =
    "one of these arguments must be used: -t/--today, -5/--fivedays, -T/--tendays, -w/--weekend";

#[derive(Parser, Debug)]
#[command(name = "weatherterm", version, about = "Weather forecasts on your terminal", long_about = None)]
pub struct Cli {
    /// Parser used to scrape the forecast (see --list-parsers)
    #[arg(short, long)]
    pub parser: Option<String>,

    /// Area code of the location, as used in the source's URLs
    #[arg(short, long = "areacode")]
    pub area_code: Option<String>,

    /// Unit used to display temperatures (Celsius or Fahrenheit)
    #[arg(short, long)]
    pub unit: Option<Unit>,

    #[command(flatten)]
    pub forecast: ForecastSelection,

    /// Read the page from a local file instead of fetching it
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print forecasts as JSON
    #[arg(long)]
    pub json: bool,

    /// List the available parsers and exit
    #[arg(long)]
    pub list_parsers: bool,
}

/// Forecast horizon flags; at most one may be given
#[derive(Args, Debug, Default, Clone, Copy)]
#[group(multiple = false)]
pub struct ForecastSelection {
    /// Show the weather forecast for today
    #[arg(short = 't', long)]
    pub today: bool,

    /// Show the weather forecast for the next five days
    #[arg(short = '5', long)]
    pub fivedays: bool,

    /// Show the weather forecast for the next ten days
    #[arg(short = 'T', long)]
    pub tendays: bool,

    /// Show the weather forecast for the weekend
    #[arg(short, long)]
    pub weekend: bool,
}

impl ForecastSelection {
    pub const fn forecast_type(self) -> Option<ForecastType> {
        if self.today {
            Some(ForecastType::Today)
        } else if self.fivedays {
            Some(ForecastType::FiveDays)
        } else if self.tendays {
            Some(ForecastType::TenDays)
        } else if self.weekend {
            Some(ForecastType::Weekend)
        } else {
            None
        }
    }
}

/// Resolve the request described by `cli` and run it through the selected
/// parser. The parser name is checked before anything is fetched.
pub fn run(cli: &Cli, config: &AppConfig) -> ForecastResult<Vec<Forecast>> {
    let parser_name = cli
        .parser
        .as_deref()
        .or(config.defaults.parser.as_deref())
        .ok_or_else(|| ForecastError::configuration("no parser selected; use -p/--parser"))?;
    let descriptor = parser_registry().get(parser_name)?;

    let forecast_type = cli
        .forecast
        .forecast_type()
        .ok_or_else(|| ForecastError::configuration(MISSING_HORIZON))?;

    let area_code = cli
        .area_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ForecastError::configuration("an area code is required; use -a/--areacode"))?;

    let unit = cli.unit.or(config.defaults.unit);
    let request = ForecastRequest::new(forecast_type, area_code).with_unit(unit);

    let fetcher: Box<dyn PageFetcher> = match &cli.fixture {
        Some(path) => {
            debug!("Using fixture {}", path.display());
            Box::new(FixturePageFetcher::from_file(path)?.with_not_found_marker(&config.fetcher.not_found_marker))
        }
        None => Box::new(HttpPageFetcher::new(descriptor.base_url, &config.fetcher)?),
    };

    info!(
        "Requesting {} forecast for {} with {}",
        forecast_type, request.area_code, descriptor.type_name
    );
    let forecasts = descriptor.create(fetcher).run(&request)?;
    info!("Produced {} forecasts", forecasts.len());

    Ok(forecasts)
}

/// Text shown by `--list-parsers`
pub fn list_parsers() -> String {
    let registry = parser_registry();
    registry
        .names()
        .filter_map(|name| registry.get(name).ok().map(|d| format!("{name} ({}, native unit {})", d.type_name, d.native_unit)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render(forecasts: &[Forecast], json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string_pretty(forecasts);
    }

    Ok(forecasts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Temperature;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("weatherterm").chain(args.iter().copied())).unwrap()
    }

    #[rstest]
    #[case(&["-t"], Some(ForecastType::Today))]
    #[case(&["--fivedays"], Some(ForecastType::FiveDays))]
    #[case(&["-5"], Some(ForecastType::FiveDays))]
    #[case(&["-T"], Some(ForecastType::TenDays))]
    #[case(&["--weekend"], Some(ForecastType::Weekend))]
    #[case(&[], None)]
    fn selects_horizon(#[case] args: &[&str], #[case] expected: Option<ForecastType>) {
        assert_eq!(parse(args).forecast.forecast_type(), expected);
    }

    #[test]
    fn test_horizon_flags_are_exclusive() {
        assert!(Cli::try_parse_from(["weatherterm", "-t", "-w"]).is_err());
    }

    #[test]
    fn test_unit_parses_case_insensitively() {
        let cli = parse(&["-p", "weather_com_parser", "-a", "X", "-u", "celsius", "-t"]);
        assert_eq!(cli.unit, Some(Unit::Celsius));
        assert!(Cli::try_parse_from(["weatherterm", "-u", "kelvin"]).is_err());
    }

    #[test]
    fn test_unknown_parser_fails_before_fetching() {
        // no fixture and a bogus area: any network attempt would be a fetch error
        let cli = parse(&["-p", "nope_parser", "-a", "X", "-t"]);
        let err = run(&cli, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, ForecastError::Configuration { .. }));
    }

    #[test]
    fn test_missing_horizon_message() {
        let cli = parse(&["-p", "weather_com_parser", "-a", "X"]);
        let err = run(&cli, &AppConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains(MISSING_HORIZON));
    }

    #[test]
    fn test_parser_and_unit_default_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("today.html");
        std::fs::write(
            &fixture,
            r#"<section class="today_nowcard-container"><div>
                <div class="today_nowcard-temp">32°</div>
                <div class="today_nowcard-hilo">H 50 L 32</div>
            </div></section>"#,
        )
        .unwrap();

        let cli = parse(&["-a", "X", "-t", "--fixture", fixture.to_str().unwrap()]);
        let mut config = AppConfig::default();
        config.defaults.parser = Some("WeatherComParser".to_string());
        config.defaults.unit = Some(Unit::Celsius);

        let forecasts = run(&cli, &config).unwrap();
        assert_eq!(forecasts[0].current_temp(), Temperature::Whole(0));
        assert_eq!(forecasts[0].high_temp(), Temperature::Whole(10));
    }

    #[test]
    fn test_render_json_and_text() {
        let forecast = Forecast::new(ForecastType::FiveDays, Temperature::Whole(70))
            .with_range(Temperature::Whole(75), Temperature::Whole(60))
            .with_description("Clear")
            .with_wind("calm")
            .with_humidity("30%")
            .with_date("SAT MAR 9");

        let text = render(std::slice::from_ref(&forecast), false).unwrap();
        assert_eq!(
            text,
            ">> SAT MAR 9\n    High 75° / Low 60° (Clear)\n    Wind: calm / Humidity: 30%"
        );

        let json = render(&[forecast], true).unwrap();
        assert!(json.contains("\"forecastDate\": \"SAT MAR 9\""));
    }

    #[test]
    fn test_list_parsers_mentions_builtin() {
        assert!(list_parsers().contains("weather_com_parser (WeatherComParser"));
    }
}
