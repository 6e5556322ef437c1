//! weather.com forecast source
//!
//! Pages are served per horizon under
//! `https://weather.com/weather/{forecast}/l/{area}` with temperatures in
//! Fahrenheit.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::ForecastParser;
use super::registry::{ParserDescriptor, ParserUnit};
use crate::domain::{Forecast, ForecastRequest, ForecastType, Temperature, Unit};
use crate::infrastructure::parsing::{
    ExtractionCriteria, FieldMap, FieldMapper, PLACEHOLDER, ParsingError, clean_digits, element_text, fields,
    parse_forecast_list, parse_high_low, parse_temperature_range, split_date_cell,
};
use crate::infrastructure::{ForecastError, ForecastResult, PageFetcher, UnitConverter};

pub const UNIT_NAME: &str = "weather_com_parser";
pub const TYPE_NAME: &str = "WeatherComParser";
pub const BASE_URL: &str = "https://weather.com/weather/{forecast}/l/{area}";
pub const NATIVE_UNIT: Unit = Unit::Fahrenheit;

const TODAY_CONTAINER: &str = "section.today_nowcard-container";
const LIST_CONTAINER: &str = "table.twc-table > tbody";
const WEEKEND_CONTAINER: &str = "article.ls-mod > div > div";

const TODAY_TEMP: &str = "today_nowcard-temp";
const TODAY_PHRASE: &str = "today_nowcard-phrase";
const TODAY_HILO: &str = "today_nowcard-hilo";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css}: {e:?}"))
}

static TODAY_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(TODAY_CONTAINER));
static LIST_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(LIST_CONTAINER));
static WEEKEND_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(WEEKEND_CONTAINER));
static SIDEBAR_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div.today_nowcard-sidebar"));
static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("table tr"));
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("td"));
static SPAN_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("span"));

/// Registration entry for this source
pub fn unit() -> ParserUnit {
    ParserUnit::new(
        UNIT_NAME,
        vec![ParserDescriptor {
            type_name: TYPE_NAME,
            base_url: BASE_URL,
            native_unit: NATIVE_UNIT,
            build: WeatherComParser::boxed,
        }],
    )
}

fn today_criteria() -> ExtractionCriteria {
    ExtractionCriteria::new()
        .class_field("div", TODAY_TEMP)
        .class_field("div", TODAY_PHRASE)
        .class_field("div", TODAY_HILO)
}

fn list_criteria() -> ExtractionCriteria {
    ExtractionCriteria::new()
        .class_field("span", "date-time")
        .class_field("span", "day-detail")
        .class_field("td", "description")
        .class_field("td", "temp")
        .class_field("td", "wind")
        .class_field("td", "humidity")
}

fn list_mapper() -> FieldMapper {
    FieldMapper::new()
        .with_rule("date-time", fields::DATE)
        .with_rule("day-detail", fields::DAY)
        .with_rule("temp", fields::TEMPERATURE)
}

fn weekend_criteria() -> ExtractionCriteria {
    ExtractionCriteria::new()
        .class_field("header", "weather-cell")
        .class_field("p", "temp")
        .class_field("h3", "weather-phrase")
        .class_field("p", "wind-conditions")
        .class_field("p", "humidity")
}

fn weekend_mapper() -> FieldMapper {
    FieldMapper::new()
        .with_rule("weather-cell", fields::DATE_CELL)
        .with_rule("wind-conditions", fields::WIND)
        .with_rule("weather-phrase", fields::DESCRIPTION)
        .with_rule("temp", fields::TEMPERATURE)
}

pub struct WeatherComParser {
    fetcher: Box<dyn PageFetcher>,
    converter: UnitConverter,
}

impl WeatherComParser {
    pub fn new(fetcher: Box<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            converter: UnitConverter::new(NATIVE_UNIT),
        }
    }

    fn boxed(fetcher: Box<dyn PageFetcher>) -> Box<dyn ForecastParser> {
        Box::new(Self::new(fetcher))
    }

    fn fetch_document(&self, request: &ForecastRequest) -> ForecastResult<Html> {
        let markup = self
            .fetcher
            .fetch(request.forecast_type.value(), &request.area_code)?;
        debug!("Fetched {} page ({} bytes)", request.forecast_type, markup.len());
        Ok(Html::parse_document(&markup))
    }

    fn today_forecast(&self, request: &ForecastRequest) -> ForecastResult<Vec<Forecast>> {
        let failed = |source: ParsingError| ForecastError::extraction(request.forecast_type, source);

        let document = self.fetch_document(request)?;
        let container = document
            .select(&TODAY_SELECTOR)
            .next()
            .ok_or_else(|| failed(ParsingError::no_forecast_items(TODAY_CONTAINER)))?;

        let items = parse_forecast_list(container, &today_criteria());
        let weather_info = items
            .first()
            .ok_or_else(|| failed(ParsingError::no_forecast_items(TODAY_CONTAINER)))?;
        debug!("Extracted today fields: {:?}", weather_info);

        let hilo = weather_info.get(TODAY_HILO).map_or("", String::as_str);
        let (high, low) = parse_high_low(hilo).map_err(failed)?;

        let current = clean_digits(weather_info.get(TODAY_TEMP).map_or("", String::as_str));
        let (wind, humidity) = additional_info(container);
        let description = weather_info.get(TODAY_PHRASE).map_or("", |text| text.trim());

        let (high_temp, low_temp) = self.convert_range(&high, &low, request.unit);
        let forecast = Forecast::new(request.forecast_type, self.converter.convert(&current, request.unit))
            .with_range(high_temp, low_temp)
            .with_description(description)
            .with_wind(wind)
            .with_humidity(humidity);

        Ok(vec![forecast])
    }

    fn list_forecast(&self, request: &ForecastRequest) -> ForecastResult<Vec<Forecast>> {
        let document = self.fetch_document(request)?;
        self.forecasts_from(&document, request, &LIST_SELECTOR, LIST_CONTAINER, &list_criteria(), &list_mapper())
    }

    fn weekend_forecast(&self, request: &ForecastRequest) -> ForecastResult<Vec<Forecast>> {
        let document = self.fetch_document(request)?;
        self.forecasts_from(
            &document,
            request,
            &WEEKEND_SELECTOR,
            WEEKEND_CONTAINER,
            &weekend_criteria(),
            &weekend_mapper(),
        )
    }

    fn forecasts_from(
        &self,
        document: &Html,
        request: &ForecastRequest,
        container_selector: &Selector,
        container_name: &str,
        criteria: &ExtractionCriteria,
        mapper: &FieldMapper,
    ) -> ForecastResult<Vec<Forecast>> {
        let Some(container) = document.select(container_selector).next() else {
            warn!("No '{}' container on the {} page", container_name, request.forecast_type);
            return Ok(Vec::new());
        };

        let items = mapper.remap(&parse_forecast_list(container, criteria));
        debug!("Remapped {} {} items", items.len(), request.forecast_type);

        items
            .iter()
            .map(|item| self.list_item_forecast(item, request))
            .collect()
    }

    fn list_item_forecast(&self, item: &FieldMap, request: &ForecastRequest) -> ForecastResult<Forecast> {
        let field = |key: &str| item.get(key).map(|value| value.trim());

        let temperature = field(fields::TEMPERATURE).unwrap_or("");
        let (high, low) = parse_temperature_range(temperature)
            .map_err(|source| ForecastError::extraction(request.forecast_type, source))?;
        let current = clean_digits(temperature);

        let (date, day) = match field(fields::DATE_CELL) {
            Some(cell) => split_date_cell(cell),
            None => (
                field(fields::DATE).unwrap_or_default().to_string(),
                field(fields::DAY).unwrap_or_default().to_string(),
            ),
        };
        let forecast_date = format!("{date} {day}").trim().to_string();

        let (high_temp, low_temp) = self.convert_range(&high, &low, request.unit);
        Ok(Forecast::new(request.forecast_type, self.converter.convert(&current, request.unit))
            .with_range(high_temp, low_temp)
            .with_description(field(fields::DESCRIPTION).unwrap_or_default())
            .with_wind(field(fields::WIND).unwrap_or(PLACEHOLDER))
            .with_humidity(field(fields::HUMIDITY).unwrap_or(PLACEHOLDER))
            .with_date(forecast_date))
    }

    /// Convert a raw high/low pair, swapping it when a numeric high ends up
    /// below the low
    fn convert_range(&self, high: &str, low: &str, dest: Option<Unit>) -> (Temperature, Temperature) {
        let high_temp = self.converter.convert(high, dest);
        let low_temp = self.converter.convert(low, dest);

        let both_numeric = high.parse::<f64>().is_ok() && low.parse::<f64>().is_ok();
        if both_numeric && high_temp.value() < low_temp.value() {
            warn!("High {} is below low {}; swapping", high, low);
            return (low_temp, high_temp);
        }

        (high_temp, low_temp)
    }
}

impl ForecastParser for WeatherComParser {
    fn run(&self, request: &ForecastRequest) -> ForecastResult<Vec<Forecast>> {
        debug!("Running {} for {} / {}", TYPE_NAME, request.forecast_type, request.area_code);

        match request.forecast_type {
            ForecastType::Today => self.today_forecast(request),
            ForecastType::FiveDays | ForecastType::TenDays => self.list_forecast(request),
            ForecastType::Weekend => self.weekend_forecast(request),
        }
    }
}

/// Wind and humidity from the first two sidebar rows
fn additional_info(container: ElementRef<'_>) -> (String, String) {
    let mut values = container
        .select(&SIDEBAR_SELECTOR)
        .next()
        .map(|sidebar| sidebar.select(&ROW_SELECTOR).take(2).map(row_value).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter();

    let wind = values.next().unwrap_or_else(|| PLACEHOLDER.to_string());
    let humidity = values.next().unwrap_or_else(|| PLACEHOLDER.to_string());
    (wind, humidity)
}

fn row_value(row: ElementRef<'_>) -> String {
    let text = row
        .select(&CELL_SELECTOR)
        .next()
        .map(|cell| cell.select(&SPAN_SELECTOR).next().map_or_else(|| element_text(cell), element_text))
        .unwrap_or_default();

    if text.is_empty() { PLACEHOLDER.to_string() } else { text }
}
