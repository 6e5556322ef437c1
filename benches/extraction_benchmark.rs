//! Extraction engine throughput over a generated multi-day table

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scraper::{Html, Selector};
use weatherterm_lib::infrastructure::parsing::{
    ExtractionCriteria, FieldMapper, parse_forecast_list, parse_temperature_range,
};

fn forecast_table(rows: usize) -> String {
    let mut markup = String::from(r#"<html><body><table class="twc-table"><tbody>"#);
    for day in 0..rows {
        markup.push_str(&format!(
            r#"<tr><td><span class="date-time">D{day}</span><span class="day-detail">MAR {day}</span></td>
               <td class="description">Partly Cloudy</td><td class="temp">{}°/{}°</td>
               <td class="wind">W 10 mph</td><td class="humidity">45%</td></tr>"#,
            60 + day % 20,
            40 + day % 15
        ));
    }
    markup.push_str("</tbody></table></body></html>");
    markup
}

fn criteria() -> ExtractionCriteria {
    ExtractionCriteria::new()
        .class_field("span", "date-time")
        .class_field("span", "day-detail")
        .class_field("td", "description")
        .class_field("td", "temp")
        .class_field("td", "wind")
        .class_field("td", "humidity")
}

fn extraction_benchmark(c: &mut Criterion) {
    let document = Html::parse_document(&forecast_table(10));
    let selector = Selector::parse("table.twc-table > tbody").unwrap();
    let criteria = criteria();
    let mapper = FieldMapper::new().with_rule("temp", "temperature");

    c.bench_function("parse_forecast_list_10_rows", |b| {
        b.iter(|| {
            let container = document.select(&selector).next().unwrap();
            black_box(parse_forecast_list(black_box(container), &criteria))
        });
    });

    let items = {
        let container = document.select(&selector).next().unwrap();
        parse_forecast_list(container, &criteria)
    };
    c.bench_function("remap_and_parse_ranges", |b| {
        b.iter(|| {
            for item in mapper.remap(black_box(&items)) {
                let _ = black_box(parse_temperature_range(item.get("temperature").map_or("", String::as_str)));
            }
        });
    });

    c.bench_function("parse_document_10_rows", |b| {
        let markup = forecast_table(10);
        b.iter(|| black_box(Html::parse_document(black_box(&markup))));
    });
}

criterion_group!(benches, extraction_benchmark);
criterion_main!(benches);
