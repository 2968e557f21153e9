use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weather_yield_api::models::{WeatherObservation, WeatherYearStats};
use weather_yield_api::readers::{parse_weather_line, parse_yield_line};

// One station-year of raw lines, every tenth line carrying a missing value
fn create_station_lines(days: usize) -> Vec<String> {
    let base_date = NaiveDate::from_ymd_opt(1985, 1, 1).unwrap();

    (0..days)
        .map(|day| {
            let date = base_date + chrono::Duration::days(day as i64);
            let max_temp = if day % 10 == 9 { -9999 } else { 150 + (day % 120) as i32 };
            format!(
                "{}\t{}\t{}\t{}",
                date.format("%Y%m%d"),
                max_temp,
                -50 + (day % 80) as i32,
                (day * 7) % 300
            )
        })
        .collect()
}

fn create_observations(days: usize) -> Vec<WeatherObservation> {
    create_station_lines(days)
        .iter()
        .filter_map(|line| parse_weather_line(line).ok())
        .map(|reading| WeatherObservation::from_reading("USC00110072", reading))
        .collect()
}

fn benchmark_weather_line_parsing(c: &mut Criterion) {
    let lines = create_station_lines(365);

    c.bench_function("weather_line_parsing", |b| {
        b.iter(|| {
            let valid = lines
                .iter()
                .filter(|line| parse_weather_line(black_box(line)).is_ok())
                .count();
            black_box(valid)
        })
    });
}

fn benchmark_yield_line_parsing(c: &mut Criterion) {
    let lines: Vec<String> = (1950..2015)
        .map(|year| format!("{}\t{}", year, 100_000 + year * 50))
        .collect();

    c.bench_function("yield_line_parsing", |b| {
        b.iter(|| {
            let valid = lines
                .iter()
                .filter(|line| parse_yield_line(black_box(line)).is_ok())
                .count();
            black_box(valid)
        })
    });
}

fn benchmark_stats_accumulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats_accumulation_by_days");

    for &days in &[31, 365, 3650] {
        group.bench_with_input(BenchmarkId::new("days", days), &days, |b, &days| {
            let observations = create_observations(days);

            b.iter(|| {
                let mut stats: Option<WeatherYearStats> = None;
                for observation in &observations {
                    stats = Some(WeatherYearStats::accumulate(stats, black_box(observation)));
                }
                black_box(stats.map(|s| s.avg_max_temp))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_weather_line_parsing,
    benchmark_yield_line_parsing,
    benchmark_stats_accumulation
);
criterion_main!(benches);
