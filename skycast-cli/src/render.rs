//! Text rendering of the dashboard view model.
//!
//! A pure consumer: everything here reads the finished
//! [`DashboardView`] and produces a string. No fetching, no state.

use skycast_core::{DashboardView, Units, WeatherSnapshot};

use crate::theme;

const RESET: &str = "\x1b[0m";
const RULE: &str = "──────────────────────────────────────";

/// Width of the high/low temperature bar, in cells.
const BAR_WIDTH: usize = 12;

pub fn render_dashboard(view: &DashboardView, units: Units) -> String {
    let mut out = String::new();

    if let Some(error) = &view.error {
        out.push_str(&format!("! {}\n", error.user_message()));
    }

    let Some(weather) = &view.weather else {
        if view.is_loading {
            out.push_str("Fetching weather...\n");
        }
        return out;
    };

    let theme = theme::theme_for(&weather.condition.icon);
    let place = view
        .location_label
        .as_deref()
        .unwrap_or(&weather.location_name);

    out.push_str(&format!("{RULE}\n"));
    out.push_str(&format!(
        "  {place}   {}{} {}{RESET}\n",
        theme.accent, theme.glyph, weather.condition.description
    ));
    out.push_str(&format!(
        "  {}{:.0}{}{RESET}   H: {:.0}°  L: {:.0}°\n",
        theme.accent,
        weather.temperature,
        temp_unit(units),
        weather.temp_max,
        weather.temp_min
    ));
    out.push_str(&format!(
        "  L {}{}{RESET} H\n",
        theme.accent,
        temperature_bar(weather, theme.chart)
    ));
    out.push_str(&format!("{RULE}\n"));
    out.push_str(&format!("  Humidity    {} %\n", weather.humidity_pct));
    out.push_str(&format!(
        "  Wind        {:.1} {} {}\n",
        weather.wind_speed,
        wind_unit(units),
        compass(weather.wind_direction_deg)
    ));
    out.push_str(&format!(
        "  Visibility  {}\n",
        visibility(weather.visibility_m, units)
    ));
    out.push_str(&format!(
        "  Updated     {}\n",
        weather.fetched_at.format("%H:%M UTC")
    ));
    out.push_str(&format!("{RULE}\n"));

    out
}

/// Position of the current temperature between the daily low and high.
fn temperature_bar(weather: &WeatherSnapshot, fill: char) -> String {
    let span = weather.temp_max - weather.temp_min;
    let fraction = if span > 0.0 {
        ((weather.temperature - weather.temp_min) / span).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;

    let mut bar = String::with_capacity(BAR_WIDTH);
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { fill } else { '·' });
    }
    bar
}

/// Degrees to a 16-point compass label, 0/360 being north.
pub fn compass(deg: u16) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let index = ((f64::from(deg % 360) / 22.5).round() as usize) % 16;
    POINTS[index]
}

fn temp_unit(units: Units) -> &'static str {
    match units {
        Units::Metric => "°C",
        Units::Imperial => "°F",
    }
}

fn wind_unit(units: Units) -> &'static str {
    match units {
        Units::Metric => "m/s",
        Units::Imperial => "mph",
    }
}

fn visibility(meters: u32, units: Units) -> String {
    match units {
        Units::Metric => format!("{:.0} km", f64::from(meters) / 1000.0),
        Units::Imperial => format!("{:.0} mi", f64::from(meters) / 1609.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skycast_core::model::WeatherCondition;
    use skycast_core::{GeolocateError, ViewError};

    fn view(weather: Option<WeatherSnapshot>) -> DashboardView {
        DashboardView {
            weather,
            location_label: None,
            is_loading: false,
            error: None,
        }
    }

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "Madrid".to_string(),
            condition: WeatherCondition {
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            },
            temperature: 28.3,
            temp_min: 24.1,
            temp_max: 31.0,
            humidity_pct: 30,
            wind_speed: 3.6,
            wind_direction_deg: 220,
            visibility_m: 10_000,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn compass_covers_the_cardinal_points() {
        assert_eq!(compass(0), "N");
        assert_eq!(compass(90), "E");
        assert_eq!(compass(180), "S");
        assert_eq!(compass(270), "W");
        assert_eq!(compass(360), "N");
        assert_eq!(compass(220), "SW");
    }

    #[test]
    fn dashboard_shows_the_metric_cards() {
        let out = render_dashboard(&view(Some(snapshot())), Units::Metric);

        assert!(out.contains("Madrid"));
        assert!(out.contains("clear sky"));
        assert!(out.contains("28°C"));
        assert!(out.contains("H: 31°"));
        assert!(out.contains("L: 24°"));
        assert!(out.contains("Humidity    30 %"));
        assert!(out.contains("3.6 m/s SW"));
        assert!(out.contains("10 km"));
    }

    #[test]
    fn search_label_takes_precedence_over_the_payload_name() {
        let mut view = view(Some(snapshot()));
        view.location_label = Some("Valencia, ES".to_string());

        let out = render_dashboard(&view, Units::Metric);
        assert!(out.contains("Valencia, ES"));
    }

    #[test]
    fn error_renders_even_without_weather() {
        let mut view = view(None);
        view.error = Some(ViewError::Geolocate(GeolocateError::Denied(
            "quota".to_string(),
        )));

        let out = render_dashboard(&view, Units::Metric);
        assert!(out.contains("Search for a city"));
        assert!(!out.contains("Humidity"));
    }

    #[test]
    fn loading_without_data_renders_a_placeholder() {
        let mut view = view(None);
        view.is_loading = true;

        let out = render_dashboard(&view, Units::Metric);
        assert!(out.contains("Fetching weather"));
    }

    #[test]
    fn imperial_units_change_the_labels() {
        let out = render_dashboard(&view(Some(snapshot())), Units::Imperial);
        assert!(out.contains("°F"));
        assert!(out.contains("mph"));
        assert!(out.contains("6 mi"));
    }
}
