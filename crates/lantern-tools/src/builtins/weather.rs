//! Canned weather tools.
//!
//! These return fixed strings shaped like a real weather API response;
//! they exist to exercise tool calls with parameters, not to report
//! actual weather.

use crate::builtins::utils::parse_args;
use crate::Tool;
use async_trait::async_trait;
use lantern_protocol::ToolError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Maximum forecast horizon in days.
const MAX_FORECAST_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeatherOp {
    Current,
    Forecast,
}

/// A weather capability exposed as a tool.
#[derive(Debug, Clone, Copy)]
pub struct WeatherTool {
    op: WeatherOp,
}

impl WeatherTool {
    /// Current weather for a city.
    pub fn current_weather() -> Self {
        Self {
            op: WeatherOp::Current,
        }
    }

    /// Multi-day forecast for a city.
    pub fn forecast() -> Self {
        Self {
            op: WeatherOp::Forecast,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentArgs {
    city: String,
    units: String,
}

#[derive(Debug, Deserialize)]
struct ForecastArgs {
    city: String,
    days: i64,
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        match self.op {
            WeatherOp::Current => "get_current_weather",
            WeatherOp::Forecast => "get_weather_forecast",
        }
    }

    fn description(&self) -> &str {
        match self.op {
            WeatherOp::Current => "Get the current weather for a specific city",
            WeatherOp::Forecast => "Get weather forecast for a city for the next few days",
        }
    }

    fn args_schema(&self) -> Value {
        match self.op {
            WeatherOp::Current => json!({
                "type": "object",
                "properties": {
                    "city": {"type": "string", "description": "City name"},
                    "units": {
                        "type": "string",
                        "enum": ["metric", "imperial"],
                        "description": "Unit system",
                    },
                },
                "required": ["city", "units"],
            }),
            WeatherOp::Forecast => json!({
                "type": "object",
                "properties": {
                    "city": {"type": "string", "description": "City name"},
                    "days": {"type": "number", "description": "Number of days, up to 7"},
                },
                "required": ["city", "days"],
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let report = match self.op {
            WeatherOp::Current => {
                let CurrentArgs { city, units } = parse_args(args)?;
                let (temperature, unit) = if units == "metric" { (22, "C") } else { (72, "F") };
                format!(
                    "The current weather in {city} is {temperature}\u{b0}{unit} and sunny with \
                     light clouds. Humidity is 65% and wind speed is 10 km/h."
                )
            }
            WeatherOp::Forecast => {
                let ForecastArgs { city, days } = parse_args(args)?;
                let days = days.min(MAX_FORECAST_DAYS);
                let rain_day = (days / 2).max(1);
                format!(
                    "Weather forecast for {city} for the next {days} days: Mostly sunny with \
                     temperatures ranging from 18-25\u{b0}C. Light rain expected on day {rain_day}."
                )
            }
        };
        Ok(json!(report))
    }
}

/// Both weather capabilities as a tool set.
pub fn weather_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(WeatherTool::current_weather()),
        Arc::new(WeatherTool::forecast()),
    ]
}
