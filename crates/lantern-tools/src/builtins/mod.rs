//! Built-in tools: arithmetic, date/time, and canned weather reports.

mod calculator;
mod datetime;
mod utils;
mod weather;

pub use calculator::{calculator_tools, CalculatorTool};
pub use datetime::{datetime_tools, DateTimeTool};
pub use weather::{weather_tools, WeatherTool};

use crate::ToolRegistry;

/// Build a registry pre-populated with every built-in tool.
pub fn builtin_tool_registry() -> ToolRegistry {
    let registry = ToolRegistry::new();
    registry.register_all(calculator_tools());
    registry.register_all(datetime_tools());
    registry.register_all(weather_tools());
    registry
}

#[cfg(test)]
mod tests {
    use super::builtin_tool_registry;

    #[test]
    fn builtin_registry_contains_all_tool_groups() {
        let registry = builtin_tool_registry();
        for name in [
            "add",
            "divide",
            "sqrt",
            "get_current_date_time",
            "get_current_year",
            "get_current_weather",
            "get_weather_forecast",
        ] {
            assert!(registry.get(name).is_some(), "missing builtin: {name}");
        }
    }
}
