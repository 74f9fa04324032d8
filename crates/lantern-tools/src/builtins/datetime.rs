//! Date and time tools.

use crate::builtins::utils::{number_schema, parse_args};
use crate::Tool;
use async_trait::async_trait;
use chrono::{Local, Months, NaiveDate};
use lantern_protocol::ToolError;
use log::info;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateTimeOp {
    CurrentDateTime,
    YearsFromNow,
    DaysFromNow,
    SetAlarm,
    CurrentYear,
}

/// A single date/time capability exposed as a tool.
#[derive(Debug, Clone, Copy)]
pub struct DateTimeTool {
    op: DateTimeOp,
}

impl DateTimeTool {
    /// Current local date and time.
    pub fn current_date_time() -> Self {
        Self {
            op: DateTimeOp::CurrentDateTime,
        }
    }

    /// Date a number of years from now.
    pub fn years_from_now() -> Self {
        Self {
            op: DateTimeOp::YearsFromNow,
        }
    }

    /// Date a number of days from now.
    pub fn days_from_now() -> Self {
        Self {
            op: DateTimeOp::DaysFromNow,
        }
    }

    /// Canned alarm confirmation.
    pub fn set_alarm() -> Self {
        Self {
            op: DateTimeOp::SetAlarm,
        }
    }

    /// Current year.
    pub fn current_year() -> Self {
        Self {
            op: DateTimeOp::CurrentYear,
        }
    }
}

#[derive(Debug, Deserialize)]
struct YearsArgs {
    years: i32,
}

#[derive(Debug, Deserialize)]
struct DaysArgs {
    days: i64,
}

#[derive(Debug, Deserialize)]
struct AlarmArgs {
    time: String,
}

fn shift_years(date: NaiveDate, years: i32) -> Result<NaiveDate, ToolError> {
    let months = Months::new(years.unsigned_abs() * 12);
    let shifted = if years >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.ok_or_else(|| ToolError::ExecutionFailed(format!("date out of range: {years} years")))
}

#[async_trait]
impl Tool for DateTimeTool {
    fn name(&self) -> &str {
        match self.op {
            DateTimeOp::CurrentDateTime => "get_current_date_time",
            DateTimeOp::YearsFromNow => "get_date_years_from_now",
            DateTimeOp::DaysFromNow => "get_date_days_from_now",
            DateTimeOp::SetAlarm => "set_alarm",
            DateTimeOp::CurrentYear => "get_current_year",
        }
    }

    fn description(&self) -> &str {
        match self.op {
            DateTimeOp::CurrentDateTime => "Get the current date and time",
            DateTimeOp::YearsFromNow => {
                "Get the date that is a specified number of years from now"
            }
            DateTimeOp::DaysFromNow => "Get the date that is a specified number of days from now",
            DateTimeOp::SetAlarm => "Set an alarm for a specific time",
            DateTimeOp::CurrentYear => "Get the current year",
        }
    }

    fn args_schema(&self) -> Value {
        match self.op {
            DateTimeOp::CurrentDateTime | DateTimeOp::CurrentYear => json!({
                "type": "object",
                "properties": {},
            }),
            DateTimeOp::YearsFromNow => number_schema(&[("years", "Number of years from now")]),
            DateTimeOp::DaysFromNow => number_schema(&[("days", "Number of days from now")]),
            DateTimeOp::SetAlarm => json!({
                "type": "object",
                "properties": {
                    "time": {"type": "string", "description": "Time to set the alarm for"},
                },
                "required": ["time"],
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let result = match self.op {
            DateTimeOp::CurrentDateTime => {
                info!("getting current date and time");
                json!(Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
            }
            DateTimeOp::YearsFromNow => {
                let YearsArgs { years } = parse_args(args)?;
                info!("calculating date {years} years from now");
                let future = shift_years(Local::now().date_naive(), years)?;
                json!(future.to_string())
            }
            DateTimeOp::DaysFromNow => {
                let DaysArgs { days } = parse_args(args)?;
                info!("calculating date {days} days from now");
                let future = Local::now()
                    .date_naive()
                    .checked_add_signed(chrono::Duration::days(days))
                    .ok_or_else(|| {
                        ToolError::ExecutionFailed(format!("date out of range: {days} days"))
                    })?;
                json!(future.format("%A, %B %-d, %Y").to_string())
            }
            DateTimeOp::SetAlarm => {
                let AlarmArgs { time } = parse_args(args)?;
                info!("setting alarm for {time}");
                json!(format!(
                    "Alarm set for {time}. You will be notified at the specified time."
                ))
            }
            DateTimeOp::CurrentYear => {
                use chrono::Datelike;
                json!(Local::now().year())
            }
        };
        Ok(result)
    }
}

/// All date/time capabilities as a tool set.
pub fn datetime_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(DateTimeTool::current_date_time()),
        Arc::new(DateTimeTool::years_from_now()),
        Arc::new(DateTimeTool::days_from_now()),
        Arc::new(DateTimeTool::set_alarm()),
        Arc::new(DateTimeTool::current_year()),
    ]
}
