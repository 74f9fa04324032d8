//! Basic arithmetic tools.
//!
//! Each operation is exposed as its own tool so the model sees one
//! function per capability.

use crate::builtins::utils::{number_schema, parse_args};
use crate::Tool;
use async_trait::async_trait;
use lantern_protocol::ToolError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Arithmetic operation behind a [`CalculatorTool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalcOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Percentage,
}

/// A single arithmetic operation exposed as a tool.
#[derive(Debug, Clone, Copy)]
pub struct CalculatorTool {
    op: CalcOp,
}

impl CalculatorTool {
    /// Addition of two numbers.
    pub fn add() -> Self {
        Self { op: CalcOp::Add }
    }

    /// Subtraction of the second number from the first.
    pub fn subtract() -> Self {
        Self { op: CalcOp::Subtract }
    }

    /// Multiplication of two numbers.
    pub fn multiply() -> Self {
        Self { op: CalcOp::Multiply }
    }

    /// Division of the first number by the second.
    pub fn divide() -> Self {
        Self { op: CalcOp::Divide }
    }

    /// Base raised to an exponent.
    pub fn power() -> Self {
        Self { op: CalcOp::Power }
    }

    /// Square root of a number.
    pub fn sqrt() -> Self {
        Self { op: CalcOp::Sqrt }
    }

    /// Percentage of a number.
    pub fn percentage() -> Self {
        Self { op: CalcOp::Percentage }
    }
}

#[derive(Debug, Deserialize)]
struct PairArgs {
    a: f64,
    b: f64,
}

#[derive(Debug, Deserialize)]
struct PowerArgs {
    base: f64,
    exponent: f64,
}

#[derive(Debug, Deserialize)]
struct SqrtArgs {
    number: f64,
}

#[derive(Debug, Deserialize)]
struct PercentageArgs {
    number: f64,
    percent: f64,
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        match self.op {
            CalcOp::Add => "add",
            CalcOp::Subtract => "subtract",
            CalcOp::Multiply => "multiply",
            CalcOp::Divide => "divide",
            CalcOp::Power => "power",
            CalcOp::Sqrt => "sqrt",
            CalcOp::Percentage => "percentage",
        }
    }

    fn description(&self) -> &str {
        match self.op {
            CalcOp::Add => "Add two numbers",
            CalcOp::Subtract => "Subtract the second number from the first number",
            CalcOp::Multiply => "Multiply two numbers",
            CalcOp::Divide => "Divide the first number by the second number",
            CalcOp::Power => "Calculate the power of a number (base raised to exponent)",
            CalcOp::Sqrt => "Calculate the square root of a number",
            CalcOp::Percentage => "Calculate the percentage of a number",
        }
    }

    fn args_schema(&self) -> Value {
        match self.op {
            CalcOp::Add | CalcOp::Subtract | CalcOp::Multiply | CalcOp::Divide => number_schema(&[
                ("a", "First operand"),
                ("b", "Second operand"),
            ]),
            CalcOp::Power => number_schema(&[
                ("base", "The base"),
                ("exponent", "The exponent"),
            ]),
            CalcOp::Sqrt => number_schema(&[("number", "The number to take the root of")]),
            CalcOp::Percentage => number_schema(&[
                ("number", "The number"),
                ("percent", "The percentage to take"),
            ]),
        }
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let result = match self.op {
            CalcOp::Add => {
                let PairArgs { a, b } = parse_args(args)?;
                a + b
            }
            CalcOp::Subtract => {
                let PairArgs { a, b } = parse_args(args)?;
                a - b
            }
            CalcOp::Multiply => {
                let PairArgs { a, b } = parse_args(args)?;
                a * b
            }
            CalcOp::Divide => {
                let PairArgs { a, b } = parse_args(args)?;
                if b == 0.0 {
                    return Err(ToolError::ExecutionFailed(
                        "cannot divide by zero".to_string(),
                    ));
                }
                a / b
            }
            CalcOp::Power => {
                let PowerArgs { base, exponent } = parse_args(args)?;
                base.powf(exponent)
            }
            CalcOp::Sqrt => {
                let SqrtArgs { number } = parse_args(args)?;
                if number < 0.0 {
                    return Err(ToolError::ExecutionFailed(
                        "cannot calculate square root of negative number".to_string(),
                    ));
                }
                number.sqrt()
            }
            CalcOp::Percentage => {
                let PercentageArgs { number, percent } = parse_args(args)?;
                (number * percent) / 100.0
            }
        };
        Ok(json!({ "result": result }))
    }
}

/// All calculator operations as a tool set.
pub fn calculator_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(CalculatorTool::add()),
        Arc::new(CalculatorTool::subtract()),
        Arc::new(CalculatorTool::multiply()),
        Arc::new(CalculatorTool::divide()),
        Arc::new(CalculatorTool::power()),
        Arc::new(CalculatorTool::sqrt()),
        Arc::new(CalculatorTool::percentage()),
    ]
}

#[cfg(test)]
mod tests {
    use super::CalculatorTool;
    use crate::Tool;
    use lantern_protocol::ToolError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn arithmetic_operations_compute() {
        let result = CalculatorTool::add()
            .call(json!({"a": 2.0, "b": 3.0}))
            .await
            .expect("add");
        assert_eq!(result, json!({"result": 5.0}));

        let result = CalculatorTool::power()
            .call(json!({"base": 2.0, "exponent": 10.0}))
            .await
            .expect("power");
        assert_eq!(result, json!({"result": 1024.0}));

        let result = CalculatorTool::percentage()
            .call(json!({"number": 250.0, "percent": 20.0}))
            .await
            .expect("percentage");
        assert_eq!(result, json!({"result": 50.0}));
    }

    #[tokio::test]
    async fn divide_by_zero_is_an_execution_failure() {
        let err = CalculatorTool::divide()
            .call(json!({"a": 1.0, "b": 0.0}))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn negative_sqrt_is_an_execution_failure() {
        let err = CalculatorTool::sqrt()
            .call(json!({"number": -4.0}))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn missing_arguments_are_invalid() {
        let err = CalculatorTool::add()
            .call(json!({"a": 1.0}))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
