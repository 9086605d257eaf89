//! Calculator tool: basic arithmetic on two operands

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::{Value, json};
use toolchat_domain::tool::{
    ArgumentValidator, Arguments, DefaultArgumentValidator, ParamType, Tool, ToolDescriptor,
    ToolError, ToolParameter, ToolResultEnvelope,
};

/// Tool name constant
pub const CALCULATOR: &str = "calculator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    const NAMES: [&'static str; 4] = ["add", "subtract", "multiply", "divide"];

    fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    fn apply(&self, a: f64, b: f64) -> Result<f64, ToolError> {
        match self {
            Operation::Add => Ok(a + b),
            Operation::Subtract => Ok(a - b),
            Operation::Multiply => Ok(a * b),
            Operation::Divide if b == 0.0 => Err(ToolError::execution_failed("Division by zero")),
            Operation::Divide => Ok(a / b),
        }
    }
}

impl FromStr for Operation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            other => Err(ToolError::execution_failed(format!(
                "Unknown operation: {}",
                other
            ))),
        }
    }
}

/// Performs add, subtract, multiply and divide on two numbers
pub struct CalculatorTool {
    descriptor: ToolDescriptor,
}

impl CalculatorTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            CALCULATOR,
            "Performs basic arithmetic operations (add, subtract, multiply, divide)",
        )
        .with_parameter(
            ToolParameter::new("operation", "The arithmetic operation to perform", true)
                .with_allowed_values(Operation::NAMES),
        )
        .with_parameter(ToolParameter::new("a", "First number", true).with_type(ParamType::Number))
        .with_parameter(
            ToolParameter::new("b", "Second number", true).with_type(ParamType::Number),
        );
        Self { descriptor }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Numbers and numeric strings are both accepted
fn operand(arguments: &Arguments, name: &str) -> Result<f64, ToolError> {
    let value = arguments.get(name);
    value
        .and_then(Value::as_f64)
        .or_else(|| value.and_then(Value::as_str).and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| ToolError::invalid_arguments(format!("'{}' must be a number", name)))
}

#[async_trait]
impl Tool for CalculatorTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, arguments: &Arguments) -> Result<ToolResultEnvelope, ToolError> {
        // Unknown operations get their own message rather than the enum listing
        if let Some(Value::String(name)) = arguments.get("operation") {
            name.parse::<Operation>()?;
        }
        DefaultArgumentValidator.validate(arguments, &self.descriptor)?;

        let operation: Operation = arguments
            .get("operation")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_arguments("'operation' must be a string"))?
            .parse()?;
        let a = operand(arguments, "a")?;
        let b = operand(arguments, "b")?;

        let result = operation.apply(a, b)?;

        Ok(ToolResultEnvelope::success(json!({
            "result": result,
            "operation": operation.as_str(),
            "operands": { "a": a, "b": b },
        })))
    }
}
