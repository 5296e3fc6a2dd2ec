use schemars::schema_for;

use crate::json::types;

pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(types::JsonOptimizationRequest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_describes_request() {
        let schema: serde_json::Value =
            serde_json::from_str(&generate_json_schema().unwrap()).unwrap();

        assert_eq!(schema["title"], "OptimizationRequest");
        let properties = schema["properties"].as_object().unwrap();
        for field in ["orders", "vehicles", "constraints", "params", "matrices"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
    }
}
