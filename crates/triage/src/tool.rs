//! Function declaration for LLM tool registries.
//!
//! A triage assistant registers this declaration with its model; the model
//! calls back with arguments that [`WaitRoomQuery::from_tool_args`] reads.
//!
//! [`WaitRoomQuery::from_tool_args`]: crate::WaitRoomQuery::from_tool_args

use serde_json::{Value, json};

/// Name the model calls the tool by
pub const TOOL_NAME: &str = "getEmergencyWaitRoomInfo";

/// JSON function declaration for the wait-room query
pub fn tool_declaration() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": "Fetch nearby emergency room wait times and locations based on patient's current location",
        "parameters": {
            "type": "object",
            "properties": {
                "userCity": {
                    "type": "string",
                    "description": "The city where the patient is located"
                },
                "urgencyLevel": {
                    "type": "string",
                    "enum": ["low", "medium", "high", "emergency"],
                    "description": "The assessed urgency level from triage"
                },
                "maxDistance": {
                    "type": "number",
                    "description": "Maximum distance to search for facilities (in kilometers)"
                }
            },
            "required": ["userCity", "urgencyLevel"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{UrgencyLevel, WaitRoomQuery};

    #[test]
    fn test_declaration_shape() {
        let decl = tool_declaration();
        assert_eq!(decl["name"], TOOL_NAME);
        assert_eq!(decl["parameters"]["required"], json!(["userCity", "urgencyLevel"]));
        assert_eq!(decl["parameters"]["properties"]["maxDistance"]["type"], "number");
    }

    #[test]
    fn test_declared_enum_matches_urgency_levels() {
        let decl = tool_declaration();
        let levels = decl["parameters"]["properties"]["urgencyLevel"]["enum"]
            .as_array()
            .unwrap();

        for level in levels {
            let args = json!({"userCity": "Edmonton", "urgencyLevel": level});
            let query = WaitRoomQuery::from_tool_args(&args).unwrap();
            assert_eq!(Value::from(query.urgency_level.as_str()), *level);
        }
        assert_eq!(levels.len(), 4);
        assert!(levels.contains(&Value::from(UrgencyLevel::Emergency.as_str())));
    }
}
