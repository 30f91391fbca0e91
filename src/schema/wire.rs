use serde::{Deserialize, Serialize};

/// Body of the single `POST` sent to the story service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub code: String,
    pub style: String,
}

/// Successful response body. Fields other than `story` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    pub story: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_code_and_style() {
        let req = StoryRequest {
            code: "x = 1".to_string(),
            style: "a dramatic pirate adventure".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "x = 1", "style": "a dramatic pirate adventure"})
        );
    }

    #[test]
    fn response_ignores_extra_fields() {
        let resp: StoryResponse =
            serde_json::from_str(r#"{"story": "Once upon a loop", "model": "gpt-oss:20b"}"#)
                .unwrap();
        assert_eq!(resp.story, "Once upon a loop");
    }

    #[test]
    fn response_without_story_is_rejected() {
        let resp = serde_json::from_str::<StoryResponse>(r#"{"tale": "nope"}"#);
        assert!(resp.is_err());
    }
}
