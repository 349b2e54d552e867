use serde::{Deserialize, Serialize};

/// Response to a successful session creation.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadCreated {
    pub key: String,
    pub upload_id: String,
}

/// One entry of the completion manifest. Also the response shape of a
/// part upload, so clients can collect responses and echo them back
/// verbatim when completing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPart {
    pub part_number: u16,
    pub etag: String,
}

/// Response to a successful completion.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadCompleted {
    pub key: String,
}

/// One listing entry.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub etag: String,
}

/// Metadata-only view of an object.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStats {
    pub size: u64,
    pub etag: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_names_are_camel_case() {
        let created = UploadCreated {
            key: "a.txt".into(),
            upload_id: "u-1".into(),
        };
        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            json!({ "key": "a.txt", "uploadId": "u-1" })
        );

        let part = CompletedPart {
            part_number: 1,
            etag: "E1".into(),
        };
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({ "partNumber": 1, "etag": "E1" })
        );
    }
}
